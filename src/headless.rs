/*
 * In-memory implementation of the collaborator contracts. `HeadlessHost` plays
 * the role of a top-level window or panel and owns a registry of
 * `HeadlessControl`s keyed by `ControlId`. It lets the layout engine and the
 * state persistence run without native windows, both in tests and on
 * platforms where the Win32 host is not compiled.
 */
use std::collections::HashMap;

use crate::dockable::{DockHost, Dockable, Marginal};
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::{ControlId, Margins, Point, Rect, Size, WindowPlacement};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessControl {
    position: Point,
    size: Size,
    visible: bool,
    margins: Margins,
}

impl HeadlessControl {
    /// A visible control with the given natural size at the origin.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            position: Point::default(),
            size: Size::new(width, height),
            visible: true,
            margins: Margins::default(),
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(
            self.position.x,
            self.position.y,
            self.size.width,
            self.size.height,
        )
    }
}

impl Marginal for HeadlessControl {
    fn margins(&self) -> Margins {
        self.margins
    }

    fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }
}

impl Dockable for HeadlessControl {
    fn position(&self) -> Point {
        self.position
    }

    fn size(&self) -> Size {
        self.size
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.position = Point::new(x, y);
    }

    fn set_size(&mut self, width: i32, height: i32) {
        self.size = Size::new(width, height);
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    client_size: Size,
    // `None` models a window whose placement cannot be queried.
    placement: Option<WindowPlacement>,
    controls: HashMap<ControlId, HeadlessControl>,
    next_control_id: i32,
}

impl HeadlessHost {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            client_size: Size::new(width, height),
            placement: Some(WindowPlacement::default()),
            controls: HashMap::new(),
            next_control_id: 1,
        }
    }

    pub fn set_client_size(&mut self, width: i32, height: i32) {
        self.client_size = Size::new(width, height);
    }

    pub fn add_control(&mut self, control: HeadlessControl) -> ControlId {
        let id = ControlId::new(self.next_control_id);
        self.next_control_id += 1;
        self.controls.insert(id, control);
        id
    }

    pub fn control(&self, id: ControlId) -> Option<&HeadlessControl> {
        self.controls.get(&id)
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut HeadlessControl> {
        self.controls.get_mut(&id)
    }

    pub fn placement(&self) -> Option<WindowPlacement> {
        self.placement
    }

    pub fn set_placement(&mut self, placement: Option<WindowPlacement>) {
        self.placement = placement;
    }
}

impl DockHost for HeadlessHost {
    fn client_size(&self) -> Size {
        self.client_size
    }

    fn child(&self, id: ControlId) -> Option<&dyn Dockable> {
        self.controls.get(&id).map(|c| c as &dyn Dockable)
    }

    fn child_mut(&mut self, id: ControlId) -> Option<&mut dyn Dockable> {
        self.controls.get_mut(&id).map(|c| c as &mut dyn Dockable)
    }

    fn window_placement(&self) -> PlatformResult<WindowPlacement> {
        self.placement.ok_or_else(|| {
            PlatformError::OperationFailed("window placement is not available".to_string())
        })
    }

    fn set_window_placement(&mut self, placement: &WindowPlacement) -> PlatformResult<()> {
        self.placement = Some(*placement);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_setters_update_single_edges() {
        let mut control = HeadlessControl::new(10, 10);
        control.set_margins_hv(3, 5);
        control.set_margin_bottom(7);
        assert_eq!(control.margins(), Margins::new(3, 5, 7, 5));
        assert_eq!(control.margin_left(), 5);
    }

    #[test]
    fn host_assigns_sequential_ids() {
        let mut host = HeadlessHost::new(100, 100);
        let a = host.add_control(HeadlessControl::new(1, 1));
        let b = host.add_control(HeadlessControl::new(1, 1));
        assert_eq!(b.raw(), a.raw() + 1);
        assert!(host.child(a).is_some());
        assert!(host.child(ControlId::new(99)).is_none());
    }

    #[test]
    fn placement_query_fails_when_unavailable() {
        let mut host = HeadlessHost::new(100, 100);
        host.set_placement(None);
        assert!(matches!(
            host.window_placement(),
            Err(PlatformError::OperationFailed(_))
        ));
    }
}
