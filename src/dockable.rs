/*
 * Collaborator contracts between the layout engine and the platform layer.
 *
 * `Dockable` is the capability set every docked child exposes: geometry,
 * visibility and margins. `DockHost` is the parent container; it reports its
 * client size, resolves logical control ids to children and owns the native
 * window placement. Hosts are explicit registries passed by reference into the
 * layout engine, so there is no process-wide handle-to-object map.
 */
use crate::error::Result as PlatformResult;
use crate::types::{ControlId, Margins, Point, Size, WindowPlacement};

/// Anything with per-side margins. Only `margins`/`set_margins` are required.
pub trait Marginal {
    fn margins(&self) -> Margins;
    fn set_margins(&mut self, margins: Margins);

    fn margin_top(&self) -> i32 {
        self.margins().top
    }

    fn margin_bottom(&self) -> i32 {
        self.margins().bottom
    }

    fn margin_left(&self) -> i32 {
        self.margins().left
    }

    fn margin_right(&self) -> i32 {
        self.margins().right
    }

    fn set_margins_all(&mut self, margin: i32) {
        self.set_margins(Margins::uniform(margin));
    }

    fn set_margins_hv(&mut self, vertical: i32, horizontal: i32) {
        self.set_margins(Margins::symmetric(vertical, horizontal));
    }

    fn set_margin_top(&mut self, margin: i32) {
        let mut m = self.margins();
        m.top = margin;
        self.set_margins(m);
    }

    fn set_margin_bottom(&mut self, margin: i32) {
        let mut m = self.margins();
        m.bottom = margin;
        self.set_margins(m);
    }

    fn set_margin_left(&mut self, margin: i32) {
        let mut m = self.margins();
        m.left = margin;
        self.set_margins(m);
    }

    fn set_margin_right(&mut self, margin: i32) {
        let mut m = self.margins();
        m.right = margin;
        self.set_margins(m);
    }
}

/// A child that can be positioned by a `DockLayout`.
pub trait Dockable: Marginal {
    /// Position relative to the parent's client area.
    fn position(&self) -> Point;
    /// Last-known size. The layout engine uses this as the natural size.
    fn size(&self) -> Size;
    fn is_visible(&self) -> bool;

    fn set_position(&mut self, x: i32, y: i32);
    /// Implementations may clamp; the engine passes negative sizes through.
    fn set_size(&mut self, width: i32, height: i32);
}

/// The container a `DockLayout` arranges children within.
pub trait DockHost {
    fn client_size(&self) -> Size;
    fn child(&self, id: ControlId) -> Option<&dyn Dockable>;
    fn child_mut(&mut self, id: ControlId) -> Option<&mut dyn Dockable>;

    fn window_placement(&self) -> PlatformResult<WindowPlacement>;
    fn set_window_placement(&mut self, placement: &WindowPlacement) -> PlatformResult<()>;
}
