/*
 * Win32 binding of the dock collaborator contracts. `Win32DockHost` wraps a
 * top-level window or panel `HWND` and keeps a registry of its docked child
 * controls keyed by `ControlId`; `Win32Control` exposes one child `HWND`
 * through `Dockable`. Child positions are reported and applied in the host's
 * client coordinates.
 *
 * The owning window procedure is expected to call `DockLayout::update` with
 * this host on `WM_SIZE` and whenever it toggles a child's visibility.
 */
use std::collections::HashMap;

use windows::Win32::{
    Foundation::{HWND, POINT, RECT},
    Graphics::Gdi::MapWindowPoints,
    UI::WindowsAndMessaging::{
        GetClientRect, GetWindowPlacement, GetWindowRect, IsWindowVisible, SET_WINDOW_POS_FLAGS,
        SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetWindowPlacement, SetWindowPos,
        WINDOWPLACEMENT, WINDOWPLACEMENT_FLAGS,
    },
};

use crate::dockable::{DockHost, Dockable, Marginal};
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::{ControlId, Margins, Point, Rect, Size, WindowPlacement};

impl From<RECT> for Rect {
    fn from(rc: RECT) -> Self {
        Rect::new(rc.left, rc.top, rc.right, rc.bottom)
    }
}

impl From<Rect> for RECT {
    fn from(rect: Rect) -> Self {
        RECT {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        }
    }
}

impl From<&WINDOWPLACEMENT> for WindowPlacement {
    fn from(wp: &WINDOWPLACEMENT) -> Self {
        WindowPlacement {
            flags: wp.flags.0,
            show_cmd: wp.showCmd,
            min_position: Point::new(wp.ptMinPosition.x, wp.ptMinPosition.y),
            max_position: Point::new(wp.ptMaxPosition.x, wp.ptMaxPosition.y),
            normal_position: wp.rcNormalPosition.into(),
        }
    }
}

impl From<&WindowPlacement> for WINDOWPLACEMENT {
    fn from(p: &WindowPlacement) -> Self {
        WINDOWPLACEMENT {
            length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
            flags: WINDOWPLACEMENT_FLAGS(p.flags),
            showCmd: p.show_cmd,
            ptMinPosition: POINT {
                x: p.min_position.x,
                y: p.min_position.y,
            },
            ptMaxPosition: POINT {
                x: p.max_position.x,
                y: p.max_position.y,
            },
            rcNormalPosition: p.normal_position.into(),
        }
    }
}

/// A native child window docked inside a `Win32DockHost`.
#[derive(Debug)]
pub struct Win32Control {
    hwnd: HWND,
    parent_hwnd: HWND,
    margins: Margins,
}

impl Win32Control {
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Window rectangle in the parent's client coordinates.
    fn client_bounds(&self) -> Rect {
        let mut rc = RECT::default();
        if let Err(err) = unsafe { GetWindowRect(self.hwnd, &mut rc) } {
            log::warn!("[Layout] GetWindowRect failed for {:?}: {err:?}", self.hwnd);
            return Rect::default();
        }
        unsafe {
            let points = std::slice::from_raw_parts_mut(&mut rc as *mut RECT as *mut POINT, 2);
            MapWindowPoints(None, Some(self.parent_hwnd), points);
        }
        rc.into()
    }

    fn set_window_pos(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        keep: SET_WINDOW_POS_FLAGS,
    ) {
        let flags = SWP_NOZORDER | SWP_NOACTIVATE | keep;
        if let Err(err) = unsafe { SetWindowPos(self.hwnd, None, x, y, width, height, flags) } {
            log::warn!("[Layout] SetWindowPos failed for {:?}: {err:?}", self.hwnd);
        }
    }
}

impl Marginal for Win32Control {
    fn margins(&self) -> Margins {
        self.margins
    }

    fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }
}

impl Dockable for Win32Control {
    fn position(&self) -> Point {
        self.client_bounds().origin()
    }

    fn size(&self) -> Size {
        self.client_bounds().size()
    }

    fn is_visible(&self) -> bool {
        unsafe { IsWindowVisible(self.hwnd) }.as_bool()
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.set_window_pos(x, y, 0, 0, SWP_NOSIZE);
    }

    fn set_size(&mut self, width: i32, height: i32) {
        // Native windows cannot take negative extents.
        self.set_window_pos(0, 0, width.max(0), height.max(0), SWP_NOMOVE);
    }
}

/// A native container window whose children are arranged by a `DockLayout`.
#[derive(Debug)]
pub struct Win32DockHost {
    hwnd: HWND,
    children: HashMap<ControlId, Win32Control>,
}

impl Win32DockHost {
    pub fn new(hwnd: HWND) -> PlatformResult<Self> {
        if hwnd.is_invalid() {
            return Err(PlatformError::InvalidHandle(
                "Win32DockHost requires a valid container HWND".to_string(),
            ));
        }
        Ok(Self {
            hwnd,
            children: HashMap::new(),
        })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Registers a child window so bindings for `control_id` resolve to it.
    pub fn register_control(&mut self, control_id: ControlId, hwnd: HWND) -> PlatformResult<()> {
        if hwnd.is_invalid() {
            return Err(PlatformError::InvalidHandle(format!(
                "control {} has an invalid HWND",
                control_id.raw()
            )));
        }
        self.children.insert(
            control_id,
            Win32Control {
                hwnd,
                parent_hwnd: self.hwnd,
                margins: Margins::default(),
            },
        );
        Ok(())
    }

    pub fn control(&self, control_id: ControlId) -> Option<&Win32Control> {
        self.children.get(&control_id)
    }

    pub fn control_mut(&mut self, control_id: ControlId) -> Option<&mut Win32Control> {
        self.children.get_mut(&control_id)
    }
}

impl DockHost for Win32DockHost {
    fn client_size(&self) -> Size {
        let mut rc = RECT::default();
        if let Err(err) = unsafe { GetClientRect(self.hwnd, &mut rc) } {
            log::error!("[Layout] GetClientRect failed for {:?}: {err:?}", self.hwnd);
            return Size::default();
        }
        Rect::from(rc).size()
    }

    fn child(&self, id: ControlId) -> Option<&dyn Dockable> {
        self.children.get(&id).map(|c| c as &dyn Dockable)
    }

    fn child_mut(&mut self, id: ControlId) -> Option<&mut dyn Dockable> {
        self.children.get_mut(&id).map(|c| c as &mut dyn Dockable)
    }

    fn window_placement(&self) -> PlatformResult<WindowPlacement> {
        let mut wp = WINDOWPLACEMENT {
            length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
            ..Default::default()
        };
        unsafe { GetWindowPlacement(self.hwnd, &mut wp) }.map_err(|err| {
            PlatformError::OperationFailed(format!("GetWindowPlacement failed: {err:?}"))
        })?;
        Ok(WindowPlacement::from(&wp))
    }

    fn set_window_placement(&mut self, placement: &WindowPlacement) -> PlatformResult<()> {
        let wp = WINDOWPLACEMENT::from(placement);
        unsafe { SetWindowPlacement(self.hwnd, &wp) }.map_err(|err| {
            PlatformError::OperationFailed(format!("SetWindowPlacement failed: {err:?}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_container_handle() {
        let result = Win32DockHost::new(HWND(std::ptr::null_mut()));
        assert!(matches!(result, Err(PlatformError::InvalidHandle(_))));
    }

    #[test]
    fn rejects_invalid_child_handle() {
        let mut host = Win32DockHost::new(HWND(0x1234isize as *mut _)).unwrap();
        let result = host.register_control(ControlId::new(1), HWND(std::ptr::null_mut()));
        assert!(result.is_err());
        assert!(host.control(ControlId::new(1)).is_none());
    }

    #[test]
    fn window_placement_converts_both_ways() {
        let placement = WindowPlacement {
            flags: 2,
            show_cmd: 3,
            min_position: Point::new(-1, -2),
            max_position: Point::new(-8, -9),
            normal_position: Rect::new(10, 20, 640, 480),
        };
        let native = WINDOWPLACEMENT::from(&placement);
        assert_eq!(native.length as usize, std::mem::size_of::<WINDOWPLACEMENT>());
        assert_eq!(WindowPlacement::from(&native), placement);
    }
}
