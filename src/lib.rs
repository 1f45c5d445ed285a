/*
 * Dock layout engine for CommanDuctUI-style windows. A `DockLayout` arranges
 * the children of a container by per-child placement requests (edges, fill,
 * corners, center), child margins and container padding, and the `state`
 * module saves and restores window placement plus child geometry as JSON.
 *
 * The engine talks to the platform only through the `Dockable` and
 * `DockHost` traits. `headless` implements them in memory so the layout math
 * and persistence compile and are tested everywhere; `window_common` binds
 * them to Win32 `HWND`s and is only built on Windows.
 */
pub mod config;
pub mod dockable;
pub mod error;
pub mod headless;
pub mod layout;
pub mod state;
pub mod types;
#[cfg(target_os = "windows")]
pub mod window_common;

pub use config::LayoutConfig;
pub use dockable::{DockHost, Dockable, Marginal};
pub use error::{PlatformError, Result as PlatformResult};
pub use headless::{HeadlessControl, HeadlessHost};
pub use layout::{ChildSnapshot, DockLayout, LayoutBinding};
pub use state::{
    CtlState, LayoutState, load_state, load_state_file, save_state, save_state_file,
};
pub use types::{
    Anchor, ControlId, Direction, DockOrder, Edge, Margins, Point, Rect, Size, WindowPlacement,
};
#[cfg(target_os = "windows")]
pub use window_common::{Win32Control, Win32DockHost};
