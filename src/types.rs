/*
 * Platform-agnostic value types used by the dock layout engine: logical control
 * ids, integer geometry (points, sizes, rectangles, margins), the docking
 * directions and the opaque window placement record that is persisted together
 * with child geometry. Nothing here touches Win32, so these types compile and
 * are tested on every platform.
 */
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PlatformError, Result as PlatformResult};

/// Logical identifier of a child control registered with a `DockHost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlId(pub i32);

impl ControlId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/*
 * Axis-aligned rectangle in either parent-client or screen coordinates. The
 * coordinate space is implied by the caller; `to_screen` and `to_client`
 * convert between the two given the screen position of the client origin.
 * Inverted rectangles are tolerated and simply report negative extents.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.wrapping_add(width), y.wrapping_add(height))
    }

    pub const fn width(&self) -> i32 {
        self.right.wrapping_sub(self.left)
    }

    pub const fn height(&self) -> i32 {
        self.bottom.wrapping_sub(self.top)
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Shrinks the rectangle by `margins` on each side. The result is not clamped.
    pub fn inset(&self, margins: Margins) -> Rect {
        Rect::new(
            self.left + margins.left,
            self.top + margins.top,
            self.right - margins.right,
            self.bottom - margins.bottom,
        )
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    pub fn to_screen(&self, client_origin: Point) -> Rect {
        self.translate(client_origin.x, client_origin.y)
    }

    pub fn to_client(&self, client_origin: Point) -> Rect {
        self.translate(-client_origin.x, -client_origin.y)
    }
}

/// Per-side inset. Used both for a child's own margins and a layout's padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Margins {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Margins {
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(margin: i32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    pub const fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub const fn horizontal(&self) -> i32 {
        self.left.wrapping_add(self.right)
    }

    pub const fn vertical(&self) -> i32 {
        self.top.wrapping_add(self.bottom)
    }
}

/*
 * Placement request for a docked child. The first five variants form the
 * basic edge/fill set and their declaration order is the processing order
 * used by `DockOrder::SortedByDirection`. The remaining variants align a child
 * to a corner or center of the remaining region without stretching it.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
    Fill,
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    LeftTop,
    LeftCenter,
    LeftBottom,
    RightTop,
    RightCenter,
    RightBottom,
    Center,
}

/// The edge whose working bound a docked child consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Where a child sits along one axis of the remaining region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Center,
    End,
}

impl Direction {
    /// Primary edge of the direction; `None` for `Fill` and `Center`, which never shrink the region.
    pub const fn edge(self) -> Option<Edge> {
        use Direction::*;
        match self {
            Top | TopLeft | TopCenter | TopRight => Some(Edge::Top),
            Bottom | BottomLeft | BottomCenter | BottomRight => Some(Edge::Bottom),
            Left | LeftTop | LeftCenter | LeftBottom => Some(Edge::Left),
            Right | RightTop | RightCenter | RightBottom => Some(Edge::Right),
            Fill | Center => None,
        }
    }

    pub const fn horizontal_anchor(self) -> Anchor {
        use Direction::*;
        match self {
            Right | RightTop | RightCenter | RightBottom | TopRight | BottomRight => Anchor::End,
            TopCenter | BottomCenter | Center => Anchor::Center,
            _ => Anchor::Start,
        }
    }

    pub const fn vertical_anchor(self) -> Anchor {
        use Direction::*;
        match self {
            Bottom | BottomLeft | BottomCenter | BottomRight | LeftBottom | RightBottom => {
                Anchor::End
            }
            LeftCenter | RightCenter | Center => Anchor::Center,
            _ => Anchor::Start,
        }
    }

    pub const fn stretches_width(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom | Direction::Fill)
    }

    pub const fn stretches_height(self) -> bool {
        matches!(self, Direction::Left | Direction::Right | Direction::Fill)
    }
}

/// Order in which bindings are processed during a layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockOrder {
    /// Docking order is priority order.
    #[default]
    Registration,
    /// Bindings are stable-sorted by `Direction` before every pass.
    SortedByDirection,
}

/*
 * Opaque snapshot of a top-level window's show state and its normal,
 * minimized and maximized positions. The layout engine never interprets these
 * fields; they are captured from and restored to the native window verbatim.
 * Persisted as ten space-separated integers:
 * `flags showCmd minX minY maxX maxY left top right bottom`.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowPlacement {
    pub flags: u32,
    pub show_cmd: u32,
    pub min_position: Point,
    pub max_position: Point,
    pub normal_position: Rect,
}

const WINDOW_PLACEMENT_FIELDS: usize = 10;

impl fmt::Display for WindowPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {} {}",
            self.flags,
            self.show_cmd,
            self.min_position.x,
            self.min_position.y,
            self.max_position.x,
            self.max_position.y,
            self.normal_position.left,
            self.normal_position.top,
            self.normal_position.right,
            self.normal_position.bottom
        )
    }
}

impl FromStr for WindowPlacement {
    type Err = PlatformError;

    fn from_str(s: &str) -> PlatformResult<Self> {
        let tokens: Vec<&str> = s.split_whitespace().take(WINDOW_PLACEMENT_FIELDS).collect();
        if tokens.len() < WINDOW_PLACEMENT_FIELDS {
            return Err(PlatformError::Decode(format!(
                "WindowState has {} of {WINDOW_PLACEMENT_FIELDS} fields: {s:?}",
                tokens.len()
            )));
        }

        fn field<T: FromStr>(name: &str, token: &str) -> PlatformResult<T> {
            token.parse::<T>().map_err(|_| {
                PlatformError::Decode(format!("WindowState field {name} is not an integer: {token:?}"))
            })
        }

        Ok(WindowPlacement {
            flags: field("flags", tokens[0])?,
            show_cmd: field("showCmd", tokens[1])?,
            min_position: Point::new(field("minX", tokens[2])?, field("minY", tokens[3])?),
            max_position: Point::new(field("maxX", tokens[4])?, field("maxY", tokens[5])?),
            normal_position: Rect::new(
                field("left", tokens[6])?,
                field("top", tokens[7])?,
                field("right", tokens[8])?,
                field("bottom", tokens[9])?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_extents_and_space_conversion() {
        let rect = Rect::from_xywh(10, 20, 30, 40);
        assert_eq!(rect.width(), 30);
        assert_eq!(rect.height(), 40);

        let origin = Point::new(100, 200);
        let screen = rect.to_screen(origin);
        assert_eq!(screen, Rect::new(110, 220, 140, 260));
        assert_eq!(screen.to_client(origin), rect);
    }

    #[test]
    fn inverted_rect_reports_negative_extent() {
        let rect = Rect::new(0, 0, 10, 10).inset(Margins::uniform(8));
        assert_eq!(rect.width(), -6);
        assert!(rect.is_empty());
    }

    #[test]
    fn simple_directions_sort_in_declaration_order() {
        let mut dirs = vec![
            Direction::Fill,
            Direction::Right,
            Direction::Top,
            Direction::Left,
            Direction::Bottom,
        ];
        dirs.sort();
        assert_eq!(
            dirs,
            vec![
                Direction::Top,
                Direction::Bottom,
                Direction::Left,
                Direction::Right,
                Direction::Fill
            ]
        );
    }

    #[test]
    fn corner_directions_classify_by_primary_edge() {
        assert_eq!(Direction::TopRight.edge(), Some(Edge::Top));
        assert_eq!(Direction::TopRight.horizontal_anchor(), Anchor::End);
        assert_eq!(Direction::LeftBottom.edge(), Some(Edge::Left));
        assert_eq!(Direction::LeftBottom.vertical_anchor(), Anchor::End);
        assert_eq!(Direction::Center.edge(), None);
        assert!(!Direction::TopCenter.stretches_width());
    }

    #[test]
    fn window_placement_string_round_trips() {
        let placement = WindowPlacement {
            flags: 2,
            show_cmd: 1,
            min_position: Point::new(-1, -1),
            max_position: Point::new(-8, -8),
            normal_position: Rect::new(100, 50, 800, 650),
        };
        let encoded = placement.to_string();
        assert_eq!(encoded, "2 1 -1 -1 -8 -8 100 50 800 650");
        assert_eq!(encoded.parse::<WindowPlacement>().unwrap(), placement);
    }

    #[test]
    fn window_placement_rejects_short_or_non_numeric_strings() {
        assert!(matches!(
            "0 1 2".parse::<WindowPlacement>(),
            Err(PlatformError::Decode(_))
        ));
        let err = "0 1 0 0 0 0 x 0 10 10"
            .parse::<WindowPlacement>()
            .unwrap_err();
        assert!(err.to_string().contains("left"));
    }
}
