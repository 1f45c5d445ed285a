/*
 * Dock layout engine. A `DockLayout` owns an ordered list of (control,
 * direction) bindings plus the padding applied to its container's client
 * area. On every `update` it walks the bindings, pins edge-docked children to
 * the current working bounds, shrinks those bounds by each child's outer
 * extent and lets `Fill` children take whatever is left.
 *
 * Docking order is priority order unless `DockOrder::SortedByDirection` is
 * selected, in which case bindings are stable-sorted by `Direction` before
 * each pass. The engine performs no signal subscription of its own; the
 * owning container calls `update` when its client area or a child's
 * visibility changes.
 */
use crate::config::LayoutConfig;
use crate::dockable::{DockHost, Marginal};
use crate::types::{Anchor, ControlId, Direction, DockOrder, Edge, Margins, Rect, Size};

/// One docked child and its placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutBinding {
    pub control_id: ControlId,
    pub direction: Direction,
}

/// Geometry of a child as seen at the start of a layout pass, for `calculate_layout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildSnapshot {
    pub control_id: ControlId,
    pub direction: Direction,
    pub size: Size,
    pub margins: Margins,
    pub visible: bool,
}

/*
 * Remaining region during a layout pass. Width and height of the region are
 * always `x1 - x0` and `y1 - y0`, so shrinking a bound also shrinks the span
 * available to later children on that axis.
 */
#[derive(Debug, Clone, Copy)]
struct WorkingBounds {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl WorkingBounds {
    fn new(client_size: Size, padding: Margins) -> Self {
        Self {
            x0: padding.left,
            y0: padding.top,
            x1: client_size.width.wrapping_sub(padding.right),
            y1: client_size.height.wrapping_sub(padding.bottom),
        }
    }

    fn width(&self) -> i32 {
        self.x1.wrapping_sub(self.x0)
    }

    fn height(&self) -> i32 {
        self.y1.wrapping_sub(self.y0)
    }

    /*
     * Computes the rectangle for one child and consumes its edge of the region.
     * Arithmetic wraps: out-of-range sizes or margins produce wrong geometry,
     * never a panic.
     */
    fn place(&mut self, direction: Direction, natural: Size, margins: Margins) -> Rect {
        let total_width = natural.width.wrapping_add(margins.horizontal());
        let total_height = natural.height.wrapping_add(margins.vertical());

        let x = match direction.horizontal_anchor() {
            Anchor::Start => self.x0.wrapping_add(margins.left),
            Anchor::End => self.x1.wrapping_sub(total_width).wrapping_add(margins.left),
            Anchor::Center => self
                .x0
                .wrapping_add(self.width().wrapping_sub(total_width) / 2)
                .wrapping_add(margins.left),
        };
        let y = match direction.vertical_anchor() {
            Anchor::Start => self.y0.wrapping_add(margins.top),
            Anchor::End => self.y1.wrapping_sub(total_height).wrapping_add(margins.top),
            Anchor::Center => self
                .y0
                .wrapping_add(self.height().wrapping_sub(total_height) / 2)
                .wrapping_add(margins.top),
        };

        let width = if direction.stretches_width() {
            self.width().wrapping_sub(margins.horizontal())
        } else {
            natural.width
        };
        let height = if direction.stretches_height() {
            self.height().wrapping_sub(margins.vertical())
        } else {
            natural.height
        };

        match direction.edge() {
            Some(Edge::Top) => self.y0 = self.y0.wrapping_add(total_height),
            Some(Edge::Bottom) => self.y1 = self.y1.wrapping_sub(total_height),
            Some(Edge::Left) => self.x0 = self.x0.wrapping_add(total_width),
            Some(Edge::Right) => self.x1 = self.x1.wrapping_sub(total_width),
            None => {}
        }

        Rect::from_xywh(x, y, width, height)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DockLayout {
    bindings: Vec<LayoutBinding>,
    padding: Margins,
    order: DockOrder,
}

impl DockLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            bindings: Vec::new(),
            padding: config.padding,
            order: config.order,
        }
    }

    /// Appends a binding. Duplicates and conflicting directions are accepted as-is.
    pub fn dock(&mut self, control_id: ControlId, direction: Direction) {
        log::trace!("[Layout] Dock control {} at {direction:?}", control_id.raw());
        self.bindings.push(LayoutBinding {
            control_id,
            direction,
        });
    }

    pub fn bindings(&self) -> &[LayoutBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn order(&self) -> DockOrder {
        self.order
    }

    pub fn set_order(&mut self, order: DockOrder) {
        self.order = order;
    }

    pub fn padding(&self) -> Margins {
        self.padding
    }

    pub fn set_padding(&mut self, top: i32, right: i32, bottom: i32, left: i32) {
        self.padding = Margins::new(top, right, bottom, left);
    }

    pub fn set_padding_all(&mut self, padding: i32) {
        self.padding = Margins::uniform(padding);
    }

    pub fn set_padding_hv(&mut self, vertical: i32, horizontal: i32) {
        self.padding = Margins::symmetric(vertical, horizontal);
    }

    pub fn set_padding_top(&mut self, padding: i32) {
        self.padding.top = padding;
    }

    pub fn set_padding_right(&mut self, padding: i32) {
        self.padding.right = padding;
    }

    pub fn set_padding_bottom(&mut self, padding: i32) {
        self.padding.bottom = padding;
    }

    pub fn set_padding_left(&mut self, padding: i32) {
        self.padding.left = padding;
    }

    fn sort_if_requested(&mut self) {
        if self.order == DockOrder::SortedByDirection {
            // `sort_by_key` is stable, so equal directions keep docking order.
            self.bindings.sort_by_key(|b| b.direction);
        }
    }

    /*
     * Pure layout calculation. Children are processed in slice order and the
     * returned rectangles are in parent-client coordinates. Invisible children
     * are omitted and reserve no space. No clamping is applied.
     */
    pub fn calculate_layout(
        client_size: Size,
        padding: Margins,
        children: &[ChildSnapshot],
    ) -> Vec<(ControlId, Rect)> {
        let mut bounds = WorkingBounds::new(client_size, padding);
        children
            .iter()
            .filter(|child| child.visible)
            .map(|child| {
                let rect = bounds.place(child.direction, child.size, child.margins);
                (child.control_id, rect)
            })
            .collect()
    }

    /// Snapshots every resolvable binding in processing order.
    fn snapshot_children<H: DockHost + ?Sized>(&self, host: &H) -> Vec<ChildSnapshot> {
        self.bindings
            .iter()
            .filter_map(|binding| {
                let Some(child) = host.child(binding.control_id) else {
                    log::warn!(
                        "[Layout] Control {} is docked but not registered with the host.",
                        binding.control_id.raw()
                    );
                    return None;
                };
                Some(ChildSnapshot {
                    control_id: binding.control_id,
                    direction: binding.direction,
                    size: child.size(),
                    margins: child.margins(),
                    visible: child.is_visible(),
                })
            })
            .collect()
    }

    /*
     * Recomputes and applies geometry to every visible bound child. All
     * children are snapshotted before any is moved, then the rectangles from
     * `calculate_layout` are applied in order.
     */
    pub fn update<H: DockHost + ?Sized>(&mut self, host: &mut H) {
        self.sort_if_requested();

        let client_size = host.client_size();
        let children = self.snapshot_children(host);
        let layout = Self::calculate_layout(client_size, self.padding, &children);

        for (control_id, rect) in &layout {
            let Some(child) = host.child_mut(*control_id) else {
                continue;
            };
            child.set_position(rect.left, rect.top);
            child.set_size(rect.width(), rect.height());
            log::trace!("[Layout] Control {} -> {rect:?}", control_id.raw());
        }

        log::debug!(
            "[Layout] Update applied: client={client_size:?}, padding={:?}, bindings={}, placed={}",
            self.padding,
            self.bindings.len(),
            layout.len()
        );
    }
}

impl Marginal for DockLayout {
    fn margins(&self) -> Margins {
        self.padding
    }

    fn set_margins(&mut self, margins: Margins) {
        self.padding = margins;
    }
}
