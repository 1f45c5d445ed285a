/*
 * Construction-time settings for a `DockLayout`. Applications typically keep
 * one of these per container in their own configuration file, which is why it
 * is serde-enabled and tolerates missing fields.
 */
use serde::{Deserialize, Serialize};

use crate::types::{DockOrder, Margins};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Inset applied to the parent's client area before any child is placed.
    pub padding: Margins,
    pub order: DockOrder,
}

impl LayoutConfig {
    pub fn with_padding(mut self, padding: Margins) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_order(mut self, order: DockOrder) -> Self {
        self.order = order;
        self
    }
}
