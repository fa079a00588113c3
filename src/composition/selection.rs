// Style and accent color selection

use super::types::{AccentColor, PhotoStyle};
use serde::{Deserialize, Serialize};

/// Current style and accent color; both start at the first entry of their list
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionStore {
    style: PhotoStyle,
    color: AccentColor,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_style(&mut self, style: PhotoStyle) {
        self.style = style;
    }

    pub fn set_color(&mut self, color: AccentColor) {
        self.color = color;
    }

    pub fn style(&self) -> PhotoStyle {
        self.style
    }

    pub fn color(&self) -> AccentColor {
        self.color
    }
}
