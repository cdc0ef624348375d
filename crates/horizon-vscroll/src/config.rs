//! List configuration.
//!
//! [`ListConfig`] gathers every tunable the list exposes. It can be built in
//! code or loaded from TOML; missing keys fall back to their defaults.
//!
//! ```
//! use horizon_vscroll::config::{LayoutMode, ListConfig};
//! use horizon_vscroll::GridAlignment;
//!
//! let config = ListConfig::from_toml_str(r##"
//!     scroll_tick_amount = 24.0
//!     layout_mode = "list"
//!     alignment = "center"
//!
//!     [diagnostics]
//!     debug_draw = true
//!     selection_color = "#00FF00FF"
//! "##).unwrap();
//!
//! assert_eq!(config.scroll_tick_amount, 24.0);
//! assert_eq!(config.layout_mode, LayoutMode::List);
//! assert_eq!(config.alignment, GridAlignment::Center);
//! assert!(config.diagnostics.debug_draw);
//! ```

use serde::{Deserialize, Serialize};

use horizon_vscroll_core::logging::targets;
use horizon_vscroll_render::Color;

use crate::error::{Result, VScrollError};
use crate::view::GridAlignment;

/// How items are arranged across the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// A single column.
    List,
    /// As many columns as fit the viewport width.
    #[default]
    Grid,
}

/// What pointer motion does while the left button is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragBehavior {
    /// Keep selecting the item under the pointer.
    #[default]
    Select,
    /// Scroll the content with the pointer.
    Scroll,
}

/// Visual diagnostics and selection highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Outline every item and template node.
    pub debug_draw: bool,
    /// Outline the selected item.
    pub highlight_selection: bool,
    /// Outline color for the selected item.
    #[serde(with = "color_hex")]
    pub selection_color: Color,
    /// Outline width for item outlines.
    pub selection_border_width: f32,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            debug_draw: false,
            highlight_selection: true,
            selection_color: Color::RED,
            selection_border_width: 8.0,
        }
    }
}

/// Configuration for a [`VirtualScrollList`](crate::VirtualScrollList).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Scroll distance of one wheel step.
    pub scroll_tick_amount: f32,
    /// Fixed item width. Zero or negative sizes items automatically.
    pub row_width: f32,
    /// Horizontal placement of the grid block.
    pub alignment: GridAlignment,
    /// List or grid arrangement.
    pub layout_mode: LayoutMode,
    /// Auto-sized items take the full viewport width.
    ///
    /// When `false`, auto-sized items keep the template's natural width.
    pub fill_width: bool,
    /// Overscroll correction speed, per second.
    pub correction_rate: f32,
    /// Effect of dragging with the left button held.
    pub drag_behavior: DragBehavior,
    /// Debug and selection outlines.
    pub diagnostics: DiagnosticsConfig,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            scroll_tick_amount: 10.0,
            row_width: -1.0,
            alignment: GridAlignment::Start,
            layout_mode: LayoutMode::Grid,
            fill_width: true,
            correction_rate: 10.0,
            drag_behavior: DragBehavior::Select,
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl ListConfig {
    /// Parse a configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(VScrollError::Config)?;
        tracing::debug!(
            target: targets::CONFIG,
            layout_mode = ?config.layout_mode,
            alignment = ?config.alignment,
            row_width = config.row_width,
            "loaded list configuration"
        );
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        to_toml(self)
    }

    /// The fixed item width, if one is configured.
    pub fn fixed_width(&self) -> Option<f32> {
        (self.row_width > 0.0).then_some(self.row_width)
    }
}

/// Serde adapter storing a [`Color`] as a `#RRGGBBAA` string.
fn to_toml<T: Serialize>(value: &T) -> Result<String> {
    toml::to_string(value).map_err(VScrollError::ConfigSerialize)
}

pub(crate) mod color_hex {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use horizon_vscroll_render::Color;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::from_hex(&text).ok_or_else(|| D::Error::custom(format!("invalid color `{text}`")))
    }
}
