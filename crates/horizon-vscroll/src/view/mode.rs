//! Runtime and design-time behavior.
//!
//! The list is told at construction whether it is running in an application
//! or being previewed in a designer. The difference is confined to a
//! [`ModeStrategy`] so the rest of the list never checks the mode itself.

use horizon_vscroll_render::Painter;

use super::draw::{DrawContext, DrawStats, draw_items, draw_preview};

/// Where the list is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperatingMode {
    /// In an application: virtualized drawing, input and scroll correction.
    #[default]
    Runtime,
    /// In a designer: the bare template is drawn once and input is ignored.
    Preview,
}

impl OperatingMode {
    /// The strategy implementing this mode.
    pub fn strategy(self) -> Box<dyn ModeStrategy> {
        match self {
            OperatingMode::Runtime => Box::new(RuntimeStrategy),
            OperatingMode::Preview => Box::new(PreviewStrategy),
        }
    }
}

/// Mode-specific behavior of the list.
pub trait ModeStrategy: Send + Sync {
    /// The mode this strategy implements.
    fn mode(&self) -> OperatingMode;

    /// Whether frame ticks ease overscroll back into range.
    fn corrects_scroll(&self) -> bool;

    /// Whether pointer input is handled.
    fn accepts_input(&self) -> bool;

    /// Run the paint pass.
    fn paint(&self, ctx: &DrawContext<'_>, painter: &mut dyn Painter) -> DrawStats;
}

/// Normal application behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeStrategy;

impl ModeStrategy for RuntimeStrategy {
    fn mode(&self) -> OperatingMode {
        OperatingMode::Runtime
    }

    fn corrects_scroll(&self) -> bool {
        true
    }

    fn accepts_input(&self) -> bool {
        true
    }

    fn paint(&self, ctx: &DrawContext<'_>, painter: &mut dyn Painter) -> DrawStats {
        draw_items(ctx, painter)
    }
}

/// Designer preview behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewStrategy;

impl ModeStrategy for PreviewStrategy {
    fn mode(&self) -> OperatingMode {
        OperatingMode::Preview
    }

    fn corrects_scroll(&self) -> bool {
        false
    }

    fn accepts_input(&self) -> bool {
        false
    }

    fn paint(&self, ctx: &DrawContext<'_>, painter: &mut dyn Painter) -> DrawStats {
        draw_preview(ctx, painter)
    }
}
