//! A painter that records draw calls into a display list.
//!
//! [`RecordingPainter`] is the headless backend: it never touches a GPU and
//! keeps every primitive as a [`DrawCommand`]. Hosts that batch draw work can
//! replay the list later, and tests assert on it directly.

use crate::painter::Painter;
use crate::text::{Font, HorizontalAlign};
use crate::texture::Texture;
use crate::types::{Color, Point, Rect};

/// A single recorded draw primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled or outlined rectangle.
    Rect {
        rect: Rect,
        color: Color,
        filled: bool,
        border_width: f32,
    },
    /// A run of text.
    Text {
        position: Point,
        text: String,
        align: HorizontalAlign,
        font: Font,
        size: f32,
        wrap_width: f32,
    },
    /// A texture drawn into a rectangle.
    Texture {
        rect: Rect,
        texture: Texture,
        tile: bool,
        modulate: Color,
    },
}

impl DrawCommand {
    /// The text of a [`DrawCommand::Text`], if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns `true` for filled rectangles.
    pub fn is_fill(&self) -> bool {
        matches!(self, DrawCommand::Rect { filled: true, .. })
    }

    /// Returns `true` for outlined rectangles.
    pub fn is_outline(&self) -> bool {
        matches!(self, DrawCommand::Rect { filled: false, .. })
    }
}

/// Statistics about a recorded frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of draw calls submitted.
    pub draw_calls: u32,
    /// Number of text runs.
    pub text_runs: u32,
    /// Number of texture draws.
    pub textures: u32,
}

/// A [`Painter`] that records every call.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    commands: Vec<DrawCommand>,
    stats: FrameStats,
}

impl RecordingPainter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far, in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.stats = FrameStats::default();
        std::mem::take(&mut self.commands)
    }

    /// The text runs recorded so far.
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().filter_map(DrawCommand::as_text).collect()
    }

    /// Statistics for the recorded commands.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Discard all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.stats = FrameStats::default();
    }

    fn push(&mut self, command: DrawCommand) {
        self.stats.draw_calls += 1;
        match &command {
            DrawCommand::Text { .. } => self.stats.text_runs += 1,
            DrawCommand::Texture { .. } => self.stats.textures += 1,
            DrawCommand::Rect { .. } => {}
        }
        tracing::trace!(target: "horizon_vscroll_render::recording", ?command, "recorded");
        self.commands.push(command);
    }
}

impl Painter for RecordingPainter {
    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool, border_width: f32) {
        self.push(DrawCommand::Rect {
            rect,
            color,
            filled,
            border_width,
        });
    }

    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        align: HorizontalAlign,
        font: &Font,
        size: f32,
        wrap_width: f32,
    ) {
        self.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            align,
            font: font.clone(),
            size,
            wrap_width,
        });
    }

    fn draw_texture_rect(&mut self, rect: Rect, texture: &Texture, tile: bool, modulate: Color) {
        self.push(DrawCommand::Texture {
            rect,
            texture: texture.clone(),
            tile,
            modulate,
        });
    }
}
