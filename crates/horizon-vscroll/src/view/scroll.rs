//! Scroll offset and overscroll correction.
//!
//! Input moves the offset immediately and may push it past either end of the
//! content. Each frame tick then eases the offset back toward the nearest
//! valid position, so overscroll springs back instead of being blocked.

use horizon_vscroll_core::logging::targets;

/// Fraction of the remaining distance corrected per second.
pub const DEFAULT_CORRECTION_RATE: f32 = 10.0;

/// Distance below which a correcting offset snaps onto its target.
pub const DEFAULT_SNAP_EPSILON: f32 = 0.01;

/// Vertical scroll state with eased overscroll correction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollController {
    offset: f32,
    tick_amount: f32,
    correction_rate: f32,
    snap_epsilon: f32,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl ScrollController {
    /// Create a controller at offset zero scrolling `tick_amount` per wheel step.
    pub fn new(tick_amount: f32) -> Self {
        Self {
            offset: 0.0,
            tick_amount,
            correction_rate: DEFAULT_CORRECTION_RATE,
            snap_epsilon: DEFAULT_SNAP_EPSILON,
        }
    }

    /// Set the correction rate using builder pattern.
    pub fn with_correction_rate(mut self, rate: f32) -> Self {
        self.correction_rate = rate;
        self
    }

    /// Set the snap distance using builder pattern.
    pub fn with_snap_epsilon(mut self, epsilon: f32) -> Self {
        self.snap_epsilon = epsilon;
        self
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Jump to `offset` without easing. Non-finite offsets are ignored.
    pub fn set_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.offset = offset;
        }
    }

    #[inline]
    pub fn tick_amount(&self) -> f32 {
        self.tick_amount
    }

    pub fn set_tick_amount(&mut self, amount: f32) {
        self.tick_amount = amount;
    }

    #[inline]
    pub fn correction_rate(&self) -> f32 {
        self.correction_rate
    }

    pub fn set_correction_rate(&mut self, rate: f32) {
        self.correction_rate = rate;
    }

    /// Scroll by whole wheel steps. Positive values move toward the end.
    pub fn scroll_by_ticks(&mut self, ticks: i32) {
        self.scroll_by(ticks as f32 * self.tick_amount);
    }

    /// Scroll by a raw distance, unclamped.
    pub fn scroll_by(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.offset += delta;
        tracing::trace!(target: targets::SCROLL, delta, offset = self.offset, "scrolled");
    }

    /// The resting offset for the current one: clamped into
    /// `[0, max(0, content_extent - viewport_height)]`.
    pub fn target(&self, content_extent: f32, viewport_height: f32) -> f32 {
        let max = (content_extent - viewport_height).max(0.0);
        self.offset.clamp(0.0, max)
    }

    /// Whether the offset currently lies outside its valid range.
    pub fn is_overscrolled(&self, content_extent: f32, viewport_height: f32) -> bool {
        self.offset != self.target(content_extent, viewport_height)
    }

    /// Advance overscroll correction by `dt` seconds.
    ///
    /// Returns `true` if the offset moved and the list needs a redraw. A zero
    /// or non-finite `dt` moves nothing. Once
    /// the offset is within the snap distance of its target it lands exactly
    /// on it, after which further ticks return `false`.
    pub fn tick(&mut self, dt: f32, content_extent: f32, viewport_height: f32) -> bool {
        let target = self.target(content_extent, viewport_height);
        if self.offset == target {
            return false;
        }

        let t = if dt.is_finite() {
            (dt * self.correction_rate).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let from = self.offset;
        self.offset += (target - self.offset) * t;

        if (self.offset - target).abs() < self.snap_epsilon {
            self.offset = target;
        }
        if self.offset == from {
            return false;
        }

        tracing::trace!(
            target: targets::SCROLL,
            from,
            to = self.offset,
            target,
            "overscroll correction"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_wheel_ticks() {
        let mut scroll = ScrollController::new(10.0);
        scroll.scroll_by_ticks(1);
        scroll.scroll_by_ticks(1);
        assert_eq!(scroll.offset(), 20.0);
        scroll.scroll_by_ticks(-3);
        assert_eq!(scroll.offset(), -10.0);
    }

    #[test]
    fn test_target() {
        let mut scroll = ScrollController::default();
        scroll.set_offset(-5.0);
        assert_eq!(scroll.target(500.0, 100.0), 0.0);

        scroll.set_offset(450.0);
        assert_eq!(scroll.target(500.0, 100.0), 400.0);

        // Content shorter than the viewport rests at the top
        scroll.set_offset(30.0);
        assert_eq!(scroll.target(80.0, 100.0), 0.0);

        scroll.set_offset(120.0);
        assert_eq!(scroll.target(500.0, 100.0), 120.0);
        assert!(!scroll.is_overscrolled(500.0, 100.0));
    }

    #[test]
    fn test_converges_from_negative_without_crossing() {
        let mut scroll = ScrollController::default();
        scroll.set_offset(-50.0);

        let mut frames = 0;
        while scroll.tick(FRAME, 500.0, 100.0) {
            assert!(scroll.offset() <= 0.0);
            frames += 1;
            assert!(frames < 1000, "did not settle");
        }
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn test_converges_from_past_end() {
        let mut scroll = ScrollController::default();
        scroll.set_offset(460.0);

        for _ in 0..1000 {
            if !scroll.tick(FRAME, 500.0, 100.0) {
                break;
            }
            assert!(scroll.offset() >= 400.0);
        }
        assert_eq!(scroll.offset(), 400.0);
    }

    #[test]
    fn test_rest_is_idempotent() {
        let mut scroll = ScrollController::default();
        scroll.set_offset(120.0);
        assert!(!scroll.tick(FRAME, 500.0, 100.0));
        assert!(!scroll.tick(FRAME, 500.0, 100.0));
        assert_eq!(scroll.offset(), 120.0);
    }

    #[test]
    fn test_large_step_lands_on_target() {
        let mut scroll = ScrollController::default();
        scroll.set_offset(-50.0);
        assert!(scroll.tick(1.0, 500.0, 100.0));
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut scroll = ScrollController::default();
        scroll.scroll_by(f32::NAN);
        scroll.set_offset(f32::INFINITY);
        assert_eq!(scroll.offset(), 0.0);
    }
}
