//! Logging facilities for Horizon VScroll.
//!
//! Horizon VScroll uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_vscroll::binding=trace,horizon_vscroll=debug")
//!         .init();
//! }
//! ```
//!
//! The constants below name the targets and spans each subsystem logs under,
//! so filters can be written against them instead of string literals.

/// Span names used throughout Horizon VScroll for tracing.
pub mod span_names {
    /// One paint pass over the visible window.
    pub const PAINT: &str = "horizon_vscroll::paint";
    /// One frame-clock tick of the scroll controller.
    pub const TICK: &str = "horizon_vscroll::tick";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_vscroll_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_vscroll_core::signal";
    /// Scroll controller and overscroll correction.
    pub const SCROLL: &str = "horizon_vscroll::scroll";
    /// Draw orchestration.
    pub const DRAW: &str = "horizon_vscroll::draw";
    /// Template binding, field lookup and formatting.
    pub const BINDING: &str = "horizon_vscroll::binding";
    /// Pointer and wheel input.
    pub const INPUT: &str = "horizon_vscroll::input";
    /// Configuration and template loading.
    pub const CONFIG: &str = "horizon_vscroll::config";
}
