//! The virtual list and its layout, scrolling, hit-testing and drawing.
//!
//! [`VirtualScrollList`] ties the pieces together. Each piece is also usable
//! on its own:
//!
//! - [`geometry`]: item size, column count, content extent and the visible window
//! - [`alignment`]: horizontal placement of the grid block
//! - [`hit_test`]: pointer position to item index
//! - [`scroll`]: scroll offset with eased overscroll correction
//! - [`draw`]: the paint pass
//! - [`mode`]: runtime versus designer preview behavior

pub mod alignment;
pub mod draw;
pub mod geometry;
pub mod mode;
pub mod scroll;

mod list;

pub use alignment::GridAlignment;
pub use draw::{DrawContext, DrawStats};
pub use geometry::LayoutMetrics;
pub use list::{SharedItems, VirtualScrollList, shared_items};
pub use mode::{ModeStrategy, OperatingMode, PreviewStrategy, RuntimeStrategy};
pub use scroll::ScrollController;
