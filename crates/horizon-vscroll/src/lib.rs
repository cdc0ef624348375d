//! Horizon VScroll - a virtualized, template-driven list and grid control.
//!
//! This is the main umbrella crate that re-exports all public APIs.
//!
//! A [`VirtualScrollList`] draws an arbitrarily large, host-owned collection
//! of items through one shared [`Template`](template::Template). Only the
//! items inside the viewport are bound and drawn, so the cost of a frame
//! depends on the viewport, not on the collection.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_vscroll::prelude::*;
//! use horizon_vscroll::render::RecordingPainter;
//!
//! #[derive(FieldSource)]
//! struct Product {
//!     name: String,
//!     price: f32,
//! }
//!
//! let template = Template::new(
//!     TemplateNode::container("Row", Rect::new(0.0, 0.0, 160.0, 24.0))
//!         .with_child(TemplateNode::text("-name", Rect::new(0.0, 0.0, 100.0, 24.0), "{0}"))
//!         .with_child(TemplateNode::text("-price", Rect::new(100.0, 0.0, 60.0, 24.0), "${0:0.0}")),
//! );
//!
//! let mut list = VirtualScrollList::new(OperatingMode::Runtime)
//!     .with_template(Arc::new(template));
//! list.set_geometry(Rect::new(0.0, 0.0, 160.0, 240.0));
//! list.add_item(Item::record(Product { name: "Apple".into(), price: 1.5 }));
//!
//! let mut painter = RecordingPainter::new();
//! list.paint(&mut painter);
//! assert_eq!(painter.texts(), vec!["Apple", "$1.5"]);
//! ```
//!
//! # Frame loop
//!
//! The host drives the list from its own event loop:
//!
//! 1. [`set_geometry`](VirtualScrollList::set_geometry) when the list is resized
//! 2. [`handle_event`](VirtualScrollList::handle_event) for pointer input
//! 3. [`tick`](VirtualScrollList::tick) once per frame to ease overscroll back
//! 4. [`paint`](VirtualScrollList::paint) whenever a redraw was requested

pub use horizon_vscroll_core::*;
pub use horizon_vscroll_macros::*;

/// Geometry types and the draw-primitive interface.
pub mod render {
    pub use horizon_vscroll_render::*;
}

pub mod binding;
pub mod config;
pub mod error;
pub mod events;
pub mod prelude;
pub mod template;
pub mod view;

pub use config::{DiagnosticsConfig, DragBehavior, LayoutMode, ListConfig};
pub use error::{Result, VScrollError};
pub use events::{MouseButton, PointerEvent};
pub use view::{GridAlignment, OperatingMode, SharedItems, VirtualScrollList, shared_items};
