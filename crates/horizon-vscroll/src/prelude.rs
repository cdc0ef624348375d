//! Prelude module for Horizon VScroll.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_vscroll::prelude::*;
//! ```
//!
//! This provides access to:
//! - The list itself (`VirtualScrollList`, `OperatingMode`, `shared_items`)
//! - Templates (`Template`, `TemplateNode`)
//! - Item data (`Item`, `Value`, `FieldSource`)
//! - Geometry types (`Point`, `Size`, `Rect`, `Color`)

// ============================================================================
// The List
// ============================================================================

pub use crate::view::{OperatingMode, SharedItems, VirtualScrollList, shared_items};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::{DragBehavior, LayoutMode, ListConfig};
pub use crate::view::GridAlignment;

// ============================================================================
// Templates
// ============================================================================

pub use crate::template::{Template, TemplateNode, Theme};

// ============================================================================
// Item Data
// ============================================================================

pub use crate::{DynamicObject, FieldSource, Item, Value};

// ============================================================================
// Signals and Input
// ============================================================================

pub use crate::events::{MouseButton, PointerEvent};
pub use crate::Signal;

// ============================================================================
// Geometry and Drawing
// ============================================================================

pub use crate::render::{Color, Painter, Point, Rect, Size};
