//! Core systems for Horizon VScroll.
//!
//! This crate provides the foundational pieces the virtual list is built on:
//!
//! - **Signal/Slot System**: Type-safe notification for selection and redraw
//! - **Values**: The [`Value`] variant produced by every field lookup
//! - **Field Lookup**: [`Item`], [`FieldSource`], [`DynamicObject`] and
//!   [`Reflect`] accessor tables for binding templates to heterogeneous data
//! - **Logging**: `tracing` target and span names per subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_vscroll_core::Signal;
//!
//! let item_selected = Signal::<Option<usize>>::new();
//!
//! let conn_id = item_selected.connect(|index| {
//!     println!("Selected: {:?}", index);
//! });
//!
//! item_selected.emit(Some(4));
//! item_selected.disconnect(conn_id);
//! ```
//!
//! # Field Lookup Example
//!
//! ```
//! use horizon_vscroll_core::{lookup, Item, Value};
//!
//! let item = Item::map([("name", Value::from("Apple")), ("price", Value::from(1.5))]);
//! assert_eq!(lookup(&item, "price"), Some(Value::Float(1.5)));
//! ```

pub mod field;
pub mod logging;
pub mod signal;
pub mod value;

pub use field::{
    lookup, DynamicObject, FieldAccessor, FieldSource, FieldTable, Getter, InstanceGetter, Item,
    Reflect, StaticGetter,
};
pub use signal::{ConnectionId, Signal};
pub use value::Value;
