//! Named field lookup on heterogeneous items.
//!
//! Templates bind to fields by name without knowing the concrete type of the
//! item they are drawn for. An [`Item`] is one of several shapes and
//! [`lookup`] resolves a key against it in a fixed order:
//!
//! 1. [`Item::Map`]: key lookup in the map, missing keys resolve to `None`.
//! 2. [`Item::Object`]: the object's own [`DynamicObject::property`].
//! 3. [`Item::Record`]: the type's static [`FieldTable`], properties first,
//!    then fields. Each list may hold instance and associated (static)
//!    accessors.
//!
//! Accessor tables are usually generated with `#[derive(FieldSource)]` from
//! `horizon-vscroll-macros`, but they are plain statics and can be written by
//! hand:
//!
//! ```
//! use std::any::Any;
//! use horizon_vscroll_core::{FieldAccessor, FieldTable, Item, Reflect, Value, lookup};
//!
//! struct Fruit {
//!     name: String,
//! }
//!
//! fn fruit_name(obj: &dyn Any) -> Option<Value> {
//!     obj.downcast_ref::<Fruit>().map(|f| Value::from(&f.name))
//! }
//!
//! static FRUIT_ACCESSORS: [FieldAccessor; 1] = [FieldAccessor::instance("name", fruit_name)];
//! static FRUIT_FIELDS: FieldTable = FieldTable::new("Fruit", &[], &FRUIT_ACCESSORS);
//!
//! impl Reflect for Fruit {
//!     fn field_table(&self) -> &'static FieldTable {
//!         &FRUIT_FIELDS
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let item = Item::record(Fruit { name: "Apple".into() });
//! assert_eq!(lookup(&item, "name"), Some(Value::from("Apple")));
//! assert_eq!(lookup(&item, "price"), None);
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::logging::targets;
use crate::value::Value;

/// Anything that can resolve a named field to a [`Value`].
pub trait FieldSource {
    /// Resolve `key`, or `None` if this source has no such field.
    fn get(&self, key: &str) -> Option<Value>;
}

/// An item exposing a generic property-get capability.
///
/// Use this for items whose fields are only known at runtime, such as
/// script-backed objects or rows from a dynamic query.
pub trait DynamicObject: Send + Sync {
    /// Get the property named `key`.
    fn property(&self, key: &str) -> Option<Value>;
}

/// Getter reading a value off an instance.
pub type InstanceGetter = fn(&dyn Any) -> Option<Value>;

/// Getter reading a value that belongs to the type rather than an instance.
pub type StaticGetter = fn() -> Option<Value>;

/// How an accessor reads its value.
#[derive(Clone, Copy)]
pub enum Getter {
    /// Reads from the instance.
    Instance(InstanceGetter),
    /// Reads an associated (static) value.
    Static(StaticGetter),
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Getter::Instance(_) => f.write_str("Instance"),
            Getter::Static(_) => f.write_str("Static"),
        }
    }
}

/// A single named entry in a [`FieldTable`].
#[derive(Debug, Clone, Copy)]
pub struct FieldAccessor {
    /// The name templates bind to.
    pub name: &'static str,
    /// How the value is read.
    pub getter: Getter,
}

impl FieldAccessor {
    /// An accessor reading from the instance.
    pub const fn instance(name: &'static str, getter: InstanceGetter) -> Self {
        Self {
            name,
            getter: Getter::Instance(getter),
        }
    }

    /// An accessor reading an associated (static) value.
    pub const fn associated(name: &'static str, getter: StaticGetter) -> Self {
        Self {
            name,
            getter: Getter::Static(getter),
        }
    }

    /// Read the value for `obj`. Static accessors ignore `obj`.
    pub fn read(&self, obj: &dyn Any) -> Option<Value> {
        match self.getter {
            Getter::Instance(get) => get(obj),
            Getter::Static(get) => get(),
        }
    }

    /// Returns `true` if this accessor reads an associated value.
    pub fn is_static(&self) -> bool {
        matches!(self.getter, Getter::Static(_))
    }
}

/// The accessor table for one item type, resolved once per type.
#[derive(Debug)]
pub struct FieldTable {
    type_name: &'static str,
    properties: &'static [FieldAccessor],
    fields: &'static [FieldAccessor],
}

impl FieldTable {
    /// Create a table. Usable in `static` items.
    pub const fn new(
        type_name: &'static str,
        properties: &'static [FieldAccessor],
        fields: &'static [FieldAccessor],
    ) -> Self {
        Self {
            type_name,
            properties,
            fields,
        }
    }

    /// The name of the type this table describes.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Property accessors in lookup order.
    pub fn properties(&self) -> &'static [FieldAccessor] {
        self.properties
    }

    /// Field accessors in lookup order.
    pub fn fields(&self) -> &'static [FieldAccessor] {
        self.fields
    }

    /// Find the accessor for `key`, properties first.
    pub fn find(&self, key: &str) -> Option<&'static FieldAccessor> {
        self.properties
            .iter()
            .chain(self.fields.iter())
            .find(|accessor| accessor.name == key)
    }

    /// Returns `true` if some accessor is named `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Resolve `key` against `obj`.
    pub fn get(&self, obj: &dyn Any, key: &str) -> Option<Value> {
        self.find(key).and_then(|accessor| accessor.read(obj))
    }
}

/// A type with a pre-registered accessor table.
///
/// Implemented by `#[derive(FieldSource)]`.
pub trait Reflect: Any + Send + Sync {
    /// The accessor table shared by every instance of this type.
    fn field_table(&self) -> &'static FieldTable;

    /// Get this as `Any` so generated getters can downcast.
    fn as_any(&self) -> &dyn Any;
}

/// One record of the item collection.
#[derive(Clone)]
pub enum Item {
    /// A key/value map.
    Map(HashMap<String, Value>),
    /// An object with a generic property-get capability.
    Object(Arc<dyn DynamicObject>),
    /// A typed record with an accessor table.
    Record(Arc<dyn Reflect>),
    /// A bare value with no fields.
    Value(Value),
}

impl Item {
    /// Build a map item from key/value pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Item::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wrap a dynamic object.
    pub fn object<T: DynamicObject + 'static>(object: T) -> Self {
        Item::Object(Arc::new(object))
    }

    /// Wrap a typed record.
    pub fn record<T: Reflect>(record: T) -> Self {
        Item::Record(Arc::new(record))
    }

    /// A short name for the item shape, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Map(_) => "map",
            Item::Object(_) => "object",
            Item::Record(record) => record.field_table().type_name(),
            Item::Value(_) => "value",
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Item::Object(_) => f.write_str("Object(..)"),
            Item::Record(record) => f
                .debug_tuple("Record")
                .field(&record.field_table().type_name())
                .finish(),
            Item::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl FieldSource for Item {
    fn get(&self, key: &str) -> Option<Value> {
        lookup(self, key)
    }
}

impl FieldSource for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        HashMap::get(self, key).cloned()
    }
}

impl From<HashMap<String, Value>> for Item {
    fn from(map: HashMap<String, Value>) -> Self {
        Item::Map(map)
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        Item::Value(value)
    }
}

impl From<serde_json::Value> for Item {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Object(map) => {
                Item::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            other => Item::Value(Value::from(other)),
        }
    }
}

/// Resolve the field named `key` on `item`.
///
/// Returns `None` when the item has no such field. A miss is not an error:
/// the caller substitutes an empty value and keeps drawing.
pub fn lookup(item: &Item, key: &str) -> Option<Value> {
    let value = match item {
        Item::Map(map) => map.get(key).cloned(),
        Item::Object(object) => object.property(key),
        Item::Record(record) => record.field_table().get(record.as_any(), key),
        Item::Value(_) => None,
    };

    if value.is_none() {
        tracing::trace!(target: targets::BINDING, key, kind = item.kind(), "field not found");
    }
    value
}

static_assertions::assert_impl_all!(Item: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;

    struct Parcel {
        label: String,
        weight: f32,
    }

    impl Parcel {
        fn heavy(&self) -> bool {
            self.weight > 10.0
        }

        fn label(&self) -> String {
            format!("[{}]", self.label)
        }
    }

    fn parcel_label_field(obj: &dyn Any) -> Option<Value> {
        obj.downcast_ref::<Parcel>().map(|c| Value::from(&c.label))
    }

    fn parcel_label_property(obj: &dyn Any) -> Option<Value> {
        obj.downcast_ref::<Parcel>().map(|c| Value::from(c.label()))
    }

    fn parcel_weight(obj: &dyn Any) -> Option<Value> {
        obj.downcast_ref::<Parcel>().map(|c| Value::from(c.weight))
    }

    fn parcel_heavy(obj: &dyn Any) -> Option<Value> {
        obj.downcast_ref::<Parcel>().map(|c| Value::from(c.heavy()))
    }

    fn parcel_unit() -> Option<Value> {
        Some(Value::from("kg"))
    }

    static PARCEL_PROPERTIES: [FieldAccessor; 2] = [
        FieldAccessor::instance("label", parcel_label_property),
        FieldAccessor::instance("heavy", parcel_heavy),
    ];

    static PARCEL_ACCESSORS: [FieldAccessor; 3] = [
        FieldAccessor::instance("label", parcel_label_field),
        FieldAccessor::instance("weight", parcel_weight),
        FieldAccessor::associated("unit", parcel_unit),
    ];

    static PARCEL_FIELDS: FieldTable =
        FieldTable::new("Parcel", &PARCEL_PROPERTIES, &PARCEL_ACCESSORS);

    impl Reflect for Parcel {
        fn field_table(&self) -> &'static FieldTable {
            &PARCEL_FIELDS
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Script;

    impl DynamicObject for Script {
        fn property(&self, key: &str) -> Option<Value> {
            (key == "answer").then(|| Value::from(42))
        }
    }

    #[test]
    fn test_map_lookup() {
        let item = Item::map([("name", Value::from("Apple")), ("price", Value::from(1.5))]);
        assert_eq!(lookup(&item, "name"), Some(Value::from("Apple")));
        assert_eq!(lookup(&item, "price"), Some(Value::Float(1.5)));
        assert_eq!(lookup(&item, "color"), None);
    }

    #[test]
    fn test_dynamic_object_lookup() {
        let item = Item::object(Script);
        assert_eq!(lookup(&item, "answer"), Some(Value::Int(42)));
        assert_eq!(lookup(&item, "question"), None);
    }

    #[test]
    fn test_record_properties_before_fields() {
        let item = Item::record(Parcel {
            label: "tools".into(),
            weight: 12.5,
        });
        assert_eq!(lookup(&item, "label"), Some(Value::from("[tools]")));
        assert_eq!(lookup(&item, "heavy"), Some(Value::Bool(true)));
        assert_eq!(lookup(&item, "weight"), Some(Value::Float(12.5)));
        assert_eq!(lookup(&item, "unit"), Some(Value::from("kg")));
        assert_eq!(lookup(&item, "volume"), None);
        assert_eq!(item.kind(), "Parcel");
    }

    #[test]
    fn test_table_introspection() {
        assert!(PARCEL_FIELDS.contains("unit"));
        assert!(PARCEL_FIELDS.find("unit").is_some_and(FieldAccessor::is_static));
        assert_eq!(PARCEL_FIELDS.properties().len(), 2);
        assert_eq!(PARCEL_FIELDS.fields().len(), 3);
    }

    #[test]
    fn test_bare_value_has_no_fields() {
        let item = Item::from(Value::from(7));
        assert_eq!(lookup(&item, "value"), None);
    }

    #[test]
    fn test_item_from_json() {
        let item = Item::from(serde_json::json!({ "name": "Pear", "price": 2 }));
        assert_eq!(item.get("name"), Some(Value::from("Pear")));
        assert_eq!(item.get("price"), Some(Value::Int(2)));

        let scalar = Item::from(serde_json::json!(3));
        assert!(matches!(scalar, Item::Value(Value::Int(3))));
    }
}
