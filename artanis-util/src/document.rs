//! Conversion of reflective structured messages into JSON documents.
//!
//! A [`Message`] describes its own fields through [`FieldDescriptor`]s and
//! hands out values through a small reflection API, in the manner of protobuf
//! descriptors. [`to_document`] walks that schema and builds a
//! [`serde_json::Value`]:
//!
//! | Field type | Document value |
//! |------------|----------------|
//! | `int32`, `uint32` | number |
//! | `int64`, `uint64` | decimal string |
//! | `string`, `bytes` | string (bytes decoded lossily as UTF-8) |
//! | message | nested object |
//! | anything else | omitted; `null` per element when repeated |
//!
//! 64-bit integers become strings because consumers that store numbers as
//! IEEE doubles only represent integers up to 2^53 exactly.

use serde_json::{Map, Value};

/// The declared type of a message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// Boolean
    Bool,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Enumeration, carried as its numeric value
    Enum,
    /// UTF-8 text
    String,
    /// Arbitrary bytes
    Bytes,
    /// Nested message
    Message,
}

impl FieldType {
    /// Returns true if [`to_document`] emits values of this type.
    #[must_use]
    pub const fn is_converted(self) -> bool {
        matches!(
            self,
            Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::String
                | Self::Bytes
                | Self::Message
        )
    }
}

/// Describes one field of a message schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Field name, used as the document key
    pub name: &'static str,
    /// Declared type
    pub field_type: FieldType,
    /// Whether the field holds a sequence of values
    pub repeated: bool,
}

impl FieldDescriptor {
    /// Describes a singular field.
    #[must_use]
    pub const fn singular(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            repeated: false,
        }
    }

    /// Describes a repeated field.
    #[must_use]
    pub const fn repeated(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            repeated: true,
        }
    }
}

/// A single field value read through reflection.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// Signed 32-bit integer
    Int32(i32),
    /// Unsigned 32-bit integer
    UInt32(u32),
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 64-bit integer
    UInt64(u64),
    /// Boolean
    Bool(bool),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// Enumeration number
    Enum(i32),
    /// UTF-8 text
    String(&'a str),
    /// Arbitrary bytes
    Bytes(&'a [u8]),
    /// Nested message
    Message(&'a dyn Message),
}

/// A structured message that exposes its schema and values by reflection.
///
/// Field indexes refer to positions in [`fields`](Self::fields).
pub trait Message {
    /// Returns the message schema.
    fn fields(&self) -> &[FieldDescriptor];

    /// Returns true if the singular field at `index` is set.
    fn has_field(&self, index: usize) -> bool;

    /// Returns the number of elements of the repeated field at `index`.
    fn field_size(&self, index: usize) -> usize;

    /// Returns the value of the singular field at `index`.
    fn get(&self, index: usize) -> Option<FieldValue<'_>>;

    /// Returns element `element` of the repeated field at `index`.
    fn get_repeated(&self, index: usize, element: usize) -> Option<FieldValue<'_>>;

    /// Returns the encoded size of the message; `0` means it carries no data.
    fn byte_size(&self) -> usize;
}

/// Converts a message into a JSON object.
///
/// Unset singular fields, empty repeated fields and empty nested messages
/// are left out of the object. Inside a repeated field an empty nested
/// message becomes `null`, keeping element positions intact; a non-empty
/// repeated field of an unconverted type becomes an array of `null`s.
///
/// # Examples
///
/// ```
/// use artanis_util::{FieldDescriptor, FieldType, FieldValue, Message, to_document};
/// use serde_json::json;
///
/// struct Counter {
///     id: i64,
/// }
///
/// const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::singular("id", FieldType::Int64)];
///
/// impl Message for Counter {
///     fn fields(&self) -> &[FieldDescriptor] { FIELDS }
///     fn has_field(&self, _: usize) -> bool { true }
///     fn field_size(&self, _: usize) -> usize { 0 }
///     fn get(&self, _: usize) -> Option<FieldValue<'_>> { Some(FieldValue::Int64(self.id)) }
///     fn get_repeated(&self, _: usize, _: usize) -> Option<FieldValue<'_>> { None }
///     fn byte_size(&self) -> usize { 8 }
/// }
///
/// let doc = to_document(&Counter { id: 9_007_199_254_740_993 });
/// assert_eq!(doc, json!({ "id": "9007199254740993" }));
/// ```
#[must_use]
pub fn to_document(message: &dyn Message) -> Value {
    let mut object = Map::new();

    for (index, field) in message.fields().iter().enumerate() {
        let converted = field.field_type.is_converted();

        if field.repeated {
            let size = message.field_size(index);
            if size == 0 {
                continue;
            }
            let items = (0..size)
                .map(|element| {
                    if !converted {
                        return Value::Null;
                    }
                    message
                        .get_repeated(index, element)
                        .and_then(|value| convert_value(field, value))
                        .unwrap_or(Value::Null)
                })
                .collect();
            object.insert(field.name.to_string(), Value::Array(items));
            continue;
        }

        if !converted || !message.has_field(index) {
            continue;
        }

        if let Some(value) = message.get(index).and_then(|value| convert_value(field, value)) {
            object.insert(field.name.to_string(), value);
        }
    }

    Value::Object(object)
}

/// Converts one value, or returns `None` if it should be left out.
fn convert_value(field: &FieldDescriptor, value: FieldValue<'_>) -> Option<Value> {
    let converted = match (field.field_type, value) {
        (FieldType::Int32, FieldValue::Int32(v)) => Value::from(v),
        (FieldType::UInt32, FieldValue::UInt32(v)) => Value::from(v),
        (FieldType::Int64, FieldValue::Int64(v)) => Value::String(v.to_string()),
        (FieldType::UInt64, FieldValue::UInt64(v)) => Value::String(v.to_string()),
        (FieldType::String, FieldValue::String(s)) => Value::String(s.to_string()),
        (FieldType::Bytes, FieldValue::Bytes(b)) => {
            Value::String(String::from_utf8_lossy(b).into_owned())
        }
        (FieldType::Message, FieldValue::Message(nested)) => {
            if nested.byte_size() == 0 {
                return None;
            }
            to_document(nested)
        }
        (declared, _) => {
            tracing::warn!(
                field = field.name,
                ?declared,
                "field value does not match its declared type; skipping"
            );
            return None;
        }
    };
    Some(converted)
}
