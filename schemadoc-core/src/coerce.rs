use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};

/// A plain structured record whose declared fields make up its JSON form.
///
/// Coercing a record keeps only the top-level keys listed in `FIELDS`
/// (serialized names), in that order. Use [`impl_record!`](crate::impl_record)
/// to declare the list.
pub trait Record: Serialize {
    const FIELDS: &'static [&'static str];
}

/// Declare the field list of a [`Record`] type.
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Point { x: i64, y: i64 }
///
/// schemadoc_core::impl_record!(Point { x, y });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::coerce::Record for $ty {
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];
        }
    };
}

/// Object-safe view of a [`Record`].
pub trait RecordValue: Send {
    fn declared_fields(&self) -> Result<Map<String, Value>, CoerceError>;
}

impl<T: Record + Send> RecordValue for T {
    fn declared_fields(&self) -> Result<Map<String, Value>, CoerceError> {
        let mut all = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            other => return Err(CoerceError::NotAnObject(kind_of(&other))),
        };
        Ok(T::FIELDS
            .iter()
            .filter_map(|field| all.remove(*field).map(|value| (field.to_string(), value)))
            .collect())
    }
}

/// Object-safe view of a validation model instance.
pub trait ModelValue: Send {
    /// Canonical dictionary form of the model.
    fn to_dict(&self) -> Result<Value, CoerceError>;
}

impl<T: Serialize + JsonSchema + Send> ModelValue for T {
    fn to_dict(&self) -> Result<Value, CoerceError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A handler result before it is turned into a JSON body.
pub enum Payload {
    Record(Box<dyn RecordValue>),
    Model(Box<dyn ModelValue>),
    Plain(Value),
}

impl Payload {
    pub fn record<R: Record + Send + 'static>(record: R) -> Self {
        Payload::Record(Box::new(record))
    }

    pub fn model<M: Serialize + JsonSchema + Send + 'static>(model: M) -> Self {
        Payload::Model(Box::new(model))
    }

    pub fn plain(value: impl Into<Value>) -> Self {
        Payload::Plain(value.into())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Plain(value)
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Record(_) => f.write_str("Payload::Record(..)"),
            Payload::Model(_) => f.write_str("Payload::Model(..)"),
            Payload::Plain(value) => write!(f, "Payload::Plain({value})"),
        }
    }
}

/// Normalize a handler result to a plain serializable value.
///
/// Records become their declared-field mapping, models their canonical
/// dictionary; plain values are returned unchanged.
pub fn coerce(payload: Payload) -> Result<Value, CoerceError> {
    match payload {
        Payload::Record(record) => record.declared_fields().map(Value::Object),
        Payload::Model(model) => model.to_dict(),
        Payload::Plain(value) => Ok(value),
    }
}

/// Error raised when a handler result cannot be serialized.
#[derive(Debug)]
pub enum CoerceError {
    Serialize(serde_json::Error),
    /// A record serialized to something other than a JSON object.
    NotAnObject(&'static str),
}

impl std::fmt::Display for CoerceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoerceError::Serialize(err) => write!(f, "failed to serialize handler result: {err}"),
            CoerceError::NotAnObject(kind) => {
                write!(f, "record serialized to {kind}, expected an object")
            }
        }
    }
}

impl std::error::Error for CoerceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoerceError::Serialize(err) => Some(err),
            CoerceError::NotAnObject(_) => None,
        }
    }
}

impl From<serde_json::Error> for CoerceError {
    fn from(err: serde_json::Error) -> Self {
        CoerceError::Serialize(err)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
