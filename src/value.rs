//! Values held by [`Parameters`], and the lazily converted slot that stores them.

use std::cell::{OnceCell, RefCell};
use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Number;

use crate::key::AsKey;
use crate::parameters::Parameters;

/// A raw, untrusted nested mapping as decoded from a query string, form body
/// or JSON body.
pub type RawParams = serde_json::Map<String, serde_json::Value>;

/// A parameter value.
///
/// Nested mappings are always represented as [`Parameters`], so `permit` and
/// `require` can be chained at any depth without manual conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(Number),
    /// A string.
    String(String),
    /// A sequence of values.
    Array(Vec<Value>),
    /// A nested mapping.
    Params(Parameters),
}

impl Value {
    /// Converts a raw value, wrapping every mapping it contains as
    /// [`Parameters`] carrying the given raise flag.
    pub(crate) fn from_raw(raw: serde_json::Value, raise_on_unpermitted: bool) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| Value::from_raw(item, raise_on_unpermitted))
                    .collect(),
            ),
            serde_json::Value::Object(map) => {
                Value::Params(Parameters::with_options(map, raise_on_unpermitted))
            }
        }
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for `Null` and `false`.
    ///
    /// Falsy values are skipped by nested filters.
    pub fn is_falsy(&self) -> bool {
        matches!(self, Value::Null | Value::Bool(false))
    }

    /// Returns true if the value is null or an empty string, sequence or mapping.
    ///
    /// `false` and numbers are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Params(params) => params.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    /// Returns true if the value is a nested mapping.
    pub fn is_hash_like(&self) -> bool {
        matches!(self, Value::Params(_))
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number as `i64`, if it is representable.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the number as `u64`, if it is representable.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    /// Returns the number as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the elements, if this is a sequence.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested mapping, if this is one.
    pub fn as_params(&self) -> Option<&Parameters> {
        match self {
            Value::Params(params) => Some(params),
            _ => None,
        }
    }

    /// Returns the nested mapping mutably, if this is one.
    pub fn as_params_mut(&mut self) -> Option<&mut Parameters> {
        match self {
            Value::Params(params) => Some(params),
            _ => None,
        }
    }

    /// Looks up `key` in a nested mapping.
    ///
    /// Returns `None` when the key is absent or this value is not a mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use strong_params::Parameters;
    ///
    /// let params = Parameters::try_from(json!({"user": {"name": "alice"}})).unwrap();
    /// let name = params.get("user").and_then(|u| u.get("name"));
    /// assert_eq!(name.and_then(|v| v.as_str()), Some("alice"));
    /// ```
    pub fn get(&self, key: impl AsKey) -> Option<&Value> {
        self.as_params()?.get(key)
    }

    /// Converts the value back into a plain JSON tree.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Params(params) => params.to_json(),
        }
    }

    /// Propagates the raise flag into every nested mapping.
    pub(crate) fn inherit_raise(&mut self, raise_on_unpermitted: bool) {
        match self {
            Value::Params(params) => params.inherit_raise(raise_on_unpermitted),
            Value::Array(items) => {
                for item in items {
                    item.inherit_raise(raise_on_unpermitted);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Params(params) => params.serialize(serializer),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        Value::from_raw(raw, false)
    }
}

impl From<Parameters> for Value {
    fn from(params: Parameters) -> Self {
        Value::Params(params)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

/// Storage cell for one entry of a [`Parameters`] map.
///
/// Raw sequences are kept unconverted until the entry is first read. The
/// conversion result is memoized, so every later read sees the same instance.
#[derive(Clone)]
pub(crate) struct Slot {
    pending: RefCell<Option<serde_json::Value>>,
    value: OnceCell<Value>,
}

impl Slot {
    /// A slot holding an already converted value.
    pub(crate) fn ready(value: Value) -> Self {
        Self {
            pending: RefCell::new(None),
            value: OnceCell::from(value),
        }
    }

    /// A slot that converts `raw` on first access.
    pub(crate) fn pending(raw: serde_json::Value) -> Self {
        Self {
            pending: RefCell::new(Some(raw)),
            value: OnceCell::new(),
        }
    }

    /// Stores a raw value: mappings convert eagerly, sequences lazily.
    pub(crate) fn from_raw(raw: serde_json::Value, raise_on_unpermitted: bool) -> Self {
        match raw {
            serde_json::Value::Array(_) => Self::pending(raw),
            other => Self::ready(Value::from_raw(other, raise_on_unpermitted)),
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.value.get().is_none()
    }

    /// Returns the converted value, converting on first access.
    pub(crate) fn get(&self, raise_on_unpermitted: bool) -> &Value {
        self.value.get_or_init(|| {
            let raw = self
                .pending
                .borrow_mut()
                .take()
                .unwrap_or(serde_json::Value::Null);
            Value::from_raw(raw, raise_on_unpermitted)
        })
    }

    /// Returns the converted value mutably, converting on first access.
    pub(crate) fn get_mut(&mut self, raise_on_unpermitted: bool) -> Option<&mut Value> {
        self.get(raise_on_unpermitted);
        self.value.get_mut()
    }

    /// Consumes the slot, converting if still pending.
    pub(crate) fn into_value(self, raise_on_unpermitted: bool) -> Value {
        match self.value.into_inner() {
            Some(value) => value,
            None => {
                let raw = self
                    .pending
                    .into_inner()
                    .unwrap_or(serde_json::Value::Null);
                Value::from_raw(raw, raise_on_unpermitted)
            }
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => fmt::Debug::fmt(value, f),
            None => f
                .debug_tuple("Pending")
                .field(&*self.pending.borrow())
                .finish(),
        }
    }
}
