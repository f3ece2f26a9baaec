//! The filtering container and its `require` / `permit` protocol.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, ParameterMissing, UnpermittedParameters};
use crate::filter::{Filter, FilterSpec};
use crate::indifferent::IndifferentMap;
use crate::key::AsKey;
use crate::value::{RawParams, Slot, Value};

/// Capability of being marked permitted, recursively.
///
/// Implemented by [`Parameters`] and by sequences of values, which forward
/// the mark to every nested mapping they contain.
pub trait MarkPermitted {
    /// Marks this value and everything nested in it as permitted.
    fn mark_permitted(&mut self);
}

/// An untrusted parameter mapping that hands out only whitelisted data.
///
/// `Parameters` wraps a nested mapping decoded from a request. Nested
/// mappings are themselves `Parameters`, so [`require`](Self::require) and
/// [`permit`](Self::permit) chain at any depth. Keys are accessed
/// indifferently through [`AsKey`].
///
/// [`permit`](Self::permit) never mutates the receiver: it builds a new,
/// permitted `Parameters` holding only the paths named by the filter spec.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strong_params::Parameters;
///
/// let params = Parameters::try_from(json!({
///     "id": "1234",
///     "admin": true,
///     "model": {"key": "value", "sub_model": {"sub_key": "sub_value", "x": 1}}
/// }))
/// .unwrap();
///
/// let permitted = params
///     .permit(json!(["id", {"model": ["key", {"sub_model": ["sub_key"]}]}]))
///     .expect("non-raising parameters never fail to permit");
///
/// assert!(permitted.is_permitted());
/// assert!(!permitted.contains_key("admin"));
/// assert_eq!(
///     permitted.to_json(),
///     json!({"id": "1234", "model": {"key": "value", "sub_model": {"sub_key": "sub_value"}}})
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    entries: IndifferentMap<Slot>,
    permitted: bool,
    raise_on_unpermitted: bool,
}

impl Parameters {
    /// Wraps a raw mapping. Unpermitted keys are silently dropped by `permit`.
    pub fn new(raw: RawParams) -> Self {
        Self::with_options(raw, false)
    }

    /// Wraps a raw mapping, choosing whether `permit` fails on unpermitted keys.
    ///
    /// Nested mappings are wrapped immediately and share the flag. Nested
    /// sequences are converted on first access.
    pub fn with_options(raw: RawParams, raise_on_unpermitted: bool) -> Self {
        let entries = raw
            .into_iter()
            .map(|(key, value)| (key, Slot::from_raw(value, raise_on_unpermitted)))
            .collect();

        Self {
            entries,
            permitted: false,
            raise_on_unpermitted,
        }
    }

    fn empty_like(&self) -> Self {
        Self {
            entries: IndifferentMap::new(),
            permitted: false,
            raise_on_unpermitted: self.raise_on_unpermitted,
        }
    }

    /// Returns true once the mapping has been produced by `permit` or marked
    /// with [`permit_all`](Self::permit_all).
    pub fn is_permitted(&self) -> bool {
        self.permitted
    }

    /// Returns true if `permit` fails when keys are left unpermitted.
    pub fn raise_on_unpermitted(&self) -> bool {
        self.raise_on_unpermitted
    }

    /// Returns the value under `key`, converting nested sequences on first access.
    pub fn get(&self, key: impl AsKey) -> Option<&Value> {
        let raise = self.raise_on_unpermitted;
        self.entries.get(key).map(|slot| slot.get(raise))
    }

    /// Returns the value under `key` mutably.
    pub fn get_mut(&mut self, key: impl AsKey) -> Option<&mut Value> {
        let raise = self.raise_on_unpermitted;
        self.entries.get_mut(key)?.get_mut(raise)
    }

    /// Returns true if `key` is present, even when its value is null.
    pub fn contains_key(&self, key: impl AsKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    ///
    /// Nested mappings in `value` adopt this mapping's raise flag.
    pub fn insert(&mut self, key: impl AsKey, value: impl Into<Value>) -> Option<Value> {
        let raise = self.raise_on_unpermitted;
        let mut value = value.into();
        value.inherit_raise(raise);
        self.entries
            .insert(key, Slot::ready(value))
            .map(|old| old.into_value(raise))
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: impl AsKey) -> Option<Value> {
        let raise = self.raise_on_unpermitted;
        self.entries.remove(key).map(|slot| slot.into_value(raise))
    }

    /// Returns a new, unpermitted mapping with only the requested keys that
    /// are present.
    pub fn slice<K: AsKey>(&self, keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            entries: self.entries.slice(keys),
            permitted: false,
            raise_on_unpermitted: self.raise_on_unpermitted,
        }
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys()
    }

    /// Iterates over entries in insertion order, converting lazily stored
    /// sequences as they are reached.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        let raise = self.raise_on_unpermitted;
        self.entries.iter().map(move |(key, slot)| (key, slot.get(raise)))
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value under `key` if it is present and not blank.
    ///
    /// Null, empty strings, empty sequences and empty mappings count as
    /// missing; `false` and numbers are present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterMissing`] carrying the key otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use strong_params::{Error, Parameters};
    ///
    /// let params = Parameters::try_from(json!({"user": {"name": "alice"}, "q": ""})).unwrap();
    ///
    /// let user = params.require("user").unwrap();
    /// assert!(user.as_params().is_some());
    ///
    /// let err = params.require("q").unwrap_err();
    /// assert!(matches!(err, Error::ParameterMissing(ref m) if m.param() == "q"));
    /// ```
    pub fn require(&self, key: impl AsKey) -> Result<&Value, Error> {
        let key = key.as_key();
        match self.get(&*key) {
            Some(value) if !value.is_blank() => Ok(value),
            _ => {
                tracing::debug!(param = %key, "required parameter is missing or empty");
                Err(ParameterMissing::new(key.into_owned()).into())
            }
        }
    }

    /// Returns a new permitted mapping holding only the data named by `filters`.
    ///
    /// Scalar filters copy the named value as-is. Nested filters descend into
    /// a mapping, or into every mapping of a sequence, and filter it
    /// recursively. [`Filter::any`] (`{"key": []}` in a literal) copies the
    /// value without filtering; any other nested spec that names nothing
    /// yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnpermittedParameters`] if this mapping was built to
    /// raise on unpermitted keys and the filters leave some key uncovered.
    pub fn permit(&self, filters: impl Into<FilterSpec>) -> Result<Parameters, Error> {
        self.permit_spec(&filters.into())
    }

    fn permit_spec(&self, spec: &FilterSpec) -> Result<Parameters, Error> {
        let mut params = self.empty_like();

        for filter in spec.filters() {
            match filter {
                Filter::Scalar(key) => self.permitted_scalar_filter(&mut params, key),
                Filter::Any(key) => self.pass_through_filter(&mut params, key),
                Filter::Nested { key, spec } => self.hash_filter(&mut params, key, spec)?,
            }
        }

        self.unpermitted_parameters(&params)?;

        params.permit_all();
        Ok(params)
    }

    fn permitted_scalar_filter(&self, params: &mut Parameters, key: &str) {
        if let Some(value) = self.get(key) {
            params.entries.insert(key, Slot::ready(value.clone()));
        }
    }

    fn pass_through_filter(&self, params: &mut Parameters, key: &str) {
        if let Some(value) = self.get(key).filter(|value| !value.is_falsy()) {
            params.entries.insert(key, Slot::ready(value.clone()));
        }
    }

    fn hash_filter(
        &self,
        params: &mut Parameters,
        key: &str,
        spec: &FilterSpec,
    ) -> Result<(), Error> {
        let value = match self.get(key) {
            Some(value) if !value.is_falsy() => value,
            _ => return Ok(()),
        };

        match value {
            Value::Array(items) => {
                let mut filtered = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    match item {
                        Value::Params(nested) => {
                            filtered.push(Value::Params(nested.permit_spec(spec)?));
                        }
                        other if spec.passes_through(&idx.to_string()) => {
                            filtered.push(other.clone());
                        }
                        _ => {}
                    }
                }
                params.entries.insert(key, Slot::ready(Value::Array(filtered)));
            }
            Value::Params(nested) => {
                let permitted = nested.permit_spec(spec)?;
                params.entries.insert(key, Slot::ready(Value::Params(permitted)));
            }
            _ => {
                tracing::debug!(param = key, "dropping scalar value under a nested filter");
            }
        }

        Ok(())
    }

    fn unpermitted_keys(&self, params: &Parameters) -> Vec<String> {
        self.keys()
            .filter(|key| !params.contains_key(*key))
            .map(str::to_string)
            .collect()
    }

    fn unpermitted_parameters(&self, params: &Parameters) -> Result<(), Error> {
        let unpermitted = self.unpermitted_keys(params);
        if unpermitted.is_empty() {
            return Ok(());
        }

        if self.raise_on_unpermitted {
            tracing::warn!(unpermitted = ?unpermitted, "found unpermitted parameters");
            return Err(UnpermittedParameters::new(unpermitted).into());
        }

        tracing::debug!(unpermitted = ?unpermitted, "dropping unpermitted parameters");
        Ok(())
    }

    /// Marks this mapping and every nested mapping as permitted, bypassing
    /// filtering entirely.
    ///
    /// Only call this on data that is trusted wholesale.
    pub fn permit_all(&mut self) -> &mut Self {
        let raise = self.raise_on_unpermitted;
        for slot in self.entries.values_mut() {
            if let Some(markable) = slot.get_mut(raise).and_then(|v| v.as_markable_mut()) {
                markable.mark_permitted();
            }
        }

        self.permitted = true;
        self
    }

    /// Converts the mapping back into a plain JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.to_json()))
                .collect(),
        )
    }

    pub(crate) fn inherit_raise(&mut self, raise_on_unpermitted: bool) {
        self.raise_on_unpermitted = raise_on_unpermitted;
        for slot in self.entries.values_mut() {
            // Pending sequences pick the flag up when they are converted.
            if slot.is_pending() {
                continue;
            }
            if let Some(value) = slot.get_mut(raise_on_unpermitted) {
                value.inherit_raise(raise_on_unpermitted);
            }
        }
    }
}

impl MarkPermitted for Parameters {
    fn mark_permitted(&mut self) {
        self.permit_all();
    }
}

impl MarkPermitted for [Value] {
    fn mark_permitted(&mut self) {
        for value in self {
            if let Some(markable) = value.as_markable_mut() {
                markable.mark_permitted();
            }
        }
    }
}

impl MarkPermitted for Vec<Value> {
    fn mark_permitted(&mut self) {
        self.as_mut_slice().mark_permitted();
    }
}

impl Value {
    /// Returns the value as a permit-markable, if it is a mapping or a sequence.
    pub fn as_markable_mut(&mut self) -> Option<&mut dyn MarkPermitted> {
        match self {
            Value::Params(params) => Some(params as &mut dyn MarkPermitted),
            Value::Array(items) => Some(items as &mut dyn MarkPermitted),
            _ => None,
        }
    }
}

/// Compares contents only, ignoring key order and flags.
impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl From<RawParams> for Parameters {
    fn from(raw: RawParams) -> Self {
        Self::new(raw)
    }
}

/// Fails with the original value when it is not a JSON object.
impl TryFrom<serde_json::Value> for Parameters {
    type Error = serde_json::Value;

    fn try_from(raw: serde_json::Value) -> Result<Self, Self::Error> {
        match raw {
            serde_json::Value::Object(map) => Ok(Self::new(map)),
            other => Err(other),
        }
    }
}

impl<K: AsKey, V: Into<Value>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::default();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
