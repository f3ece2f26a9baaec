//! Filter specifications accepted by [`Parameters::permit`](crate::Parameters::permit).
//!
//! A filter spec is parsed once at the call boundary into a flat sequence of
//! [`Filter`] variants. The recursive descent in `permit` then only matches on
//! those variants and never re-inspects caller literals.

use crate::key::{canonical_key, AsKey};

/// One element of a filter specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Permit this key verbatim if present.
    Scalar(String),
    /// Permit this key's value as-is, with no further filtering.
    ///
    /// Written `{"key": []}` in a JSON literal.
    Any(String),
    /// Descend into this key's value and apply `spec` to it.
    ///
    /// An empty `spec` names nothing, so the nested result is empty.
    Nested {
        /// The key to descend into
        key: String,
        /// The filter applied to the nested mapping, or to each mapping of a
        /// nested sequence
        spec: FilterSpec,
    },
}

impl Filter {
    /// Permits `key` verbatim.
    pub fn key(key: impl AsKey) -> Self {
        Filter::Scalar(canonical_key(key))
    }

    /// Permits `key` filtered through `spec`.
    pub fn nested(key: impl AsKey, spec: impl Into<FilterSpec>) -> Self {
        Filter::Nested {
            key: canonical_key(key),
            spec: spec.into(),
        }
    }

    /// Permits `key` with no filtering of its substructure.
    ///
    /// Use this for sequences of scalars or trusted substructures.
    pub fn any(key: impl AsKey) -> Self {
        Filter::Any(canonical_key(key))
    }

    /// The key this filter names.
    pub fn name(&self) -> &str {
        match self {
            Filter::Scalar(key) | Filter::Any(key) | Filter::Nested { key, .. } => key,
        }
    }
}

/// An ordered list of [`Filter`]s.
///
/// # Examples
///
/// Built from variants:
///
/// ```
/// use strong_params::{Filter, FilterSpec};
///
/// let spec = FilterSpec::from(vec![
///     Filter::key("id"),
///     Filter::nested("model", vec![Filter::key("key"), Filter::any("tags")]),
/// ]);
/// assert_eq!(spec.len(), 2);
/// ```
///
/// Or parsed from a JSON literal, where strings are keys, objects are nested
/// filters and nested arrays are flattened:
///
/// ```
/// use serde_json::json;
/// use strong_params::{Filter, FilterSpec};
///
/// let spec = FilterSpec::from(json!(["id", ["name"], {"model": ["key"], "tags": []}]));
/// assert_eq!(spec.len(), 4);
/// assert_eq!(spec.filters()[3], Filter::any("tags"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    filters: Vec<Filter>,
}

impl FilterSpec {
    /// Creates an empty spec.
    ///
    /// Permitting with an empty spec keeps nothing, at the top level and when
    /// nested. Use [`Filter::any`] to keep a value unfiltered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    pub fn push(&mut self, filter: impl Into<Filter>) {
        self.filters.push(filter.into());
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, filter: impl Into<Filter>) -> Self {
        self.push(filter);
        self
    }

    /// Returns the filters in order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if the spec holds no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns true if the spec contains a pass-through entry (`key: []`) for `key`.
    pub(crate) fn passes_through(&self, key: &str) -> bool {
        self.filters
            .iter()
            .any(|f| matches!(f, Filter::Any(k) if k == key))
    }

    fn extend_from_json(&mut self, literal: serde_json::Value) {
        match literal {
            serde_json::Value::String(key) => self.filters.push(Filter::Scalar(key)),
            serde_json::Value::Number(n) => self.filters.push(Filter::Scalar(n.to_string())),
            serde_json::Value::Array(items) => {
                for item in items {
                    self.extend_from_json(item);
                }
            }
            serde_json::Value::Object(pairs) => {
                for (key, nested) in pairs {
                    let filter = match nested {
                        serde_json::Value::Array(items) if items.is_empty() => Filter::Any(key),
                        nested => Filter::Nested {
                            key,
                            spec: FilterSpec::from(nested),
                        },
                    };
                    self.filters.push(filter);
                }
            }
            other => {
                tracing::debug!(literal = %other, "ignoring filter literal that names no key");
            }
        }
    }
}

impl From<serde_json::Value> for FilterSpec {
    fn from(literal: serde_json::Value) -> Self {
        let mut spec = FilterSpec::new();
        spec.extend_from_json(literal);
        spec
    }
}

impl From<Vec<Filter>> for FilterSpec {
    fn from(filters: Vec<Filter>) -> Self {
        Self { filters }
    }
}

impl<const N: usize> From<[Filter; N]> for FilterSpec {
    fn from(filters: [Filter; N]) -> Self {
        Self {
            filters: filters.into(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for FilterSpec {
    fn from(keys: [&str; N]) -> Self {
        keys.into_iter().map(Filter::key).collect()
    }
}

impl From<Filter> for FilterSpec {
    fn from(filter: Filter) -> Self {
        Self {
            filters: vec![filter],
        }
    }
}

impl From<&str> for FilterSpec {
    fn from(key: &str) -> Self {
        Filter::key(key).into()
    }
}

impl From<String> for FilterSpec {
    fn from(key: String) -> Self {
        Filter::Scalar(key).into()
    }
}

impl From<&str> for Filter {
    fn from(key: &str) -> Self {
        Filter::key(key)
    }
}

impl From<String> for Filter {
    fn from(key: String) -> Self {
        Filter::Scalar(key)
    }
}

impl FromIterator<Filter> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

/// Nested specs passed as sequences flatten into their parent.
impl FromIterator<FilterSpec> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = FilterSpec>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().flat_map(|spec| spec.filters).collect(),
        }
    }
}
