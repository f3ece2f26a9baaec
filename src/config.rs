//! Per-application parameter settings.

use crate::parameters::Parameters;
use crate::value::RawParams;

/// Settings applied to every [`Parameters`] built for a request.
///
/// Defaults to dropping unpermitted keys silently.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strong_params::{Error, ParamsConfig};
///
/// let config = ParamsConfig::new().raise_on_unpermitted(true);
/// let raw = json!({"foo": 1, "bar": 2}).as_object().cloned().unwrap();
///
/// let err = config.build(raw).permit("foo").unwrap_err();
/// assert!(matches!(err, Error::UnpermittedParameters(_)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamsConfig {
    raise_on_unpermitted: bool,
}

impl ParamsConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether `permit` fails when top-level keys are left unpermitted.
    pub fn raise_on_unpermitted(mut self, raise: bool) -> Self {
        self.raise_on_unpermitted = raise;
        self
    }

    /// Returns true if `permit` fails on unpermitted keys.
    pub fn raises_on_unpermitted(&self) -> bool {
        self.raise_on_unpermitted
    }

    /// Wraps a raw request mapping with these settings.
    pub fn build(&self, raw: RawParams) -> Parameters {
        Parameters::with_options(raw, self.raise_on_unpermitted)
    }
}
