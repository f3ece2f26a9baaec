//! Extraction boundary trait for web integration.

use crate::config::ParamsConfig;
use crate::parameters::Parameters;
use crate::value::RawParams;

/// Exposes a framework request's decoded parameters.
///
/// Implementations only map framework types to a raw nested mapping. They do
/// not filter, validate or coerce values.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strong_params::web::ExtractParams;
/// use strong_params::{ParamsConfig, RawParams};
///
/// struct MyFrameworkRequest {
///     decoded: serde_json::Value,
/// }
///
/// impl ExtractParams for MyFrameworkRequest {
///     fn raw_params(&self) -> RawParams {
///         self.decoded.as_object().cloned().unwrap_or_default()
///     }
/// }
///
/// let req = MyFrameworkRequest { decoded: json!({"foo": "bar"}) };
/// let params = req.strong_params(&ParamsConfig::default());
/// assert!(params.contains_key("foo"));
/// assert!(!params.is_permitted());
/// ```
pub trait ExtractParams {
    /// Returns the request's parameters as a raw nested mapping.
    fn raw_params(&self) -> RawParams;

    /// Wraps the request's parameters for filtering.
    ///
    /// Each call builds a fresh, request-scoped [`Parameters`].
    fn strong_params(&self, config: &ParamsConfig) -> Parameters {
        config.build(self.raw_params())
    }
}
