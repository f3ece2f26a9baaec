//! Declarative whitelisting of untrusted request parameters.
//!
//! This crate keeps attacker-controlled mass assignment out of application
//! logic. Request parameters arrive as an arbitrarily nested mapping; the
//! application names exactly which keys and paths it accepts, and everything
//! else is dropped (or rejected, when configured to raise).
//!
//! # Core Types
//!
//! - [`Parameters`]: Untrusted mapping with `require`, `permit` and `permit_all`
//! - [`FilterSpec`] / [`Filter`]: The whitelist handed to `permit`
//! - [`Value`]: A parameter value; nested mappings are always `Parameters`
//! - [`IndifferentMap`] / [`AsKey`]: Key normalization shared by every lookup
//! - [`ParamsConfig`]: Per-application settings
//! - [`Error`]: `ParameterMissing` or `UnpermittedParameters`
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use strong_params::{Filter, Parameters};
//!
//! let params = Parameters::try_from(json!({
//!     "person": {
//!         "name": "Alice",
//!         "admin": true,
//!         "pets": [{"name": "Rex", "owner_id": 1}],
//!         "tags": ["a", "b"]
//!     }
//! }))
//! .unwrap();
//!
//! let person = params
//!     .require("person")
//!     .unwrap()
//!     .as_params()
//!     .unwrap()
//!     .permit([
//!         Filter::key("name"),
//!         Filter::nested("pets", ["name"]),
//!         Filter::any("tags"),
//!     ])
//!     .unwrap();
//!
//! assert!(person.is_permitted());
//! assert_eq!(
//!     person.to_json(),
//!     json!({"name": "Alice", "pets": [{"name": "Rex"}], "tags": ["a", "b"]})
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod filter;
mod indifferent;
mod key;
mod parameters;
mod value;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use config::ParamsConfig;
pub use error::{Error, ParameterMissing, UnpermittedParameters};
pub use filter::{Filter, FilterSpec};
pub use indifferent::IndifferentMap;
pub use key::{canonical_key, AsKey};
pub use parameters::{MarkPermitted, Parameters};
pub use value::{RawParams, Value};
