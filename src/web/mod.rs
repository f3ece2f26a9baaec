//! Web framework integration surface.
//!
//! This module is the single contract between an HTTP framework and the
//! filtering engine. A framework integration:
//! 1. Decodes the query string and body into a raw nested mapping
//! 2. Exposes it through [`ExtractParams`]
//! 3. Calls [`ExtractParams::strong_params`] with the application's
//!    [`ParamsConfig`](crate::ParamsConfig)
//! 4. Lets errors from `require` / `permit` propagate, translating them into
//!    error responses
//!
//! No framework types appear here. Decoding nested query syntax
//! (`user[name]=x`) stays with the framework.
//!
//! # Example Flow
//!
//! ```
//! use serde_json::json;
//! use strong_params::web::{ExtractParams, RequestAdapter};
//! use strong_params::{Error, ParamsConfig};
//!
//! fn create_user(
//!     req: &impl ExtractParams,
//!     config: &ParamsConfig,
//! ) -> Result<serde_json::Value, Error> {
//!     let params = req.strong_params(config);
//!     let user = params.require("user")?;
//!     let permitted = match user.as_params() {
//!         Some(user) => user.permit(["name", "email"])?,
//!         None => return Err(strong_params::ParameterMissing::new("user").into()),
//!     };
//!     Ok(permitted.to_json())
//! }
//!
//! let mut adapter = RequestAdapter::new("req-1".to_string());
//! adapter
//!     .set_json_body(r#"{"user": {"name": "alice", "admin": true}}"#)
//!     .unwrap();
//!
//! let user = create_user(&adapter, &ParamsConfig::default()).unwrap();
//! assert_eq!(user, json!({"name": "alice"}));
//! ```

mod adapter;
mod extract;

pub use adapter::RequestAdapter;
pub use extract::ExtractParams;
