//! Mass assignment demonstration.
//!
//! This example shows the typical request flow:
//! 1. Decode the request into a raw mapping
//! 2. Require the resource key
//! 3. Permit only the attributes the handler accepts
//! 4. Deserialize the permitted mapping into a typed struct
//!
//! Run with: `cargo run --example mass_assignment`

use std::error::Error as StdError;

use serde::Deserialize;
use serde_json::json;
use strong_params::web::{ExtractParams, RequestAdapter};
use strong_params::{Filter, ParameterMissing, ParamsConfig};

#[derive(Debug, Deserialize)]
struct NewUser {
    name: String,
    email: String,
    #[serde(default)]
    tags: Vec<String>,
}

fn create_user(
    adapter: &RequestAdapter,
    config: &ParamsConfig,
) -> Result<NewUser, Box<dyn StdError>> {
    let params = adapter.strong_params(config);
    let user = params
        .require("user")?
        .as_params()
        .ok_or_else(|| ParameterMissing::new("user"))?;

    let permitted = user.permit([
        Filter::key("name"),
        Filter::key("email"),
        Filter::any("tags"),
    ])?;

    Ok(serde_json::from_value(permitted.to_json())?)
}

fn report(result: Result<NewUser, Box<dyn StdError>>) {
    match result {
        Ok(user) => println!(
            "created {} <{}> with tags {:?}",
            user.name, user.email, user.tags
        ),
        Err(e) => println!("rejected: {e}"),
    }
}

fn main() {
    let body = json!({
        "user": {
            "name": "Alice",
            "email": "alice@example.com",
            "admin": true,
            "tags": ["staff"]
        }
    });

    let mut adapter = RequestAdapter::new("req-0001".to_string());
    adapter.add_query_param("utm_source", json!("newsletter"));
    if let Err(e) = adapter.set_json_body(&body.to_string()) {
        println!("invalid body: {e}");
        return;
    }

    println!("=== Lenient configuration ===");
    report(create_user(&adapter, &ParamsConfig::default()));
    println!("(admin flag dropped)");

    println!("\n=== Strict configuration ===");
    let strict = ParamsConfig::new().raise_on_unpermitted(true);
    report(create_user(&adapter, &strict));

    println!("\n=== Missing resource ===");
    let empty = RequestAdapter::new("req-0002".to_string());
    report(create_user(&empty, &ParamsConfig::default()));
}
