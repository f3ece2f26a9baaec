//! Integration tests for the web adapter.
//!
//! These tests drive the full flow a framework integration follows: build a
//! `RequestAdapter`, wrap its parameters, then `require` / `permit` inside a
//! handler whose errors map to response statuses.

use serde_json::json;
use strong_params::web::{ExtractParams, RequestAdapter};
use strong_params::{Error, ParamsConfig};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn status_for(result: Result<(), Error>) -> u16 {
    match result {
        Ok(()) => 200,
        Err(Error::ParameterMissing(_)) | Err(Error::UnpermittedParameters(_)) => 400,
    }
}

// GET /root
fn root_handler(req: &RequestAdapter, config: &ParamsConfig) -> Result<(), Error> {
    req.strong_params(config).permit("foo")?;
    Ok(())
}

// GET /nested
fn nested_handler(req: &RequestAdapter, config: &ParamsConfig) -> Result<(), Error> {
    let params = req.strong_params(config);
    let foo = params.require("foo")?;
    if let Some(foo) = foo.as_params() {
        foo.permit(["bar", "baz"])?;
    }
    Ok(())
}

fn strict() -> ParamsConfig {
    ParamsConfig::new().raise_on_unpermitted(true)
}

#[test]
fn missing_required_parameter_is_rejected() {
    init_tracing();
    let adapter = RequestAdapter::new("req-nested-1".to_string());

    let result = nested_handler(&adapter, &ParamsConfig::default());
    assert!(matches!(result, Err(Error::ParameterMissing(ref e)) if e.param() == "foo"));
}

#[test]
fn present_required_parameter_is_accepted() {
    init_tracing();
    let mut adapter = RequestAdapter::new("req-nested-2".to_string());
    adapter.add_query_param("foo", json!({"bar": "bar"}));

    assert_eq!(status_for(nested_handler(&adapter, &strict())), 200);
    assert_eq!(status_for(nested_handler(&adapter, &ParamsConfig::default())), 200);
}

#[test]
fn permitted_parameters_pass() {
    init_tracing();
    let mut adapter = RequestAdapter::new("req-root-1".to_string());
    adapter.add_query_param("foo", json!("foo"));

    assert_eq!(status_for(root_handler(&adapter, &strict())), 200);
}

#[test]
fn unpermitted_parameters_rejected_when_strict() {
    init_tracing();
    let mut adapter = RequestAdapter::new("req-root-2".to_string());
    adapter.add_query_param("bar", json!("bar"));

    let result = root_handler(&adapter, &strict());
    assert!(matches!(result, Err(Error::UnpermittedParameters(ref e)) if e.params() == ["bar"]));
    assert_eq!(status_for(root_handler(&adapter, &strict())), 400);
}

#[test]
fn unpermitted_parameters_dropped_when_lenient() {
    init_tracing();
    let mut adapter = RequestAdapter::new("req-root-3".to_string());
    adapter.add_query_param("bar", json!("bar"));

    assert_eq!(status_for(root_handler(&adapter, &ParamsConfig::default())), 200);
}

#[test]
fn parameters_as_arrays_are_permitted() {
    init_tracing();
    let mut adapter = RequestAdapter::new("req-root-4".to_string());
    adapter.add_query_param("foo", json!(["foo1", "foo2", "foo3"]));

    assert_eq!(status_for(root_handler(&adapter, &strict())), 200);

    let permitted = adapter.strong_params(&strict()).permit("foo").unwrap();
    assert_eq!(permitted.to_json(), json!({"foo": ["foo1", "foo2", "foo3"]}));
}

#[test]
fn json_body_flows_through_filtering() {
    init_tracing();
    let mut adapter = RequestAdapter::new("req-body-1".to_string());
    adapter
        .set_json_body(r#"{"foo": {"bar": 1, "baz": [1, 2], "qux": "dropped"}}"#)
        .unwrap();

    let params = adapter.strong_params(&ParamsConfig::default());
    let permitted = params
        .require("foo")
        .unwrap()
        .as_params()
        .unwrap()
        .permit(json!(["bar", {"baz": []}]))
        .unwrap();

    assert_eq!(permitted.to_json(), json!({"bar": 1, "baz": [1, 2]}));
}
