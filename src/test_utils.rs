//! Proptest strategies shared by unit tests.

use proptest::prelude::*;

use crate::value::RawParams;

/// Generates short lowercase keys.
pub(crate) fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,6}").expect("valid regex")
}

/// Generates arbitrary JSON trees of bounded depth.
pub(crate) fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(serde_json::Value::from),
        prop::string::string_regex("[a-z ]{0,8}")
            .expect("valid regex")
            .prop_map(serde_json::Value::String),
    ];

    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..4)
                .prop_map(|map| serde_json::Value::Object(map.into_iter().collect())),
        ]
    })
}

/// Generates a raw request mapping.
pub(crate) fn arb_raw_params() -> impl Strategy<Value = RawParams> {
    prop::collection::btree_map(arb_key(), arb_json(), 0..6)
        .prop_map(|map| map.into_iter().collect())
}
