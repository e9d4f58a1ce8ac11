//! Tier 3: Fault rendering
//!
//! Conversion faults are rendered through a caller-owned message provider;
//! client-safe faults keep their message; anything else is stored as-is.

use fieldstate::{
    BindingMessageProvider, DefaultBindingMessages, Fault, FaultKind, FieldError,
    FieldMetadata, FieldStateStore,
};

/// French messages, to show the store never formats text itself.
struct French;

impl BindingMessageProvider for French {
    fn attempted_value_is_invalid(&self, attempted_value: &str, name: &str) -> String {
        format!("La valeur '{attempted_value}' n'est pas valide pour {name}.")
    }

    fn non_property_attempted_value_is_invalid(&self, attempted_value: &str) -> String {
        format!("La valeur '{attempted_value}' n'est pas valide.")
    }

    fn unknown_value_is_invalid(&self, name: &str) -> String {
        format!("La valeur fournie n'est pas valide pour {name}.")
    }

    fn non_property_unknown_value_is_invalid(&self) -> String {
        "La valeur fournie n'est pas valide.".to_string()
    }
}

fn first_error(store: &FieldStateStore, key: &str) -> FieldError {
    store.lookup(key).unwrap().errors()[0].clone()
}

#[test]
fn test_all_four_conversion_messages() {
    let mut store = FieldStateStore::new();
    store.set_value("bound_named", "abc", "abc").unwrap();
    store.set_value("bound_unnamed", "abc", "abc").unwrap();

    let named = FieldMetadata::new(&DefaultBindingMessages).display_name("Quantity");
    let unnamed = FieldMetadata::new(&DefaultBindingMessages);

    for (key, meta) in [
        ("bound_named", &named),
        ("bound_unnamed", &unnamed),
        ("absent_named", &named),
        ("absent_unnamed", &unnamed),
    ] {
        assert!(store
            .add_fault_with_metadata(key, Fault::format("Input string was not in a correct format."), meta)
            .unwrap());
    }

    assert_eq!(
        first_error(&store, "bound_named").message(),
        "The value 'abc' is not valid for Quantity."
    );
    assert_eq!(
        first_error(&store, "bound_unnamed").message(),
        "The value 'abc' is not valid."
    );
    assert_eq!(
        first_error(&store, "absent_named").message(),
        "The supplied value is invalid for Quantity."
    );
    assert_eq!(
        first_error(&store, "absent_unnamed").message(),
        "The supplied value is invalid."
    );
}

#[test]
fn test_custom_provider_and_property_name_fallback() {
    let mut store = FieldStateStore::new();
    store.set_value("Age", "999999999999", "999999999999").unwrap();

    let meta = FieldMetadata::new(&French).property_name("Age");
    store
        .add_fault_with_metadata("Age", Fault::overflow("Value was too large."), &meta)
        .unwrap();

    assert_eq!(
        first_error(&store, "age"),
        FieldError::Message("La valeur '999999999999' n'est pas valide pour Age.".to_string())
    );
}

#[test]
fn test_client_safe_faults_keep_message() {
    let mut store = FieldStateStore::new();
    let meta = FieldMetadata::new(&DefaultBindingMessages);

    store
        .add_fault("body", Fault::input_formatter("Unexpected end of JSON input."))
        .unwrap();
    store
        .add_fault_with_metadata("query.page", Fault::value_provider("page must be numeric"), &meta)
        .unwrap();

    assert_eq!(
        first_error(&store, "body"),
        FieldError::Message("Unexpected end of JSON input.".to_string())
    );
    assert_eq!(first_error(&store, "query.page").message(), "page must be numeric");
}

#[test]
fn test_other_faults_stored_verbatim() {
    let mut store = FieldStateStore::new();
    let meta = FieldMetadata::new(&DefaultBindingMessages).display_name("Payload");

    let fault = Fault::other("deserializer panicked").with_detail("at decode (decode.rs:42)");
    store
        .add_fault_with_metadata("payload", fault.clone(), &meta)
        .unwrap();
    store
        .add_fault("header", Fault::input_formatter(""))
        .unwrap();

    assert_eq!(first_error(&store, "payload"), FieldError::Fault(fault));
    let header = first_error(&store, "header");
    assert_eq!(header.fault().map(|f| f.kind), Some(FaultKind::InputFormatter));
    assert_eq!(store.error_count(), 2);
}

#[test]
fn test_recorded_errors_serialize_for_a_response() {
    let mut store = FieldStateStore::new();
    store.add_error("name", "required").unwrap();
    store.add_fault("id", Fault::other("boom")).unwrap();

    let payload: Vec<_> = store
        .iter()
        .map(|(key, entry)| serde_json::json!({ "key": key, "errors": entry.errors() }))
        .collect();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "key": "id", "errors": [{ "fault": { "kind": "other", "message": "boom" } }] },
            { "key": "name", "errors": [{ "message": "required" }] },
        ])
    );
}
