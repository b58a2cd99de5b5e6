//! Reading resources from FHIR JSON and writing them back canonically

use ferrum_tree::{json, schema, Error, Node, ValidationContext};
use serde_json::json;
mod test_support;

use test_support::{load_fixture, parse_fixture, strict};

#[test]
fn test_fixtures_round_trip() {
    for name in [
        "codesystem-colors.json",
        "conceptmap-colors.json",
        "manufactured-item-tablet.json",
        "medicinal-product-aspirin.json",
    ] {
        let input = load_fixture(name);
        let node = parse_fixture(name).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(node.to_json(), input, "{name}");
    }
}

#[test]
fn test_reparsed_output_is_structurally_equal() {
    let node = parse_fixture("codesystem-colors.json").unwrap();
    let again = json::parse_with(schema::standard(), &strict(), &node.to_json()).unwrap();
    assert_eq!(node, again);
    assert_eq!(node.hash_code(), again.hash_code());
}

#[test]
fn test_output_uses_declared_field_order() {
    let input = json!({
        "status": "draft",
        "content": "example",
        "name": "Reordered",
        "id": "reordered",
        "resourceType": "CodeSystem"
    });
    let node = json::parse_with(schema::standard(), &strict(), &input).unwrap();
    let output = node.to_json();
    let keys: Vec<&str> = output
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["resourceType", "id", "name", "status", "content"]);
}

#[test]
fn test_null_list_entry() {
    let err = parse_fixture("codesystem-null-concept.json").unwrap_err();
    match err {
        Error::NullListElement { path, index } => {
            assert_eq!(path, "CodeSystem.concept");
            assert_eq!(index, 1);
        }
        other => panic!("unexpected error: {other}"),
    }

    // Nulls cannot be frozen into a node even when validation is off.
    let err = json::parse_with(
        schema::standard(),
        &ValidationContext::disabled(),
        &load_fixture("codesystem-null-concept.json"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::NullListElement { .. }));
}

#[test]
fn test_missing_status() {
    let err = parse_fixture("codesystem-missing-status.json").unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField { ref path } if path == "CodeSystem.status"));
}

#[test]
fn test_nested_errors_propagate() {
    let err = parse_fixture("conceptmap-bad-equivalence.json").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.path(),
        Some("ConceptMap.group.element.target.equivalence")
    );

    let lenient = json::parse_with(
        schema::standard(),
        &ValidationContext::disabled(),
        &load_fixture("conceptmap-bad-equivalence.json"),
    )
    .unwrap();
    assert_eq!(lenient.kind_name(), "ConceptMap");
}

#[test]
fn test_unknown_resource_type() {
    let err = json::parse_with(
        schema::standard(),
        &strict(),
        &json!({ "resourceType": "Spaceship" }),
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnknownKind(ref name) if name == "Spaceship"));
}

#[test]
fn test_root_must_be_a_resource() {
    let err = json::parse_with(
        schema::standard(),
        &strict(),
        &json!({ "resourceType": "Coding", "code": "a" }),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));

    let err = json::parse_with(schema::standard(), &strict(), &json!(["CodeSystem"])).unwrap_err();
    assert_eq!(err.path(), Some("$"));
}

#[test]
fn test_shape_mismatches() {
    let scalar_as_array = json!({
        "resourceType": "CodeSystem",
        "status": ["draft"],
        "content": "example"
    });
    let err = json::parse_with(schema::standard(), &strict(), &scalar_as_array).unwrap_err();
    assert_eq!(err.path(), Some("CodeSystem.status"));

    let list_as_object = json!({
        "resourceType": "CodeSystem",
        "status": "draft",
        "content": "example",
        "concept": { "code": "a" }
    });
    let err = json::parse_with(schema::standard(), &strict(), &list_as_object).unwrap_err();
    assert_eq!(err.path(), Some("CodeSystem.concept"));

    let null_scalar = json!({
        "resourceType": "CodeSystem",
        "status": null,
        "content": "example"
    });
    assert!(matches!(
        json::parse_with(schema::standard(), &strict(), &null_scalar),
        Err(Error::Parse { .. })
    ));
}

#[test]
fn test_lexical_errors_carry_the_element_path() {
    let input = json!({
        "resourceType": "CodeSystem",
        "status": "draft",
        "content": "example",
        "date": "yesterday"
    });
    let err = json::parse_with(schema::standard(), &strict(), &input).unwrap_err();
    match err {
        Error::Parse { path, message } => {
            assert_eq!(path, "CodeSystem.date");
            assert!(message.contains("yesterday"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_choice_suffix_selects_the_alternative() {
    let input = json!({
        "code": "weight",
        "valueDecimal": 12.5
    });
    let node = json::parse_node(schema::standard(), &strict(), "CodeSystem.concept.property", &input)
        .unwrap();
    assert_eq!(node.get("value").map(|v| v.type_name()), Some("decimal"));
    assert_eq!(node.to_json(), input);

    let wrong = json!({ "code": "weight", "valueQuantity": { "value": 1 } });
    let err = json::parse_node(schema::standard(), &strict(), "CodeSystem.concept.property", &wrong)
        .unwrap_err();
    match err {
        Error::InvalidChoiceType { path, found, .. } => {
            assert_eq!(path, "CodeSystem.concept.property.value");
            assert_eq!(found, "Quantity");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_choice_field_given_twice() {
    let input = json!({
        "code": "hex",
        "valueString": "#FF0000",
        "valueBoolean": true
    });
    let err = json::parse_node(schema::standard(), &strict(), "CodeSystem.concept.property", &input)
        .unwrap_err();
    match err {
        Error::Parse { path, message } => {
            assert_eq!(path, "CodeSystem.concept.property.value");
            assert!(message.contains("more than one value"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_decimal_precision_survives_round_trip() {
    let text = r#"{"code":"weight","valueDecimal":1.50}"#;
    let input: serde_json::Value = serde_json::from_str(text).unwrap();
    let node = json::parse_node(schema::standard(), &strict(), "CodeSystem.concept.property", &input)
        .unwrap();
    assert_eq!(serde_json::to_string(&node.to_json()).unwrap(), text);
}

#[test]
fn test_contained_resources() {
    let input = json!({
        "resourceType": "CodeSystem",
        "id": "with-contained",
        "contained": [
            {
                "resourceType": "ConceptMap",
                "id": "inner",
                "status": "draft"
            }
        ],
        "status": "active",
        "content": "not-present"
    });
    let node = json::parse_with(schema::standard(), &strict(), &input).unwrap();
    let contained: Vec<&Node> = node.get_nodes("contained").collect();
    assert_eq!(contained.len(), 1);
    assert_eq!(contained[0].kind_name(), "ConceptMap");
    assert_eq!(node.to_json(), input);
}

#[test]
fn test_parse_str_and_serialize() {
    let text = r#"{"resourceType":"ConceptMap","id":"m","status":"retired"}"#;
    let node = json::parse_str(text).unwrap();
    assert_eq!(serde_json::to_string(&node).unwrap(), text);

    assert!(matches!(json::parse_str("{not json"), Err(Error::Json(_))));
}
