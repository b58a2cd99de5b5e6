//! Build-time validation across the standard kinds and custom schemas

use ferrum_tree::schema::definitions::vs;
use ferrum_tree::validation::{operation_outcome, reference_targets};
use ferrum_tree::{
    json, schema, validate_tree, validate_with, BindingMode, BindingStrength, Error, FieldDef,
    InMemoryTerminology, IssueCode, IssueSeverity, KindCategory, Node, NodeBuilder, NodeKind,
    PrimitiveType, Value, ValidationContext,
};
use std::sync::Arc;
mod test_support;

use test_support::{load_fixture, parse_fixture, strict};

const SAMPLE_VS: &str = "http://example.org/fhir/ValueSet/sample";

fn sample_kind(strength: BindingStrength) -> Arc<NodeKind> {
    Arc::new(
        NodeKind::define("Sample", KindCategory::Element)
            .field(FieldDef::primitive("category", PrimitiveType::Code).bound(strength, SAMPLE_VS))
            .build(),
    )
}

fn sample_context() -> ValidationContext {
    let terminology = InMemoryTerminology::new().with_value_set(SAMPLE_VS, ["a", "b"]);
    ValidationContext::new(Arc::new(terminology))
}

fn reference(literal: &str) -> Node {
    Node::builder("Reference")
        .unwrap()
        .set("reference", Value::string(literal))
        .unwrap()
        .build_with(&strict())
        .unwrap()
}

fn dose_form() -> Node {
    Node::builder("CodeableConcept")
        .unwrap()
        .set("text", Value::string("tablet"))
        .unwrap()
        .build_with(&strict())
        .unwrap()
}

fn manufactured_item() -> NodeBuilder {
    Node::builder("ManufacturedItemDefinition")
        .unwrap()
        .set("status", Value::code("active"))
        .unwrap()
        .set("manufacturedDoseForm", dose_form())
        .unwrap()
}

#[test]
fn test_missing_required_field() {
    let err = Node::builder("CodeSystem")
        .unwrap()
        .set("content", Value::code("complete"))
        .unwrap()
        .build_with(&strict())
        .unwrap_err();
    match err {
        Error::MissingRequiredField { path } => assert_eq!(path, "CodeSystem.status"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_required_list() {
    let err = Node::builder("MedicinalProduct")
        .unwrap()
        .build_with(&strict())
        .unwrap_err();
    assert!(matches!(err, Error::EmptyRequiredList { ref path } if path == "MedicinalProduct.name"));
}

#[test]
fn test_base_fields_are_checked_before_own_fields() {
    // `meta` (base) has the wrong type and `status` (own) is missing; the base field is reported.
    let err = Node::builder("CodeSystem")
        .unwrap()
        .set("meta", Value::string("not a Meta"))
        .unwrap()
        .build_with(&strict())
        .unwrap_err();
    match err {
        Error::InvalidFieldType {
            path,
            found,
            expected,
        } => {
            assert_eq!(path, "CodeSystem.meta");
            assert_eq!(found, "string");
            assert_eq!(expected, "Meta");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_choice_type() {
    let err = Node::builder("CodeSystem.concept.property")
        .unwrap()
        .set("code", Value::code("hex"))
        .unwrap()
        .set("value", Value::uri("http://example.org"))
        .unwrap()
        .build_with(&strict())
        .unwrap_err();
    match err {
        Error::InvalidChoiceType {
            path,
            found,
            allowed,
        } => {
            assert_eq!(path, "CodeSystem.concept.property.value");
            assert_eq!(found, "uri");
            assert!(allowed.contains("Coding"));
            assert!(allowed.contains("decimal"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_choice_accepts_each_declared_alternative() {
    for value in [
        Value::code("a"),
        Value::string("text"),
        Value::integer(3),
        Value::boolean(false),
        Value::date_time("2024-01-01"),
    ] {
        let node = Node::builder("CodeSystem.concept.property")
            .unwrap()
            .set("code", Value::code("p"))
            .unwrap()
            .set("value", value.clone())
            .unwrap()
            .build_with(&strict())
            .unwrap();
        assert_eq!(node.get("value"), Some(&value));
    }
}

#[test]
fn test_invalid_reference_target() {
    let err = manufactured_item()
        .add("manufacturer", [reference("Patient/p1")])
        .unwrap()
        .build_with(&strict())
        .unwrap_err();
    match err {
        Error::InvalidReferenceTarget {
            path,
            target,
            allowed,
        } => {
            assert_eq!(path, "ManufacturedItemDefinition.manufacturer[0]");
            assert_eq!(target, "Patient");
            assert_eq!(allowed, "Organization");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_absolute_reference_target_is_checked() {
    let err = manufactured_item()
        .add("manufacturer", [reference("http://example.org/fhir/Patient/p1")])
        .unwrap()
        .build_with(&strict())
        .unwrap_err();
    match err {
        Error::InvalidReferenceTarget { path, target, .. } => {
            assert_eq!(path, "ManufacturedItemDefinition.manufacturer[0]");
            assert_eq!(target, "Patient");
        }
        other => panic!("unexpected error: {other}"),
    }

    let node = manufactured_item()
        .add(
            "manufacturer",
            [reference("https://example.org/fhir/Organization/acme/_history/3")],
        )
        .unwrap()
        .build_with(&strict())
        .unwrap();
    assert_eq!(node.get_list("manufacturer").len(), 1);
}

#[test]
fn test_reference_checks_can_be_disabled() {
    let ctx = strict().with_reference_types(false);
    let node = manufactured_item()
        .add("manufacturer", [reference("Patient/p1")])
        .unwrap()
        .build_with(&ctx)
        .unwrap();
    assert_eq!(node.get_list("manufacturer").len(), 1);
}

#[test]
fn test_references_without_a_kind_are_accepted() {
    let node = manufactured_item()
        .add(
            "manufacturer",
            [
                reference("Organization/acme"),
                reference("#contained-org"),
                reference("urn:uuid:5f2b7c1e-0000-4000-8000-000000000001"),
            ],
        )
        .unwrap()
        .build_with(&strict())
        .unwrap();
    assert_eq!(node.get_list("manufacturer").len(), 3);
}

#[test]
fn test_typed_reference_is_checked() {
    let typed = Node::builder("Reference")
        .unwrap()
        .set(
            "type",
            Value::uri("http://hl7.org/fhir/StructureDefinition/Patient"),
        )
        .unwrap()
        .build_with(&strict())
        .unwrap();
    assert_eq!(reference_targets(&typed), vec!["Patient"]);

    let err = manufactured_item()
        .add("manufacturer", [typed])
        .unwrap()
        .build_with(&strict())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidReferenceTarget { ref target, .. } if target == "Patient"));
}

#[test]
fn test_choice_reference_targets() {
    let property = |value: Node| {
        Node::builder("ManufacturedItemDefinition.property")
            .unwrap()
            .set("type", dose_form())
            .unwrap()
            .set("value", value)
            .unwrap()
            .build_with(&strict())
    };

    assert!(property(reference("Binary/leaflet")).is_ok());
    let err = property(reference("Organization/acme")).unwrap_err();
    assert_eq!(err.path(), Some("ManufacturedItemDefinition.property.value"));
}

#[test]
fn test_required_binding_rejects_unknown_code() {
    let err = Node::builder("ConceptMap.group.element.target")
        .unwrap()
        .set("code", Value::code("x"))
        .unwrap()
        .set("equivalence", Value::code("same"))
        .unwrap()
        .build_with(&strict())
        .unwrap_err();
    match err {
        Error::InvalidCodedValue {
            path,
            code,
            value_set,
        } => {
            assert_eq!(path, "ConceptMap.group.element.target.equivalence");
            assert_eq!(code, "same");
            assert_eq!(value_set, vs::CONCEPT_MAP_EQUIVALENCE);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_custom_required_binding() {
    let kind = sample_kind(BindingStrength::Required);
    let ctx = sample_context();

    assert!(NodeBuilder::new(kind.clone())
        .set("category", Value::code("a"))
        .unwrap()
        .build_with(&ctx)
        .is_ok());

    let err = NodeBuilder::new(kind)
        .set("category", Value::code("z"))
        .unwrap()
        .build_with(&ctx)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCodedValue { ref code, .. } if code == "z"));
}

#[test]
fn test_extensible_binding_reports_without_blocking() {
    let ctx = sample_context();
    let node = NodeBuilder::new(sample_kind(BindingStrength::Extensible))
        .set("category", Value::code("z"))
        .unwrap()
        .build_with(&ctx)
        .unwrap();

    let issues = validate_with(&node, &ctx).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, IssueSeverity::Warning);
    assert_eq!(issues[0].code, IssueCode::CodeInvalid);
    assert_eq!(issues[0].location.as_deref(), Some("Sample.category"));
    assert!(issues[0].diagnostics.contains("extensible"));
}

#[test]
fn test_binding_modes() {
    let required = sample_kind(BindingStrength::Required);
    let extensible = sample_kind(BindingStrength::Extensible);

    let off = sample_context().with_bindings(BindingMode::Off);
    assert!(NodeBuilder::new(required.clone())
        .set("category", Value::code("z"))
        .unwrap()
        .build_with(&off)
        .is_ok());

    let required_only = sample_context().with_bindings(BindingMode::RequiredOnly);
    assert!(NodeBuilder::new(required)
        .set("category", Value::code("z"))
        .unwrap()
        .build_with(&required_only)
        .is_err());

    let node = NodeBuilder::new(extensible)
        .set("category", Value::code("z"))
        .unwrap()
        .build_with(&required_only)
        .unwrap();
    assert!(validate_with(&node, &required_only).unwrap().is_empty());
}

#[test]
fn test_empty_element_rejected() {
    let err = Node::builder("Coding")
        .unwrap()
        .build_with(&strict())
        .unwrap_err();
    assert!(matches!(err, Error::EmptyElement { ref path } if path == "Coding"));
}

#[test]
fn test_empty_resource_and_marker_kinds_allowed() {
    let resource = Arc::new(NodeKind::define("Basic", KindCategory::Resource).build());
    let node = NodeBuilder::new(resource).build_with(&strict()).unwrap();
    assert!(node.is_empty());

    let marker = Arc::new(
        NodeKind::define("Marker", KindCategory::Element)
            .allow_empty()
            .build(),
    );
    assert!(NodeBuilder::new(marker).build_with(&strict()).is_ok());
}

#[test]
fn test_disabled_context_builds_invalid_nodes() {
    let node = Node::builder("CodeSystem")
        .unwrap()
        .set("status", Value::code("final"))
        .unwrap()
        .build_with(&ValidationContext::disabled())
        .unwrap();
    assert_eq!(node.get_str("status"), Some("final"));

    // The node can still be checked after the fact.
    let err = validate_with(&node, &strict()).unwrap_err();
    assert!(matches!(err, Error::InvalidCodedValue { .. }));
}

#[test]
fn test_validate_tree_finds_nested_errors() {
    let ctx = ValidationContext::disabled();
    let node = json::parse_with(
        schema::standard(),
        &ctx,
        &load_fixture("manufactured-item-bad-reference.json"),
    )
    .unwrap();

    let err = validate_tree(&node, &strict()).unwrap_err();
    assert_eq!(err.path(), Some("ManufacturedItemDefinition.manufacturer[0]"));
}

#[test]
fn test_validate_tree_collects_nested_warnings() {
    let usage = Node::builder("Coding")
        .unwrap()
        .set("system", Value::uri("http://snomed.info/sct"))
        .unwrap()
        .set("code", Value::code("123456"))
        .unwrap()
        .build_with(&strict())
        .unwrap();
    let designation = Node::builder("CodeSystem.concept.designation")
        .unwrap()
        .set("use", usage)
        .unwrap()
        .set("value", Value::string("Rouge"))
        .unwrap()
        .build_with(&strict())
        .unwrap();
    let concept = Node::builder("CodeSystem.concept")
        .unwrap()
        .set("code", Value::code("red"))
        .unwrap()
        .add("designation", [designation])
        .unwrap()
        .build_with(&strict())
        .unwrap();
    let cs = Node::builder("CodeSystem")
        .unwrap()
        .set("status", Value::code("draft"))
        .unwrap()
        .set("content", Value::code("fragment"))
        .unwrap()
        .add("concept", [concept])
        .unwrap()
        .build_with(&strict())
        .unwrap();

    let issues = validate_tree(&cs, &strict()).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].location.as_deref(),
        Some("CodeSystem.concept.designation.use")
    );

    let outcome = operation_outcome(&issues);
    assert_eq!(outcome["issue"][0]["severity"], "warning");
    assert_eq!(outcome["issue"][0]["code"], "code-invalid");
}

#[test]
fn test_valid_fixtures_pass_tree_validation() {
    for name in [
        "codesystem-colors.json",
        "conceptmap-colors.json",
        "manufactured-item-tablet.json",
        "medicinal-product-aspirin.json",
    ] {
        let node = parse_fixture(name).unwrap_or_else(|e| panic!("{name}: {e}"));
        let issues = validate_tree(&node, &strict()).unwrap();
        assert!(
            issues.iter().all(|i| i.severity != IssueSeverity::Error),
            "{name}: {issues:?}"
        );
    }
}
