//! Typed facades over parsed and hand-built resources

use ferrum_tree::resources::{
    CodeSystem, CodeSystemContentMode, CodeableConcept, Coding, Concept, ConceptMap,
    ConceptMapEquivalence, ConceptMapUnmappedMode, ConceptProperty, ConceptPropertyValue,
    Designation, Group, PropertyDefinition, PropertyType, PublicationStatus, SourceElement, Target,
    Unmapped,
};
use ferrum_tree::{Error, Node, ValidationContext};
mod test_support;

use test_support::{parse_fixture, strict};

#[test]
fn test_code_system_from_fixture() {
    let cs = CodeSystem::try_from(parse_fixture("codesystem-colors.json").unwrap()).unwrap();

    assert_eq!(cs.id(), Some("example-colors"));
    assert_eq!(cs.status(), Some(PublicationStatus::Active));
    assert_eq!(cs.content(), Some(CodeSystemContentMode::Complete));
    assert_eq!(cs.case_sensitive(), Some(true));
    assert_eq!(cs.count(), Some(3));

    let properties = cs.property();
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].property_type(), Some(PropertyType::String));

    let red = cs.find_concept("red").unwrap();
    assert_eq!(red.display(), Some("Red"));
    assert_eq!(red.designation()[0].value(), Some("Rot"));
    assert_eq!(
        red.property()[0].value(),
        Some(ConceptPropertyValue::String("#FF0000".to_string()))
    );

    let orange = cs.find_concept("orange").unwrap();
    assert_eq!(orange.display(), Some("Orange"));
    assert!(cs.concept().iter().all(|c| c.code() != Some("orange")));
}

#[test]
fn test_facade_rejects_other_kinds() {
    let node = parse_fixture("conceptmap-colors.json").unwrap();
    let err = CodeSystem::try_from(node).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("ConceptMap")));
}

#[test]
fn test_code_system_built_by_hand_matches_fixture_shape() {
    let hex = PropertyDefinition::builder()
        .code("hex")
        .description("Hex code")
        .property_type(PropertyType::String)
        .build_with(&strict())
        .unwrap();
    let red = Concept::builder()
        .code("red")
        .display("Red")
        .designation(
            Designation::builder()
                .language("de")
                .value("Rot")
                .build_with(&strict())
                .unwrap(),
        )
        .property(
            ConceptProperty::builder()
                .code("hex")
                .value(ConceptPropertyValue::String("#FF0000".to_string()))
                .build_with(&strict())
                .unwrap(),
        )
        .build_with(&strict())
        .unwrap();

    let cs = CodeSystem::builder()
        .id("example-colors")
        .status(PublicationStatus::Active)
        .content(CodeSystemContentMode::Complete)
        .property(hex)
        .concept(red)
        .build_with(&strict())
        .unwrap();

    let json = cs.to_json();
    assert_eq!(json["resourceType"], "CodeSystem");
    assert_eq!(json["property"][0]["type"], "string");
    assert_eq!(json["concept"][0]["designation"][0]["language"], "de");
    assert_eq!(json["concept"][0]["property"][0]["valueString"], "#FF0000");
}

#[test]
fn test_facade_to_builder_is_independent() {
    let cs = CodeSystem::builder()
        .status(PublicationStatus::Draft)
        .content(CodeSystemContentMode::Fragment)
        .concept(Concept::builder().code("a").build_with(&strict()).unwrap())
        .build_with(&strict())
        .unwrap();

    let published = cs
        .to_builder()
        .status(PublicationStatus::Active)
        .concepts([
            Concept::builder().code("b").build_with(&strict()).unwrap(),
            Concept::builder().code("c").build_with(&strict()).unwrap(),
        ])
        .build_with(&strict())
        .unwrap();

    assert_eq!(cs.status(), Some(PublicationStatus::Draft));
    assert_eq!(cs.concept().len(), 1);
    assert_eq!(published.status(), Some(PublicationStatus::Active));
    let codes: Vec<_> = published
        .concept()
        .iter()
        .filter_map(|c| c.code().map(String::from))
        .collect();
    assert_eq!(codes, vec!["b", "c"]);
    assert_ne!(cs, published);
}

#[test]
fn test_facade_build_reports_missing_fields() {
    let err = CodeSystem::builder()
        .url("http://example.org/cs")
        .status(PublicationStatus::Active)
        .build_with(&strict())
        .unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField { ref path } if path == "CodeSystem.content"));

    let err = Target::builder().code("x").build_with(&strict()).unwrap_err();
    assert_eq!(err.path(), Some("ConceptMap.group.element.target.equivalence"));
}

#[test]
fn test_concept_map_translate() {
    let cm = ConceptMap::try_from(parse_fixture("conceptmap-colors.json").unwrap()).unwrap();

    assert_eq!(cm.source(), Some("http://example.org/fhir/ValueSet/colors"));
    assert_eq!(cm.target(), Some("http://example.org/fhir/ValueSet/snomed-colors"));

    let targets = cm.translate("http://example.org/fhir/CodeSystem/colors", "red");
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].code(), Some("371240000"));
    assert_eq!(targets[0].equivalence(), Some(ConceptMapEquivalence::Equivalent));

    let wider = cm.translate("http://example.org/fhir/CodeSystem/colors", "warm");
    assert_eq!(wider[0].equivalence(), Some(ConceptMapEquivalence::Wider));
    assert_eq!(wider[0].comment(), Some("broader"));

    assert!(cm.translate("http://example.org/other", "red").is_empty());
    assert!(cm.translate("http://example.org/fhir/CodeSystem/colors", "blue").is_empty());

    let unmapped = cm.group()[0].unmapped().unwrap();
    assert_eq!(unmapped.mode(), Some(ConceptMapUnmappedMode::Fixed));
    assert_eq!(unmapped.code(), Some("unknown"));
}

#[test]
fn test_concept_map_built_by_hand() {
    let target = Target::builder()
        .code("B")
        .equivalence(ConceptMapEquivalence::Narrower)
        .build_with(&strict())
        .unwrap();
    let element = SourceElement::builder()
        .code("A")
        .target(target.clone())
        .build_with(&strict())
        .unwrap();
    let group = Group::builder()
        .source("http://example.org/a")
        .target("http://example.org/b")
        .element(element)
        .unmapped(Some(
            Unmapped::builder()
                .mode(ConceptMapUnmappedMode::Provided)
                .build_with(&strict())
                .unwrap(),
        ))
        .build_with(&strict())
        .unwrap();
    let cm = ConceptMap::builder()
        .status(PublicationStatus::Draft)
        .source_canonical("http://example.org/ValueSet/a")
        .group(group)
        .build_with(&strict())
        .unwrap();

    assert_eq!(cm.translate("http://example.org/a", "A"), vec![target]);
    assert_eq!(
        cm.to_json()["sourceCanonical"],
        "http://example.org/ValueSet/a"
    );
}

#[test]
fn test_group_requires_elements() {
    let err = Group::builder()
        .source("http://example.org/a")
        .build_with(&strict())
        .unwrap_err();
    assert!(matches!(err, Error::EmptyRequiredList { ref path } if path == "ConceptMap.group.element"));
}

#[test]
fn test_codeable_concept_lookup() {
    let concept = CodeableConcept::builder()
        .coding(
            Coding::builder()
                .system("http://snomed.info/sct")
                .code("371240000")
                .display("Red color")
                .build_with(&strict())
                .unwrap(),
        )
        .text("red")
        .build_with(&strict())
        .unwrap();

    assert!(concept.has_coding("http://snomed.info/sct", "371240000"));
    assert!(!concept.has_coding("http://loinc.org", "371240000"));
    assert_eq!(concept.coding()[0].display(), Some("Red color"));
}

#[test]
fn test_facades_are_values() {
    let a = Coding::builder().code("x").build_with(&strict()).unwrap();
    let b = Coding::builder().code("x").build_with(&strict()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());

    let node: Node = a.clone().into_node();
    assert_eq!(&node, b.as_node());
    assert_eq!(Coding::KIND, "Coding");
    assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::json!({ "code": "x" }));
}

#[test]
fn test_lenient_facade_build() {
    // Without validation, an incomplete CodeSystem can still be assembled.
    let cs = CodeSystem::builder()
        .url("http://example.org/cs")
        .build_with(&ValidationContext::disabled())
        .unwrap();
    assert_eq!(cs.status(), None);
    assert_eq!(cs.url(), Some("http://example.org/cs"));
}
