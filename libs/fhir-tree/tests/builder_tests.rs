//! Builder semantics: shape checks, immutability, equality and hashing

use ferrum_tree::{Error, Node, NodeBuilder, Value, ValidationContext};
use std::collections::HashSet;
mod test_support;

use test_support::strict;

fn coding(system: &str, code: &str) -> Node {
    Node::builder("Coding")
        .unwrap()
        .set("system", Value::uri(system))
        .unwrap()
        .set("code", Value::code(code))
        .unwrap()
        .build_with(&strict())
        .unwrap()
}

#[test]
fn test_setter_rejects_unknown_field() {
    let err = Node::builder("Coding")
        .unwrap()
        .set("colour", Value::string("red"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("colour")));
}

#[test]
fn test_setter_rejects_wrong_shape() {
    let err = Node::builder("CodeableConcept")
        .unwrap()
        .set("coding", coding("http://example.org", "a"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("CodeableConcept.coding")));

    let err = Node::builder("Coding")
        .unwrap()
        .add("code", [Value::code("a")])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_replace_with_null_collection_fails_immediately() {
    let err = Node::builder("CodeableConcept")
        .unwrap()
        .replace::<Vec<Node>, _>("coding", None)
        .unwrap_err();
    match err {
        Error::InvalidArgument(msg) => assert!(msg.contains("CodeableConcept.coding")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_replace_discards_previous_entries() {
    let concept = Node::builder("CodeableConcept")
        .unwrap()
        .add("coding", [coding("http://a", "1"), coding("http://a", "2")])
        .unwrap()
        .replace("coding", Some([coding("http://b", "3")]))
        .unwrap()
        .build_with(&strict())
        .unwrap();

    let codes: Vec<_> = concept
        .get_nodes("coding")
        .filter_map(|c| c.get_str("code"))
        .collect();
    assert_eq!(codes, vec!["3"]);
}

#[test]
fn test_null_list_entry_rejected_even_without_validation() {
    for ctx in [strict(), ValidationContext::disabled()] {
        let err = Node::builder("CodeableConcept")
            .unwrap()
            .add_nullable(
                "coding",
                [Some(Value::Node(coding("http://a", "1"))), None],
            )
            .unwrap()
            .build_with(&ctx)
            .unwrap_err();
        match err {
            Error::NullListElement { path, index } => {
                assert_eq!(path, "CodeableConcept.coding");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn test_to_builder_leaves_original_untouched() {
    let original = coding("http://example.org", "a");
    let changed = original
        .to_builder()
        .set("code", Value::code("b"))
        .unwrap()
        .build_with(&strict())
        .unwrap();

    assert_eq!(original.get_str("code"), Some("a"));
    assert_eq!(changed.get_str("code"), Some("b"));
    assert_eq!(changed.get_str("system"), Some("http://example.org"));
    assert_ne!(original, changed);
}

#[test]
fn test_builder_reuse_does_not_alias_built_nodes() {
    let builder = Node::builder("Coding")
        .unwrap()
        .set("code", Value::code("a"))
        .unwrap();
    let first = builder.clone().build_with(&strict()).unwrap();
    let second = builder
        .set("code", Value::code("b"))
        .unwrap()
        .build_with(&strict())
        .unwrap();

    assert_eq!(first.get_str("code"), Some("a"));
    assert_eq!(second.get_str("code"), Some("b"));
}

#[test]
fn test_structural_equality_and_hash() {
    let a = coding("http://example.org", "a");
    let b = coding("http://example.org", "a");
    let c = coding("http://example.org", "c");

    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());
    assert_eq!(a.hash_code(), a.hash_code());
    assert_ne!(a, c);

    let set: HashSet<Node> = [a.clone(), b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&a));
}

#[test]
fn test_equality_respects_list_order() {
    let one = coding("http://a", "1");
    let two = coding("http://a", "2");
    let build = |codings: [Node; 2]| {
        Node::builder("CodeableConcept")
            .unwrap()
            .add("coding", codings)
            .unwrap()
            .build_with(&strict())
            .unwrap()
    };

    let forward = build([one.clone(), two.clone()]);
    let backward = build([two, one]);
    assert_ne!(forward, backward);
}

#[test]
fn test_nodes_of_different_kinds_are_never_equal() {
    let id = || Value::string("x");
    let period = Node::builder("Period").unwrap().set("id", id()).unwrap();
    let range = Node::builder("Range").unwrap().set("id", id()).unwrap();

    let period = period.build_with(&strict()).unwrap();
    let range = range.build_with(&strict()).unwrap();
    assert_ne!(period, range);
}

#[test]
fn test_from_node_round_trip() {
    let node = coding("http://example.org", "a");
    let rebuilt = NodeBuilder::from(&node).build_with(&strict()).unwrap();
    assert_eq!(node, rebuilt);
    assert_eq!(node.hash_code(), rebuilt.hash_code());
}

#[test]
fn test_set_opt_clears_field() {
    let node = coding("http://example.org", "a")
        .to_builder()
        .set_opt::<Value>("system", None)
        .unwrap()
        .build_with(&strict())
        .unwrap();
    assert_eq!(node.get("system"), None);
    assert_eq!(node.get_str("code"), Some("a"));
}
