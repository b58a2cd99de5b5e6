//! Depth-first traversal of node trees
//!
//! For every node the protocol is:
//!
//! 1. `pre_visit`: returning false skips the node and its subtree
//! 2. `visit_start`
//! 3. `visit`: returning false skips the children
//! 4. children in declared field order; non-empty list fields are wrapped in
//!    `visit_list_start` / `visit_list_end` and their elements carry an index
//! 5. `visit_end`, then `post_visit`
//!
//! Primitive values are reported through `visit_primitive`. A child is named
//! by its field; the root by its kind.

use crate::node::{FieldValue, Node};
use crate::primitive::Primitive;
use crate::value::Value;

/// Visitor over nodes; every hook defaults to a no-op that continues traversal
pub trait Visitor {
    fn pre_visit(&mut self, _node: &Node) -> bool {
        true
    }

    fn visit_start(&mut self, _name: &str, _index: Option<usize>, _node: &Node) {}

    fn visit(&mut self, _name: &str, _index: Option<usize>, _node: &Node) -> bool {
        true
    }

    fn visit_list_start(&mut self, _name: &str, _len: usize) {}

    fn visit_list_end(&mut self, _name: &str) {}

    fn visit_primitive(&mut self, _name: &str, _index: Option<usize>, _value: &Primitive) {}

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &Node) {}

    fn post_visit(&mut self, _node: &Node) {}
}

/// Drive `visitor` over `node` and its subtree
pub fn walk<V: Visitor + ?Sized>(node: &Node, name: &str, index: Option<usize>, visitor: &mut V) {
    if !visitor.pre_visit(node) {
        return;
    }

    visitor.visit_start(name, index, node);

    if visitor.visit(name, index, node) {
        for (field, value) in node.fields() {
            match value {
                FieldValue::Empty => {}
                FieldValue::Single(value) => walk_value(&field.name, None, value, visitor),
                FieldValue::List(values) if values.is_empty() => {}
                FieldValue::List(values) => {
                    visitor.visit_list_start(&field.name, values.len());
                    for (i, value) in values.iter().enumerate() {
                        walk_value(&field.name, Some(i), value, visitor);
                    }
                    visitor.visit_list_end(&field.name);
                }
            }
        }
    }

    visitor.visit_end(name, index, node);
    visitor.post_visit(node);
}

fn walk_value<V: Visitor + ?Sized>(
    name: &str,
    index: Option<usize>,
    value: &Value,
    visitor: &mut V,
) {
    match value {
        Value::Primitive(p) => visitor.visit_primitive(name, index, p),
        Value::Node(n) => walk(n, name, index, visitor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        skip_kind: Option<&'static str>,
    }

    impl Visitor for Recorder {
        fn pre_visit(&mut self, node: &Node) -> bool {
            self.skip_kind != Some(node.kind_name())
        }

        fn visit_start(&mut self, name: &str, index: Option<usize>, _node: &Node) {
            self.events.push(format!("start {}{}", name, fmt_index(index)));
        }

        fn visit_list_start(&mut self, name: &str, len: usize) {
            self.events.push(format!("list {} {}", name, len));
        }

        fn visit_primitive(&mut self, name: &str, index: Option<usize>, value: &Primitive) {
            self.events
                .push(format!("{}{}={}", name, fmt_index(index), value));
        }

        fn visit_end(&mut self, name: &str, index: Option<usize>, _node: &Node) {
            self.events.push(format!("end {}{}", name, fmt_index(index)));
        }
    }

    fn fmt_index(index: Option<usize>) -> String {
        index.map(|i| format!("[{}]", i)).unwrap_or_default()
    }

    fn coding(code: &str) -> Node {
        Node::builder("Coding")
            .unwrap()
            .set("code", Value::code(code))
            .unwrap()
            .build()
            .unwrap()
    }

    fn concept() -> Node {
        Node::builder("CodeableConcept")
            .unwrap()
            .add("coding", [coding("a"), coding("b")])
            .unwrap()
            .set("text", Value::string("AB"))
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_declared_and_list_order() {
        let mut recorder = Recorder::default();
        concept().accept(&mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "start CodeableConcept",
                "list coding 2",
                "start coding[0]",
                "code=a",
                "end coding[0]",
                "start coding[1]",
                "code=b",
                "end coding[1]",
                "text=AB",
                "end CodeableConcept",
            ]
        );
    }

    #[test]
    fn test_pre_visit_skips_subtree() {
        let mut recorder = Recorder {
            skip_kind: Some("Coding"),
            ..Default::default()
        };
        concept().accept(&mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "start CodeableConcept",
                "list coding 2",
                "text=AB",
                "end CodeableConcept",
            ]
        );
    }

    #[test]
    fn test_visit_false_skips_children_only() {
        struct Shallow(Vec<String>);

        impl Visitor for Shallow {
            fn visit(&mut self, _name: &str, _index: Option<usize>, _node: &Node) -> bool {
                false
            }

            fn visit_primitive(&mut self, name: &str, _index: Option<usize>, _value: &Primitive) {
                self.0.push(name.to_string());
            }

            fn post_visit(&mut self, node: &Node) {
                self.0.push(format!("post {}", node.kind_name()));
            }
        }

        let mut shallow = Shallow(Vec::new());
        concept().accept(&mut shallow);
        assert_eq!(shallow.0, vec!["post CodeableConcept"]);
    }
}
