//! Immutable nodes
//!
//! A [`Node`] is one instance of a schema-described tree element. Its field
//! values are fixed at build time and shared behind an `Arc`, so cloning a
//! node or seeding a builder from it never copies or exposes mutable state.

use crate::builder::NodeBuilder;
use crate::error::Result;
use crate::schema::{self, FieldDef, NodeKind};
use crate::value::Value;
use crate::visitor::{self, Visitor};
use once_cell::sync::OnceCell;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Content of one field slot of a built node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Empty,
    Single(Value),
    List(Vec<Value>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Single(_) => false,
            Self::List(values) => values.is_empty(),
        }
    }

    pub fn as_single(&self) -> Option<&Value> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> &[Value] {
        match self {
            Self::List(values) => values,
            _ => &[],
        }
    }
}

#[derive(Clone)]
pub struct Node {
    data: Arc<NodeData>,
}

struct NodeData {
    kind: Arc<NodeKind>,
    fields: Vec<FieldValue>,
    /// Structural hash, computed on first request. Racing first computations
    /// are harmless: the fields never change, so every thread gets the same value.
    hash: OnceCell<u64>,
}

impl Node {
    pub(crate) fn from_parts(kind: Arc<NodeKind>, fields: Vec<FieldValue>) -> Self {
        debug_assert_eq!(kind.fields().len(), fields.len());
        Self {
            data: Arc::new(NodeData {
                kind,
                fields,
                hash: OnceCell::new(),
            }),
        }
    }

    /// Builder for a kind of the standard registry
    pub fn builder(kind: &str) -> Result<NodeBuilder> {
        Ok(NodeBuilder::new(schema::standard().kind(kind)?))
    }

    pub fn kind(&self) -> &Arc<NodeKind> {
        &self.data.kind
    }

    pub fn kind_name(&self) -> &str {
        self.data.kind.name()
    }

    /// Field definitions paired with their values, in declared order
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDef, &FieldValue)> {
        self.data.kind.fields().iter().zip(self.data.fields.iter())
    }

    pub(crate) fn field_values(&self) -> &[FieldValue] {
        &self.data.fields
    }

    pub fn field_value(&self, name: &str) -> Option<&FieldValue> {
        self.data
            .kind
            .field_index(name)
            .map(|index| &self.data.fields[index])
    }

    /// Value of a scalar field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field_value(name).and_then(FieldValue::as_single)
    }

    /// Values of a list field, empty when unset
    pub fn get_list(&self, name: &str) -> &[Value] {
        self.field_value(name)
            .map(FieldValue::as_list)
            .unwrap_or(&[])
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.get(name).and_then(Value::as_node)
    }

    /// Child nodes of a list field
    pub fn get_nodes(&self, name: &str) -> impl Iterator<Item = &Node> {
        self.get_list(name).iter().filter_map(Value::as_node)
    }

    /// True when no field is populated
    pub fn is_empty(&self) -> bool {
        self.data.fields.iter().all(FieldValue::is_empty)
    }

    /// Builder seeded with all of this node's values
    pub fn to_builder(&self) -> NodeBuilder {
        NodeBuilder::from_node(self)
    }

    /// Traverse this node as a root, named by its kind
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor::walk(self, self.kind_name(), None, visitor);
    }

    /// Traverse this node under the given element name and list index
    pub fn accept_named<V: Visitor + ?Sized>(
        &self,
        name: &str,
        index: Option<usize>,
        visitor: &mut V,
    ) {
        visitor::walk(self, name, index, visitor);
    }

    /// Structural hash over the kind and every field, cached after first use
    pub fn hash_code(&self) -> u64 {
        *self.data.hash.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.data.kind.name().hash(&mut hasher);
            self.data.fields.hash(&mut hasher);
            hasher.finish()
        })
    }

    /// Canonical JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        crate::json::to_json(self)
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.kind_name() == other.kind_name()
            && self.hash_code() == other.hash_code()
            && self.data.fields == other.data.fields
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.kind_name());
        for (def, value) in self.fields() {
            match value {
                FieldValue::Empty => {}
                FieldValue::Single(v) => {
                    out.field(&def.name, v);
                }
                FieldValue::List(values) if !values.is_empty() => {
                    out.field(&def.name, values);
                }
                FieldValue::List(_) => {}
            }
        }
        out.finish()
    }
}

impl serde::Serialize for Node {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
