//! Typed facades over the generic node model
//!
//! Each facade wraps a [`Node`] of one kind. Coded fields bound to a required
//! value set are Rust enums and choice fields are Rust sum types, so the typed
//! API cannot express a wrong alternative. Setters never fail; a mismatch is
//! reported by `build()`.

use crate::builder::NodeBuilder;
use crate::error::Result;
use crate::node::Node;
use crate::schema;
use crate::validation::ValidationContext;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Builder state shared by the facades; keeps the first error for `build()`
#[derive(Debug)]
pub(crate) struct Draft {
    state: Result<NodeBuilder>,
}

impl Draft {
    pub(crate) fn new(kind: &str) -> Self {
        Self {
            state: schema::standard().kind(kind).map(NodeBuilder::new),
        }
    }

    pub(crate) fn from_node(node: &Node) -> Self {
        Self {
            state: Ok(NodeBuilder::from_node(node)),
        }
    }

    fn apply(&mut self, f: impl FnOnce(&mut NodeBuilder) -> Result<()>) {
        let result = match &mut self.state {
            Ok(builder) => f(builder),
            Err(_) => return,
        };
        if let Err(e) = result {
            self.state = Err(e);
        }
    }

    pub(crate) fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        self.apply(|b| b.put(name, value));
    }

    pub(crate) fn set_opt<V: Into<Value>>(&mut self, name: &str, value: Option<V>) {
        match value {
            Some(v) => self.set(name, v),
            None => self.apply(|b| b.clear_field(name)),
        }
    }

    pub(crate) fn push<V: Into<Value>>(&mut self, name: &str, values: impl IntoIterator<Item = V>) {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.apply(|b| b.push(name, values));
    }

    pub(crate) fn replace<V: Into<Value>>(
        &mut self,
        name: &str,
        values: impl IntoIterator<Item = V>,
    ) {
        let values = values.into_iter().map(Into::into).collect();
        self.apply(|b| b.put_list(name, values));
    }

    pub(crate) fn build(self, ctx: &ValidationContext) -> Result<Node> {
        self.state?.build_with(ctx)
    }
}

/// Shared plumbing of a facade type and its builder
macro_rules! facade {
    ($(#[$meta:meta])* $name:ident, $builder:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(crate::node::Node);

        impl $name {
            pub const KIND: &'static str = $kind;

            pub fn builder() -> $builder {
                $builder {
                    draft: crate::resources::Draft::new($kind),
                }
            }

            /// Builder seeded with this value's fields
            pub fn to_builder(&self) -> $builder {
                $builder {
                    draft: crate::resources::Draft::from_node(&self.0),
                }
            }

            pub fn as_node(&self) -> &crate::node::Node {
                &self.0
            }

            pub fn into_node(self) -> crate::node::Node {
                self.0
            }

            pub fn accept<V: crate::visitor::Visitor + ?Sized>(&self, visitor: &mut V) {
                self.0.accept(visitor);
            }

            pub fn hash_code(&self) -> u64 {
                self.0.hash_code()
            }

            pub fn to_json(&self) -> serde_json::Value {
                self.0.to_json()
            }
        }

        impl TryFrom<crate::node::Node> for $name {
            type Error = crate::error::Error;

            fn try_from(node: crate::node::Node) -> crate::error::Result<Self> {
                if node.kind_name() == $kind {
                    Ok(Self(node))
                } else {
                    Err(crate::error::Error::InvalidArgument(format!(
                        "expected a {} node, found {}",
                        $kind,
                        node.kind_name()
                    )))
                }
            }
        }

        impl From<$name> for crate::value::Value {
            fn from(value: $name) -> Self {
                crate::value::Value::Node(value.0)
            }
        }

        impl AsRef<crate::node::Node> for $name {
            fn as_ref(&self) -> &crate::node::Node {
                &self.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }

        #[derive(Debug)]
        pub struct $builder {
            draft: crate::resources::Draft,
        }

        impl $builder {
            /// Build under the installed configuration
            pub fn build(self) -> crate::error::Result<$name> {
                self.build_with(&crate::validation::ValidationContext::current())
            }

            pub fn build_with(
                self,
                ctx: &crate::validation::ValidationContext,
            ) -> crate::error::Result<$name> {
                self.draft.build(ctx).map($name)
            }
        }
    };
}

pub(crate) use facade;

mod code_system;
mod concept_map;
mod datatypes;

pub use code_system::{
    CodeSystem, CodeSystemBuilder, Concept, ConceptBuilder, ConceptProperty,
    ConceptPropertyBuilder, ConceptPropertyValue, Designation, DesignationBuilder,
    PropertyDefinition, PropertyDefinitionBuilder,
};
pub use concept_map::{
    ConceptMap, ConceptMapBuilder, Group, GroupBuilder, SourceElement, SourceElementBuilder,
    Target, TargetBuilder, Unmapped, UnmappedBuilder,
};
pub use datatypes::{CodeableConcept, CodeableConceptBuilder, Coding, CodingBuilder};

/// Wrap the node children of a list field, all of a known kind
pub(crate) fn children<T>(node: &Node, field: &str, wrap: fn(Node) -> T) -> Vec<T> {
    node.get_nodes(field).cloned().map(wrap).collect()
}

/// Enum over the codes of a required value set
macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl From<$name> for Value {
            fn from(value: $name) -> Self {
                Value::code(value.code())
            }
        }
    };
}

coded_enum! {
    /// Lifecycle status of a conformance or knowledge resource
    PublicationStatus {
        Draft => "draft",
        Active => "active",
        Retired => "retired",
        Unknown => "unknown",
    }
}

coded_enum! {
    /// How much of a code system's content is represented
    CodeSystemContentMode {
        NotPresent => "not-present",
        Example => "example",
        Fragment => "fragment",
        Complete => "complete",
        Supplement => "supplement",
    }
}

coded_enum! {
    CodeSystemHierarchyMeaning {
        GroupedBy => "grouped-by",
        IsA => "is-a",
        PartOf => "part-of",
        ClassifiedWith => "classified-with",
    }
}

coded_enum! {
    /// Type of a code system property value
    PropertyType {
        Code => "code",
        Coding => "Coding",
        String => "string",
        Integer => "integer",
        Boolean => "boolean",
        DateTime => "dateTime",
        Decimal => "decimal",
    }
}

coded_enum! {
    /// Degree of equivalence between a source and a target concept
    ConceptMapEquivalence {
        RelatedTo => "relatedto",
        Equivalent => "equivalent",
        Equal => "equal",
        Wider => "wider",
        Subsumes => "subsumes",
        Narrower => "narrower",
        Specializes => "specializes",
        Inexact => "inexact",
        Unmatched => "unmatched",
        Disjoint => "disjoint",
    }
}

coded_enum! {
    ConceptMapUnmappedMode {
        Provided => "provided",
        Fixed => "fixed",
        OtherMap => "other-map",
    }
}

/// Read a required-bound code field as its enum
pub(crate) fn coded<T>(node: &Node, field: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    node.get_str(field).and_then(parse)
}
