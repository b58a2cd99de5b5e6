//! Validated FHIR resource trees
//!
//! This crate provides an immutable, schema-described tree of FHIR resources
//! and datatypes. Nodes are assembled through builders that check
//! cardinality, choice types, reference targets and coded-value bindings when
//! `build()` is called, then freeze into structurally comparable values that
//! can be traversed with a [`Visitor`].
//!
//! # Example
//!
//! ```rust
//! use ferrum_tree::resources::{CodeSystem, CodeSystemContentMode, Concept, PublicationStatus};
//!
//! # fn main() -> ferrum_tree::Result<()> {
//! let concept = Concept::builder().code("a").display("Alpha").build()?;
//! let cs = CodeSystem::builder()
//!     .url("http://example.org/cs")
//!     .status(PublicationStatus::Active)
//!     .content(CodeSystemContentMode::Complete)
//!     .concept(concept)
//!     .build()?;
//!
//! assert_eq!(cs.concept().len(), 1);
//! assert_eq!(cs.to_json()["resourceType"], "CodeSystem");
//! # Ok(())
//! # }
//! ```
//!
//! The generic API works on any registered kind:
//!
//! ```rust
//! use ferrum_tree::{Error, Node, Value};
//!
//! let err = Node::builder("ConceptMap.group.element.target")
//!     .unwrap()
//!     .set("code", Value::code("x"))
//!     .unwrap()
//!     .build()
//!     .unwrap_err();
//! assert!(matches!(err, Error::MissingRequiredField { .. }));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod json;
pub mod node;
pub mod primitive;
pub mod resources;
pub mod schema;
pub mod terminology;
pub mod validation;
pub mod value;
pub mod visitor;

pub use builder::NodeBuilder;
pub use config::{BindingMode, ModelConfig};
pub use error::{Error, Result};
pub use node::{FieldValue, Node};
pub use primitive::{Primitive, PrimitiveType};
pub use schema::{
    Binding, BindingStrength, Cardinality, ElementType, FieldDef, KindCategory, NodeKind,
    SchemaRegistry,
};
pub use terminology::{InMemoryTerminology, TerminologyProvider};
pub use validation::{
    validate, validate_tree, validate_with, IssueCode, IssueSeverity, ValidationContext,
    ValidationIssue,
};
pub use value::Value;
pub use visitor::Visitor;
