//! Schema description of node kinds
//!
//! A [`NodeKind`] lists the fields of one resource, datatype or backbone
//! element in declaration order. Fields inherited from the kind's category
//! (`id`, `extension`, `meta`, ...) are composed in front of the kind's own
//! fields, so "base before derived" is simply the field order.

pub mod definitions;
pub mod registry;

pub use registry::{standard, SchemaRegistry};

use crate::primitive::PrimitiveType;
use crate::value::Value;
use std::fmt;

/// Cardinality of a field (min..max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    /// Minimum occurrences
    pub min: u32,
    /// Maximum occurrences (None means unbounded/*)
    pub max: Option<u32>,
}

impl Cardinality {
    pub const OPTIONAL: Self = Self::new(0, Some(1));
    pub const REQUIRED: Self = Self::new(1, Some(1));
    pub const LIST: Self = Self::new(0, None);
    pub const NON_EMPTY_LIST: Self = Self::new(1, None);

    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Check if this field is a list
    pub fn is_array(&self) -> bool {
        self.max.map(|m| m > 1).unwrap_or(true)
    }

    /// Check if this field is optional
    pub fn is_optional(&self) -> bool {
        self.min == 0
    }

    /// Check if this field is required
    pub fn is_required(&self) -> bool {
        self.min > 0
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}..*", self.min),
        }
    }
}

/// Binding strength (required | extensible | preferred | example)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingStrength {
    Required,
    Extensible,
    Preferred,
    Example,
}

impl BindingStrength {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Extensible => "extensible",
            Self::Preferred => "preferred",
            Self::Example => "example",
        }
    }
}

impl fmt::Display for BindingStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// ValueSet binding for a coded field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub strength: BindingStrength,
    /// Canonical URL of the value set
    pub value_set: String,
    pub description: Option<String>,
}

/// Type of a field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    Primitive(PrimitiveType),
    /// A node kind, by name
    Node(String),
    /// Any resource kind
    Resource,
}

impl ElementType {
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(p) => p.code(),
            Self::Node(kind) => kind,
            Self::Resource => "Resource",
        }
    }

    /// Check whether a runtime value is of this type
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Primitive(ty), Value::Primitive(p)) => p.primitive_type() == *ty,
            (Self::Node(kind), Value::Node(n)) => n.kind_name() == kind,
            (Self::Resource, Value::Node(n)) => n.kind().is_resource(),
            _ => false,
        }
    }
}

/// Definition of one field of a node kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    /// Allowed types; more than one makes this a choice field
    pub types: Vec<ElementType>,
    pub cardinality: Cardinality,
    pub binding: Option<Binding>,
    /// Allowed target kinds for `Reference` values
    pub target_kinds: Vec<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: ElementType) -> Self {
        Self {
            name: name.into(),
            types: vec![ty],
            cardinality: Cardinality::OPTIONAL,
            binding: None,
            target_kinds: Vec::new(),
        }
    }

    pub fn primitive(name: impl Into<String>, ty: PrimitiveType) -> Self {
        Self::new(name, ElementType::Primitive(ty))
    }

    pub fn node(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(name, ElementType::Node(kind.into()))
    }

    pub fn choice(name: impl Into<String>, types: impl IntoIterator<Item = ElementType>) -> Self {
        Self {
            types: types.into_iter().collect(),
            ..Self::new(name, ElementType::Resource)
        }
    }

    /// Shorthand for a `Reference` field restricted to the given kinds
    pub fn reference(name: impl Into<String>, targets: &[&str]) -> Self {
        Self::node(name, "Reference").references(targets)
    }

    pub fn required(mut self) -> Self {
        self.cardinality.min = 1;
        self
    }

    pub fn list(mut self) -> Self {
        self.cardinality.max = None;
        self
    }

    pub fn bound(mut self, strength: BindingStrength, value_set: impl Into<String>) -> Self {
        self.binding = Some(Binding {
            strength,
            value_set: value_set.into(),
            description: None,
        });
        self
    }

    pub fn references(mut self, targets: &[&str]) -> Self {
        self.target_kinds = targets.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn is_choice(&self) -> bool {
        self.types.len() > 1
    }

    pub fn is_list(&self) -> bool {
        self.cardinality.is_array()
    }

    pub fn is_required(&self) -> bool {
        self.cardinality.is_required()
    }

    pub fn accepts(&self, value: &Value) -> bool {
        self.types.iter().any(|t| t.matches(value))
    }

    /// Find the declared alternative a runtime value resolves to
    pub fn resolve(&self, value: &Value) -> Option<&ElementType> {
        self.types.iter().find(|t| t.matches(value))
    }

    pub fn type_names(&self) -> String {
        self.types
            .iter()
            .map(ElementType::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Category of a node kind, which determines its inherited base fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindCategory {
    /// Datatype: `id`, `extension`
    Element,
    /// Nested element of a resource: Element + `modifierExtension`
    BackboneElement,
    /// `id`, `meta`, `implicitRules`, `language`
    Resource,
    /// Resource + `text`, `contained`, `extension`, `modifierExtension`
    DomainResource,
}

impl KindCategory {
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource | Self::DomainResource)
    }

    fn base_fields(&self) -> Vec<FieldDef> {
        use PrimitiveType as P;

        let extension = || FieldDef::node("extension", "Extension").list();
        let modifier_extension = || FieldDef::node("modifierExtension", "Extension").list();

        match self {
            Self::Element => vec![FieldDef::primitive("id", P::String), extension()],
            Self::BackboneElement => vec![
                FieldDef::primitive("id", P::String),
                extension(),
                modifier_extension(),
            ],
            Self::Resource | Self::DomainResource => {
                let mut fields = vec![
                    FieldDef::primitive("id", P::Id),
                    FieldDef::node("meta", "Meta"),
                    FieldDef::primitive("implicitRules", P::Uri),
                    FieldDef::primitive("language", P::Code)
                        .bound(BindingStrength::Preferred, definitions::vs::LANGUAGES),
                ];
                if *self == Self::DomainResource {
                    fields.push(FieldDef::node("text", "Narrative"));
                    fields.push(FieldDef::new("contained", ElementType::Resource).list());
                    fields.push(extension());
                    fields.push(modifier_extension());
                }
                fields
            }
        }
    }
}

/// Definition of a node kind: its name, category and fields in declared order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeKind {
    name: String,
    category: KindCategory,
    fields: Vec<FieldDef>,
    base_len: usize,
    allow_empty: bool,
    description: Option<String>,
}

impl NodeKind {
    /// Start defining a kind; base fields of the category are added automatically
    pub fn define(name: impl Into<String>, category: KindCategory) -> KindBuilder {
        KindBuilder {
            name: name.into(),
            category,
            fields: Vec::new(),
            allow_empty: false,
            description: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> KindCategory {
        self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_resource(&self) -> bool {
        self.category.is_resource()
    }

    /// Whether an element of this kind may be built with no content at all
    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// All fields, base fields first
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn base_fields(&self) -> &[FieldDef] {
        &self.fields[..self.base_len]
    }

    pub fn own_fields(&self) -> &[FieldDef] {
        &self.fields[self.base_len..]
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Path of a field of this kind (e.g. `CodeSystem.status`)
    pub fn path_of(&self, field: &str) -> String {
        format!("{}.{}", self.name, field)
    }
}

/// Builder for [`NodeKind`] definitions
#[derive(Debug, Clone)]
pub struct KindBuilder {
    name: String,
    category: KindCategory,
    fields: Vec<FieldDef>,
    allow_empty: bool,
    description: Option<String>,
}

impl KindBuilder {
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Permit elements of this kind without any content
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn build(self) -> NodeKind {
        let mut fields = self.category.base_fields();
        let base_len = fields.len();
        fields.extend(self.fields);

        NodeKind {
            name: self.name,
            category: self.category,
            fields,
            base_len,
            allow_empty: self.allow_empty,
            description: self.description,
        }
    }
}
