//! CodeSystem

use super::{
    children, coded, facade, CodeSystemContentMode, CodeSystemHierarchyMeaning, Coding,
    PropertyType, PublicationStatus,
};
use crate::primitive::Primitive;
use crate::value::Value;
use rust_decimal::Decimal;

facade!(
    /// Declares the existence of and describes a code system or supplement
    CodeSystem,
    CodeSystemBuilder,
    "CodeSystem"
);

impl CodeSystem {
    pub fn id(&self) -> Option<&str> {
        self.0.get_str("id")
    }

    pub fn url(&self) -> Option<&str> {
        self.0.get_str("url")
    }

    pub fn version(&self) -> Option<&str> {
        self.0.get_str("version")
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get_str("name")
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get_str("title")
    }

    pub fn status(&self) -> Option<PublicationStatus> {
        coded(&self.0, "status", PublicationStatus::from_code)
    }

    pub fn content(&self) -> Option<CodeSystemContentMode> {
        coded(&self.0, "content", CodeSystemContentMode::from_code)
    }

    pub fn hierarchy_meaning(&self) -> Option<CodeSystemHierarchyMeaning> {
        coded(&self.0, "hierarchyMeaning", CodeSystemHierarchyMeaning::from_code)
    }

    pub fn case_sensitive(&self) -> Option<bool> {
        self.0.get_bool("caseSensitive")
    }

    pub fn value_set(&self) -> Option<&str> {
        self.0.get_str("valueSet")
    }

    pub fn count(&self) -> Option<u32> {
        self.0
            .get("count")
            .and_then(Value::as_primitive)
            .and_then(Primitive::as_integer)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn property(&self) -> Vec<PropertyDefinition> {
        children(&self.0, "property", PropertyDefinition)
    }

    /// Top-level concepts
    pub fn concept(&self) -> Vec<Concept> {
        children(&self.0, "concept", Concept)
    }

    /// Depth-first search of the concept hierarchy
    pub fn find_concept(&self, code: &str) -> Option<Concept> {
        fn find(concepts: Vec<Concept>, code: &str) -> Option<Concept> {
            concepts.into_iter().find_map(|concept| {
                if concept.code() == Some(code) {
                    Some(concept)
                } else {
                    find(concept.concept(), code)
                }
            })
        }

        find(self.concept(), code)
    }
}

impl CodeSystemBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.draft.set("id", Primitive::Id(id.into()));
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.draft.set("url", Value::uri(url));
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.draft.set("version", Value::string(version));
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.draft.set("name", Value::string(name));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.draft.set("title", Value::string(title));
        self
    }

    pub fn status(mut self, status: PublicationStatus) -> Self {
        self.draft.set("status", status);
        self
    }

    pub fn experimental(mut self, experimental: bool) -> Self {
        self.draft.set("experimental", experimental);
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.draft.set("date", Value::date_time(date));
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.draft.set("publisher", Value::string(publisher));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.draft.set("description", Value::markdown(description));
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.draft.set("caseSensitive", case_sensitive);
        self
    }

    pub fn value_set(mut self, value_set: impl Into<String>) -> Self {
        self.draft.set("valueSet", Value::canonical(value_set));
        self
    }

    pub fn hierarchy_meaning(mut self, meaning: CodeSystemHierarchyMeaning) -> Self {
        self.draft.set("hierarchyMeaning", meaning);
        self
    }

    pub fn content(mut self, content: CodeSystemContentMode) -> Self {
        self.draft.set("content", content);
        self
    }

    pub fn supplements(mut self, supplements: impl Into<String>) -> Self {
        self.draft.set("supplements", Value::canonical(supplements));
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.draft.set("count", Primitive::UnsignedInt(count));
        self
    }

    pub fn property(mut self, property: PropertyDefinition) -> Self {
        self.draft.push("property", [property]);
        self
    }

    pub fn concept(mut self, concept: Concept) -> Self {
        self.draft.push("concept", [concept]);
        self
    }

    /// Replace all top-level concepts
    pub fn concepts(mut self, concepts: impl IntoIterator<Item = Concept>) -> Self {
        self.draft.replace("concept", concepts);
        self
    }
}

facade!(
    /// Additional information supplied about each concept
    PropertyDefinition,
    PropertyDefinitionBuilder,
    "CodeSystem.property"
);

impl PropertyDefinition {
    pub fn code(&self) -> Option<&str> {
        self.0.get_str("code")
    }

    pub fn uri(&self) -> Option<&str> {
        self.0.get_str("uri")
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get_str("description")
    }

    pub fn property_type(&self) -> Option<PropertyType> {
        coded(&self.0, "type", PropertyType::from_code)
    }
}

impl PropertyDefinitionBuilder {
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.draft.set("code", Value::code(code));
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.draft.set("uri", Value::uri(uri));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.draft.set("description", Value::string(description));
        self
    }

    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.draft.set("type", property_type);
        self
    }
}

facade!(
    /// A concept defined by a code system
    Concept,
    ConceptBuilder,
    "CodeSystem.concept"
);

impl Concept {
    pub fn code(&self) -> Option<&str> {
        self.0.get_str("code")
    }

    pub fn display(&self) -> Option<&str> {
        self.0.get_str("display")
    }

    pub fn definition(&self) -> Option<&str> {
        self.0.get_str("definition")
    }

    pub fn designation(&self) -> Vec<Designation> {
        children(&self.0, "designation", Designation)
    }

    pub fn property(&self) -> Vec<ConceptProperty> {
        children(&self.0, "property", ConceptProperty)
    }

    /// Child concepts
    pub fn concept(&self) -> Vec<Concept> {
        children(&self.0, "concept", Concept)
    }
}

impl ConceptBuilder {
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.draft.set("code", Value::code(code));
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.draft.set("display", Value::string(display));
        self
    }

    pub fn definition(mut self, definition: impl Into<String>) -> Self {
        self.draft.set("definition", Value::string(definition));
        self
    }

    pub fn designation(mut self, designation: Designation) -> Self {
        self.draft.push("designation", [designation]);
        self
    }

    pub fn property(mut self, property: ConceptProperty) -> Self {
        self.draft.push("property", [property]);
        self
    }

    pub fn concept(mut self, concept: Concept) -> Self {
        self.draft.push("concept", [concept]);
        self
    }
}

facade!(
    /// Additional representation of a concept
    Designation,
    DesignationBuilder,
    "CodeSystem.concept.designation"
);

impl Designation {
    pub fn language(&self) -> Option<&str> {
        self.0.get_str("language")
    }

    /// Details how this designation would be used (`use`)
    pub fn usage(&self) -> Option<Coding> {
        self.0
            .get_node("use")
            .and_then(|node| Coding::try_from(node.clone()).ok())
    }

    pub fn value(&self) -> Option<&str> {
        self.0.get_str("value")
    }
}

impl DesignationBuilder {
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.draft.set("language", Value::code(language));
        self
    }

    pub fn usage(mut self, usage: Coding) -> Self {
        self.draft.set("use", usage);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.draft.set("value", Value::string(value));
        self
    }
}

/// Value of a concept property (`value[x]`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConceptPropertyValue {
    Code(String),
    Coding(Coding),
    String(String),
    Integer(i32),
    Boolean(bool),
    DateTime(String),
    Decimal(Decimal),
}

impl ConceptPropertyValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Code(_) => PropertyType::Code,
            Self::Coding(_) => PropertyType::Coding,
            Self::String(_) => PropertyType::String,
            Self::Integer(_) => PropertyType::Integer,
            Self::Boolean(_) => PropertyType::Boolean,
            Self::DateTime(_) => PropertyType::DateTime,
            Self::Decimal(_) => PropertyType::Decimal,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Primitive(Primitive::Code(s)) => Some(Self::Code(s.clone())),
            Value::Primitive(Primitive::String(s)) => Some(Self::String(s.clone())),
            Value::Primitive(Primitive::Integer(i)) => Some(Self::Integer(*i)),
            Value::Primitive(Primitive::Boolean(b)) => Some(Self::Boolean(*b)),
            Value::Primitive(Primitive::DateTime(s)) => Some(Self::DateTime(s.clone())),
            Value::Primitive(Primitive::Decimal(d)) => Some(Self::Decimal(*d)),
            Value::Node(node) => Coding::try_from(node.clone()).ok().map(Self::Coding),
            Value::Primitive(_) => None,
        }
    }
}

impl From<ConceptPropertyValue> for Value {
    fn from(value: ConceptPropertyValue) -> Self {
        match value {
            ConceptPropertyValue::Code(s) => Value::code(s),
            ConceptPropertyValue::Coding(c) => c.into(),
            ConceptPropertyValue::String(s) => Value::string(s),
            ConceptPropertyValue::Integer(i) => Value::integer(i),
            ConceptPropertyValue::Boolean(b) => Value::boolean(b),
            ConceptPropertyValue::DateTime(s) => Value::date_time(s),
            ConceptPropertyValue::Decimal(d) => Value::decimal(d),
        }
    }
}

facade!(
    /// Property value for a concept
    ConceptProperty,
    ConceptPropertyBuilder,
    "CodeSystem.concept.property"
);

impl ConceptProperty {
    pub fn code(&self) -> Option<&str> {
        self.0.get_str("code")
    }

    pub fn value(&self) -> Option<ConceptPropertyValue> {
        self.0.get("value").and_then(ConceptPropertyValue::from_value)
    }
}

impl ConceptPropertyBuilder {
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.draft.set("code", Value::code(code));
        self
    }

    pub fn value(mut self, value: ConceptPropertyValue) -> Self {
        self.draft.set("value", value);
        self
    }
}
