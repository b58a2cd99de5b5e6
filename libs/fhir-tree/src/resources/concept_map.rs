//! ConceptMap

use super::{children, coded, facade, ConceptMapEquivalence, ConceptMapUnmappedMode, PublicationStatus};
use crate::primitive::Primitive;
use crate::value::Value;

facade!(
    /// A statement of relationships from one set of concepts to one or more others
    ConceptMap,
    ConceptMapBuilder,
    "ConceptMap"
);

impl ConceptMap {
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

    pub fn status(&self) -> Option<PublicationStatus> {
        coded(&self.0, "status", PublicationStatus::from_code)
    }

    /// Source value set (`sourceUri` or `sourceCanonical`)
    pub fn source(&self) -> Option<&str> {
        self.0.get_str("source")
    }

    /// Target value set (`targetUri` or `targetCanonical`)
    pub fn target(&self) -> Option<&str> {
        self.0.get_str("target")
    }

    pub fn group(&self) -> Vec<Group> {
        children(&self.0, "group", Group)
    }

    /// Targets for `code` in every group mapping from `system`
    pub fn translate(&self, system: &str, code: &str) -> Vec<Target> {
        self.group()
            .into_iter()
            .filter(|group| group.source() == Some(system))
            .flat_map(|group| group.element())
            .filter(|element| element.code() == Some(code))
            .flat_map(|element| element.target())
            .collect()
    }
}

impl ConceptMapBuilder {
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

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.draft.set("description", Value::markdown(description));
        self
    }

    pub fn source_uri(mut self, source: impl Into<String>) -> Self {
        self.draft.set("source", Value::uri(source));
        self
    }

    pub fn source_canonical(mut self, source: impl Into<String>) -> Self {
        self.draft.set("source", Value::canonical(source));
        self
    }

    pub fn target_uri(mut self, target: impl Into<String>) -> Self {
        self.draft.set("target", Value::uri(target));
        self
    }

    pub fn target_canonical(mut self, target: impl Into<String>) -> Self {
        self.draft.set("target", Value::canonical(target));
        self
    }

    pub fn group(mut self, group: Group) -> Self {
        self.draft.push("group", [group]);
        self
    }
}

facade!(
    /// Mappings sharing the same source and target systems
    Group,
    GroupBuilder,
    "ConceptMap.group"
);

impl Group {
    pub fn source(&self) -> Option<&str> {
        self.0.get_str("source")
    }

    pub fn source_version(&self) -> Option<&str> {
        self.0.get_str("sourceVersion")
    }

    pub fn target(&self) -> Option<&str> {
        self.0.get_str("target")
    }

    pub fn target_version(&self) -> Option<&str> {
        self.0.get_str("targetVersion")
    }

    pub fn element(&self) -> Vec<SourceElement> {
        children(&self.0, "element", SourceElement)
    }

    pub fn unmapped(&self) -> Option<Unmapped> {
        self.0.get_node("unmapped").cloned().map(Unmapped)
    }
}

impl GroupBuilder {
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.draft.set("source", Value::uri(source));
        self
    }

    pub fn source_version(mut self, version: impl Into<String>) -> Self {
        self.draft.set("sourceVersion", Value::string(version));
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.draft.set("target", Value::uri(target));
        self
    }

    pub fn target_version(mut self, version: impl Into<String>) -> Self {
        self.draft.set("targetVersion", Value::string(version));
        self
    }

    pub fn element(mut self, element: SourceElement) -> Self {
        self.draft.push("element", [element]);
        self
    }

    pub fn unmapped(mut self, unmapped: Option<Unmapped>) -> Self {
        self.draft.set_opt("unmapped", unmapped);
        self
    }
}

facade!(
    /// A source concept and its mappings
    SourceElement,
    SourceElementBuilder,
    "ConceptMap.group.element"
);

impl SourceElement {
    pub fn code(&self) -> Option<&str> {
        self.0.get_str("code")
    }

    pub fn display(&self) -> Option<&str> {
        self.0.get_str("display")
    }

    pub fn target(&self) -> Vec<Target> {
        children(&self.0, "target", Target)
    }
}

impl SourceElementBuilder {
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.draft.set("code", Value::code(code));
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.draft.set("display", Value::string(display));
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.draft.push("target", [target]);
        self
    }
}

facade!(
    /// A concept in the target system
    Target,
    TargetBuilder,
    "ConceptMap.group.element.target"
);

impl Target {
    pub fn code(&self) -> Option<&str> {
        self.0.get_str("code")
    }

    pub fn display(&self) -> Option<&str> {
        self.0.get_str("display")
    }

    pub fn equivalence(&self) -> Option<ConceptMapEquivalence> {
        coded(&self.0, "equivalence", ConceptMapEquivalence::from_code)
    }

    pub fn comment(&self) -> Option<&str> {
        self.0.get_str("comment")
    }
}

impl TargetBuilder {
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.draft.set("code", Value::code(code));
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.draft.set("display", Value::string(display));
        self
    }

    pub fn equivalence(mut self, equivalence: ConceptMapEquivalence) -> Self {
        self.draft.set("equivalence", equivalence);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.draft.set("comment", Value::string(comment));
        self
    }
}

facade!(
    Unmapped,
    UnmappedBuilder,
    "ConceptMap.group.unmapped"
);

impl Unmapped {
    pub fn mode(&self) -> Option<ConceptMapUnmappedMode> {
        coded(&self.0, "mode", ConceptMapUnmappedMode::from_code)
    }

    pub fn code(&self) -> Option<&str> {
        self.0.get_str("code")
    }

    pub fn display(&self) -> Option<&str> {
        self.0.get_str("display")
    }

    pub fn url(&self) -> Option<&str> {
        self.0.get_str("url")
    }
}

impl UnmappedBuilder {
    pub fn mode(mut self, mode: ConceptMapUnmappedMode) -> Self {
        self.draft.set("mode", mode);
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.draft.set("code", Value::code(code));
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.draft.set("display", Value::string(display));
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.draft.set("url", Value::canonical(url));
        self
    }
}
