//! Coding and CodeableConcept

use super::{children, facade};
use crate::value::Value;

facade!(
    /// A reference to a code defined by a terminology system
    Coding,
    CodingBuilder,
    "Coding"
);

impl Coding {
    pub fn system(&self) -> Option<&str> {
        self.0.get_str("system")
    }

    pub fn version(&self) -> Option<&str> {
        self.0.get_str("version")
    }

    pub fn code(&self) -> Option<&str> {
        self.0.get_str("code")
    }

    pub fn display(&self) -> Option<&str> {
        self.0.get_str("display")
    }

    pub fn user_selected(&self) -> Option<bool> {
        self.0.get_bool("userSelected")
    }

    /// True when system and code both match
    pub fn is(&self, system: &str, code: &str) -> bool {
        self.system() == Some(system) && self.code() == Some(code)
    }
}

impl CodingBuilder {
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.draft.set("system", Value::uri(system));
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.draft.set("version", Value::string(version));
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

    pub fn user_selected(mut self, selected: bool) -> Self {
        self.draft.set("userSelected", selected);
        self
    }
}

facade!(
    /// A concept given by codings and/or text
    CodeableConcept,
    CodeableConceptBuilder,
    "CodeableConcept"
);

impl CodeableConcept {
    pub fn coding(&self) -> Vec<Coding> {
        children(&self.0, "coding", Coding)
    }

    pub fn text(&self) -> Option<&str> {
        self.0.get_str("text")
    }

    pub fn has_coding(&self, system: &str, code: &str) -> bool {
        self.coding().iter().any(|c| c.is(system, code))
    }
}

impl CodeableConceptBuilder {
    pub fn coding(mut self, coding: Coding) -> Self {
        self.draft.push("coding", [coding]);
        self
    }

    pub fn codings(mut self, codings: impl IntoIterator<Item = Coding>) -> Self {
        self.draft.replace("coding", codings);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.draft.set("text", Value::string(text));
        self
    }
}
