//! Built-in node kind definitions
//!
//! Hand-maintained declarations of the datatypes and resources the standard
//! registry ships with. Backbone elements are named by their element path
//! (e.g. `ConceptMap.group.element.target`).

mod code_system;
mod concept_map;
mod datatypes;
mod manufactured_item;
mod medicinal_product;

use super::SchemaRegistry;

/// Value set canonical URLs referenced by the built-in bindings
pub mod vs {
    pub const LANGUAGES: &str = "http://hl7.org/fhir/ValueSet/languages";
    pub const PUBLICATION_STATUS: &str = "http://hl7.org/fhir/ValueSet/publication-status";
    pub const CODESYSTEM_CONTENT_MODE: &str = "http://hl7.org/fhir/ValueSet/codesystem-content-mode";
    pub const CODESYSTEM_HIERARCHY_MEANING: &str =
        "http://hl7.org/fhir/ValueSet/codesystem-hierarchy-meaning";
    pub const FILTER_OPERATOR: &str = "http://hl7.org/fhir/ValueSet/filter-operator";
    pub const CONCEPT_PROPERTY_TYPE: &str = "http://hl7.org/fhir/ValueSet/concept-property-type";
    pub const CONCEPT_MAP_EQUIVALENCE: &str = "http://hl7.org/fhir/ValueSet/concept-map-equivalence";
    pub const CONCEPTMAP_UNMAPPED_MODE: &str =
        "http://hl7.org/fhir/ValueSet/conceptmap-unmapped-mode";
    pub const NARRATIVE_STATUS: &str = "http://hl7.org/fhir/ValueSet/narrative-status";
    pub const IDENTIFIER_USE: &str = "http://hl7.org/fhir/ValueSet/identifier-use";
    pub const QUANTITY_COMPARATOR: &str = "http://hl7.org/fhir/ValueSet/quantity-comparator";
    pub const CONTACT_POINT_SYSTEM: &str = "http://hl7.org/fhir/ValueSet/contact-point-system";
    pub const CONTACT_POINT_USE: &str = "http://hl7.org/fhir/ValueSet/contact-point-use";
    pub const DESIGNATION_USE: &str = "http://hl7.org/fhir/ValueSet/designation-use";
    pub const JURISDICTION: &str = "http://hl7.org/fhir/ValueSet/jurisdiction";
    pub const USAGE_CONTEXT_TYPE: &str = "http://hl7.org/fhir/ValueSet/usage-context-type";
    pub const RESOURCE_TYPES: &str = "http://hl7.org/fhir/ValueSet/resource-types";
    pub const MIME_TYPES: &str = "http://hl7.org/fhir/ValueSet/mimetypes";
    pub const SECURITY_LABELS: &str = "http://hl7.org/fhir/ValueSet/security-labels";
    pub const COMMON_TAGS: &str = "http://hl7.org/fhir/ValueSet/common-tags";
    pub const IDENTIFIER_TYPE: &str = "http://hl7.org/fhir/ValueSet/identifier-type";
    pub const MANUFACTURED_DOSE_FORM: &str = "http://hl7.org/fhir/ValueSet/manufactured-dose-form";
    pub const UNITS_OF_PRESENTATION: &str = "http://hl7.org/fhir/ValueSet/units-of-presentation";
    pub const PRODUCT_CHARACTERISTIC_CODES: &str =
        "http://hl7.org/fhir/ValueSet/product-characteristic-codes";
    pub const MEDICINAL_PRODUCT_TYPE: &str = "http://hl7.org/fhir/ValueSet/medicinal-product-type";
    pub const MEDICINAL_PRODUCT_DOMAIN: &str =
        "http://hl7.org/fhir/ValueSet/medicinal-product-domain";
    pub const LEGAL_STATUS_OF_SUPPLY: &str = "http://hl7.org/fhir/ValueSet/legal-status-of-supply";
    pub const COUNTRY: &str = "http://hl7.org/fhir/ValueSet/country";
}

/// Register every built-in kind
pub fn register_all(registry: &mut SchemaRegistry) {
    datatypes::register(registry);
    code_system::register(registry);
    concept_map::register(registry);
    manufactured_item::register(registry);
    medicinal_product::register(registry);
}
