//! CodeSystem and its backbone elements

use super::vs;
use crate::primitive::PrimitiveType as P;
use crate::schema::{
    BindingStrength, ElementType, FieldDef, KindCategory, NodeKind, SchemaRegistry,
};

pub(super) fn register(registry: &mut SchemaRegistry) {
    registry.register(
        NodeKind::define("CodeSystem", KindCategory::DomainResource)
            .description("Declares the existence of and describes a code system or code system supplement")
            .field(FieldDef::primitive("url", P::Uri))
            .field(FieldDef::node("identifier", "Identifier").list())
            .field(FieldDef::primitive("version", P::String))
            .field(FieldDef::primitive("name", P::String))
            .field(FieldDef::primitive("title", P::String))
            .field(
                FieldDef::primitive("status", P::Code)
                    .required()
                    .bound(BindingStrength::Required, vs::PUBLICATION_STATUS),
            )
            .field(FieldDef::primitive("experimental", P::Boolean))
            .field(FieldDef::primitive("date", P::DateTime))
            .field(FieldDef::primitive("publisher", P::String))
            .field(FieldDef::node("contact", "ContactDetail").list())
            .field(FieldDef::primitive("description", P::Markdown))
            .field(FieldDef::node("useContext", "UsageContext").list())
            .field(
                FieldDef::node("jurisdiction", "CodeableConcept")
                    .list()
                    .bound(BindingStrength::Extensible, vs::JURISDICTION),
            )
            .field(FieldDef::primitive("purpose", P::Markdown))
            .field(FieldDef::primitive("copyright", P::Markdown))
            .field(FieldDef::primitive("caseSensitive", P::Boolean))
            .field(FieldDef::primitive("valueSet", P::Canonical))
            .field(
                FieldDef::primitive("hierarchyMeaning", P::Code)
                    .bound(BindingStrength::Required, vs::CODESYSTEM_HIERARCHY_MEANING),
            )
            .field(FieldDef::primitive("compositional", P::Boolean))
            .field(FieldDef::primitive("versionNeeded", P::Boolean))
            .field(
                FieldDef::primitive("content", P::Code)
                    .required()
                    .bound(BindingStrength::Required, vs::CODESYSTEM_CONTENT_MODE),
            )
            .field(FieldDef::primitive("supplements", P::Canonical))
            .field(FieldDef::primitive("count", P::UnsignedInt))
            .field(FieldDef::node("filter", "CodeSystem.filter").list())
            .field(FieldDef::node("property", "CodeSystem.property").list())
            .field(FieldDef::node("concept", "CodeSystem.concept").list())
            .build(),
    );

    registry.register(
        NodeKind::define("CodeSystem.filter", KindCategory::BackboneElement)
            .description("Filter that can be used in a value set")
            .field(FieldDef::primitive("code", P::Code).required())
            .field(FieldDef::primitive("description", P::String))
            .field(
                FieldDef::primitive("operator", P::Code)
                    .required()
                    .list()
                    .bound(BindingStrength::Required, vs::FILTER_OPERATOR),
            )
            .field(FieldDef::primitive("value", P::String).required())
            .build(),
    );

    registry.register(
        NodeKind::define("CodeSystem.property", KindCategory::BackboneElement)
            .description("Additional information supplied about each concept")
            .field(FieldDef::primitive("code", P::Code).required())
            .field(FieldDef::primitive("uri", P::Uri))
            .field(FieldDef::primitive("description", P::String))
            .field(
                FieldDef::primitive("type", P::Code)
                    .required()
                    .bound(BindingStrength::Required, vs::CONCEPT_PROPERTY_TYPE),
            )
            .build(),
    );

    registry.register(
        NodeKind::define("CodeSystem.concept", KindCategory::BackboneElement)
            .description("Concepts in the code system")
            .field(FieldDef::primitive("code", P::Code).required())
            .field(FieldDef::primitive("display", P::String))
            .field(FieldDef::primitive("definition", P::String))
            .field(FieldDef::node("designation", "CodeSystem.concept.designation").list())
            .field(FieldDef::node("property", "CodeSystem.concept.property").list())
            .field(FieldDef::node("concept", "CodeSystem.concept").list())
            .build(),
    );

    registry.register(
        NodeKind::define("CodeSystem.concept.designation", KindCategory::BackboneElement)
            .description("Additional representations for the concept")
            .field(
                FieldDef::primitive("language", P::Code)
                    .bound(BindingStrength::Preferred, vs::LANGUAGES),
            )
            .field(
                FieldDef::node("use", "Coding")
                    .bound(BindingStrength::Extensible, vs::DESIGNATION_USE),
            )
            .field(FieldDef::primitive("value", P::String).required())
            .build(),
    );

    registry.register(
        NodeKind::define("CodeSystem.concept.property", KindCategory::BackboneElement)
            .description("Property value for the concept")
            .field(FieldDef::primitive("code", P::Code).required())
            .field(
                FieldDef::choice(
                    "value",
                    [
                        ElementType::Primitive(P::Code),
                        ElementType::Node("Coding".to_string()),
                        ElementType::Primitive(P::String),
                        ElementType::Primitive(P::Integer),
                        ElementType::Primitive(P::Boolean),
                        ElementType::Primitive(P::DateTime),
                        ElementType::Primitive(P::Decimal),
                    ],
                )
                .required(),
            )
            .build(),
    );
}
