//! ConceptMap and its backbone elements

use super::vs;
use crate::primitive::PrimitiveType as P;
use crate::schema::{
    BindingStrength, ElementType, FieldDef, KindCategory, NodeKind, SchemaRegistry,
};

pub(super) fn register(registry: &mut SchemaRegistry) {
    registry.register(
        NodeKind::define("ConceptMap", KindCategory::DomainResource)
            .description("A map from one set of concepts to one or more other concepts")
            .field(FieldDef::primitive("url", P::Uri))
            .field(FieldDef::node("identifier", "Identifier"))
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
            .field(FieldDef::choice(
                "source",
                [
                    ElementType::Primitive(P::Uri),
                    ElementType::Primitive(P::Canonical),
                ],
            ))
            .field(FieldDef::choice(
                "target",
                [
                    ElementType::Primitive(P::Uri),
                    ElementType::Primitive(P::Canonical),
                ],
            ))
            .field(FieldDef::node("group", "ConceptMap.group").list())
            .build(),
    );

    registry.register(
        NodeKind::define("ConceptMap.group", KindCategory::BackboneElement)
            .description("Same source and target systems")
            .field(FieldDef::primitive("source", P::Uri))
            .field(FieldDef::primitive("sourceVersion", P::String))
            .field(FieldDef::primitive("target", P::Uri))
            .field(FieldDef::primitive("targetVersion", P::String))
            .field(
                FieldDef::node("element", "ConceptMap.group.element")
                    .required()
                    .list(),
            )
            .field(FieldDef::node("unmapped", "ConceptMap.group.unmapped"))
            .build(),
    );

    registry.register(
        NodeKind::define("ConceptMap.group.element", KindCategory::BackboneElement)
            .description("Mappings for a concept from the source set")
            .field(FieldDef::primitive("code", P::Code))
            .field(FieldDef::primitive("display", P::String))
            .field(FieldDef::node("target", "ConceptMap.group.element.target").list())
            .build(),
    );

    registry.register(
        NodeKind::define("ConceptMap.group.element.target", KindCategory::BackboneElement)
            .description("Concept in target system for element")
            .field(FieldDef::primitive("code", P::Code))
            .field(FieldDef::primitive("display", P::String))
            .field(
                FieldDef::primitive("equivalence", P::Code)
                    .required()
                    .bound(BindingStrength::Required, vs::CONCEPT_MAP_EQUIVALENCE),
            )
            .field(FieldDef::primitive("comment", P::String))
            .field(
                FieldDef::node("dependsOn", "ConceptMap.group.element.target.dependsOn").list(),
            )
            .field(FieldDef::node("product", "ConceptMap.group.element.target.dependsOn").list())
            .build(),
    );

    registry.register(
        NodeKind::define(
            "ConceptMap.group.element.target.dependsOn",
            KindCategory::BackboneElement,
        )
        .description("Other elements required for this mapping (from context)")
        .field(FieldDef::primitive("property", P::Uri).required())
        .field(FieldDef::primitive("system", P::Canonical))
        .field(FieldDef::primitive("value", P::String).required())
        .field(FieldDef::primitive("display", P::String))
        .build(),
    );

    registry.register(
        NodeKind::define("ConceptMap.group.unmapped", KindCategory::BackboneElement)
            .description("What to do when there is no mapping for the source concept")
            .field(
                FieldDef::primitive("mode", P::Code)
                    .required()
                    .bound(BindingStrength::Required, vs::CONCEPTMAP_UNMAPPED_MODE),
            )
            .field(FieldDef::primitive("code", P::Code))
            .field(FieldDef::primitive("display", P::String))
            .field(FieldDef::primitive("url", P::Canonical))
            .build(),
    );
}
