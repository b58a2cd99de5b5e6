//! General-purpose datatypes

use super::vs;
use crate::primitive::PrimitiveType as P;
use crate::schema::{
    BindingStrength, ElementType, FieldDef, KindCategory, NodeKind, SchemaRegistry,
};

fn primitive(ty: P) -> ElementType {
    ElementType::Primitive(ty)
}

fn node(kind: &str) -> ElementType {
    ElementType::Node(kind.to_string())
}

pub(super) fn register(registry: &mut SchemaRegistry) {
    registry.register(
        NodeKind::define("Extension", KindCategory::Element)
            .description("Optional extensions element")
            .field(FieldDef::primitive("url", P::Uri).required())
            .field(FieldDef::choice(
                "value",
                [
                    primitive(P::Base64Binary),
                    primitive(P::Boolean),
                    primitive(P::Canonical),
                    primitive(P::Code),
                    primitive(P::Date),
                    primitive(P::DateTime),
                    primitive(P::Decimal),
                    primitive(P::Id),
                    primitive(P::Instant),
                    primitive(P::Integer),
                    primitive(P::Markdown),
                    primitive(P::Oid),
                    primitive(P::PositiveInt),
                    primitive(P::String),
                    primitive(P::Time),
                    primitive(P::UnsignedInt),
                    primitive(P::Uri),
                    primitive(P::Url),
                    node("Attachment"),
                    node("Coding"),
                    node("CodeableConcept"),
                    node("Identifier"),
                    node("Period"),
                    node("Quantity"),
                    node("Range"),
                    node("Reference"),
                ],
            ))
            .build(),
    );

    registry.register(
        NodeKind::define("Coding", KindCategory::Element)
            .description("A reference to a code defined by a terminology system")
            .field(FieldDef::primitive("system", P::Uri))
            .field(FieldDef::primitive("version", P::String))
            .field(FieldDef::primitive("code", P::Code))
            .field(FieldDef::primitive("display", P::String))
            .field(FieldDef::primitive("userSelected", P::Boolean))
            .build(),
    );

    registry.register(
        NodeKind::define("CodeableConcept", KindCategory::Element)
            .description("Concept - reference to a terminology or just text")
            .field(FieldDef::node("coding", "Coding").list())
            .field(FieldDef::primitive("text", P::String))
            .build(),
    );

    registry.register(
        NodeKind::define("Identifier", KindCategory::Element)
            .description("An identifier intended for computation")
            .field(
                FieldDef::primitive("use", P::Code)
                    .bound(BindingStrength::Required, vs::IDENTIFIER_USE),
            )
            .field(
                FieldDef::node("type", "CodeableConcept")
                    .bound(BindingStrength::Extensible, vs::IDENTIFIER_TYPE),
            )
            .field(FieldDef::primitive("system", P::Uri))
            .field(FieldDef::primitive("value", P::String))
            .field(FieldDef::node("period", "Period"))
            .field(FieldDef::reference("assigner", &["Organization"]))
            .build(),
    );

    registry.register(
        NodeKind::define("Reference", KindCategory::Element)
            .description("A reference from one resource to another")
            .field(FieldDef::primitive("reference", P::String))
            .field(
                FieldDef::primitive("type", P::Uri)
                    .bound(BindingStrength::Extensible, vs::RESOURCE_TYPES),
            )
            .field(FieldDef::node("identifier", "Identifier"))
            .field(FieldDef::primitive("display", P::String))
            .build(),
    );

    registry.register(
        NodeKind::define("Meta", KindCategory::Element)
            .description("Metadata about a resource")
            .field(FieldDef::primitive("versionId", P::Id))
            .field(FieldDef::primitive("lastUpdated", P::Instant))
            .field(FieldDef::primitive("source", P::Uri))
            .field(FieldDef::primitive("profile", P::Canonical).list())
            .field(
                FieldDef::node("security", "Coding")
                    .list()
                    .bound(BindingStrength::Extensible, vs::SECURITY_LABELS),
            )
            .field(
                FieldDef::node("tag", "Coding")
                    .list()
                    .bound(BindingStrength::Example, vs::COMMON_TAGS),
            )
            .build(),
    );

    registry.register(
        NodeKind::define("Narrative", KindCategory::Element)
            .description("Human-readable summary of the resource")
            .field(
                FieldDef::primitive("status", P::Code)
                    .required()
                    .bound(BindingStrength::Required, vs::NARRATIVE_STATUS),
            )
            .field(FieldDef::primitive("div", P::Xhtml).required())
            .build(),
    );

    registry.register(
        NodeKind::define("Period", KindCategory::Element)
            .description("Time range defined by start and end date/time")
            .field(FieldDef::primitive("start", P::DateTime))
            .field(FieldDef::primitive("end", P::DateTime))
            .build(),
    );

    registry.register(
        NodeKind::define("Quantity", KindCategory::Element)
            .description("A measured or measurable amount")
            .field(FieldDef::primitive("value", P::Decimal))
            .field(
                FieldDef::primitive("comparator", P::Code)
                    .bound(BindingStrength::Required, vs::QUANTITY_COMPARATOR),
            )
            .field(FieldDef::primitive("unit", P::String))
            .field(FieldDef::primitive("system", P::Uri))
            .field(FieldDef::primitive("code", P::Code))
            .build(),
    );

    registry.register(
        NodeKind::define("Range", KindCategory::Element)
            .description("Set of values bounded by low and high")
            .field(FieldDef::node("low", "Quantity"))
            .field(FieldDef::node("high", "Quantity"))
            .build(),
    );

    registry.register(
        NodeKind::define("ContactPoint", KindCategory::Element)
            .description("Details of a Technology mediated contact point")
            .field(
                FieldDef::primitive("system", P::Code)
                    .bound(BindingStrength::Required, vs::CONTACT_POINT_SYSTEM),
            )
            .field(FieldDef::primitive("value", P::String))
            .field(
                FieldDef::primitive("use", P::Code)
                    .bound(BindingStrength::Required, vs::CONTACT_POINT_USE),
            )
            .field(FieldDef::primitive("rank", P::PositiveInt))
            .field(FieldDef::node("period", "Period"))
            .build(),
    );

    registry.register(
        NodeKind::define("ContactDetail", KindCategory::Element)
            .description("Contact information")
            .field(FieldDef::primitive("name", P::String))
            .field(FieldDef::node("telecom", "ContactPoint").list())
            .build(),
    );

    registry.register(
        NodeKind::define("UsageContext", KindCategory::Element)
            .description("Describes the context of use for a conformance or knowledge resource")
            .field(
                FieldDef::node("code", "Coding")
                    .required()
                    .bound(BindingStrength::Extensible, vs::USAGE_CONTEXT_TYPE),
            )
            .field(
                FieldDef::choice(
                    "value",
                    [
                        node("CodeableConcept"),
                        node("Quantity"),
                        node("Range"),
                        node("Reference"),
                    ],
                )
                .required()
                .references(&[
                    "PlanDefinition",
                    "ResearchStudy",
                    "InsurancePlan",
                    "HealthcareService",
                    "Group",
                    "Location",
                    "Organization",
                ]),
            )
            .build(),
    );

    registry.register(
        NodeKind::define("Attachment", KindCategory::Element)
            .description("Content in a format defined elsewhere")
            .field(
                FieldDef::primitive("contentType", P::Code)
                    .bound(BindingStrength::Required, vs::MIME_TYPES),
            )
            .field(
                FieldDef::primitive("language", P::Code)
                    .bound(BindingStrength::Preferred, vs::LANGUAGES),
            )
            .field(FieldDef::primitive("data", P::Base64Binary))
            .field(FieldDef::primitive("url", P::Url))
            .field(FieldDef::primitive("size", P::UnsignedInt))
            .field(FieldDef::primitive("hash", P::Base64Binary))
            .field(FieldDef::primitive("title", P::String))
            .field(FieldDef::primitive("creation", P::DateTime))
            .build(),
    );

    registry.register(
        NodeKind::define("MarketingStatus", KindCategory::BackboneElement)
            .description("The marketing status describes the date when a medicinal product is actually put on the market")
            .field(
                FieldDef::node("country", "CodeableConcept")
                    .required()
                    .bound(BindingStrength::Example, vs::COUNTRY),
            )
            .field(
                FieldDef::node("jurisdiction", "CodeableConcept")
                    .bound(BindingStrength::Example, vs::JURISDICTION),
            )
            .field(FieldDef::node("status", "CodeableConcept").required())
            .field(FieldDef::node("dateRange", "Period").required())
            .field(FieldDef::primitive("restoreDate", P::DateTime))
            .build(),
    );
}
