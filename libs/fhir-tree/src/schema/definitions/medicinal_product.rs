//! MedicinalProduct

use super::vs;
use crate::primitive::PrimitiveType as P;
use crate::schema::{
    BindingStrength, ElementType, FieldDef, KindCategory, NodeKind, SchemaRegistry,
};

pub(super) fn register(registry: &mut SchemaRegistry) {
    registry.register(
        NodeKind::define("MedicinalProduct", KindCategory::DomainResource)
            .description("Detailed definition of a medicinal product, typically for uses other than direct patient care")
            .field(FieldDef::node("identifier", "Identifier").list())
            .field(
                FieldDef::node("type", "CodeableConcept")
                    .bound(BindingStrength::Example, vs::MEDICINAL_PRODUCT_TYPE),
            )
            .field(
                FieldDef::node("domain", "Coding")
                    .bound(BindingStrength::Example, vs::MEDICINAL_PRODUCT_DOMAIN),
            )
            .field(FieldDef::node("combinedPharmaceuticalDoseForm", "CodeableConcept"))
            .field(
                FieldDef::node("legalStatusOfSupply", "CodeableConcept")
                    .bound(BindingStrength::Example, vs::LEGAL_STATUS_OF_SUPPLY),
            )
            .field(FieldDef::node("additionalMonitoringIndicator", "CodeableConcept"))
            .field(FieldDef::primitive("specialMeasures", P::String).list())
            .field(FieldDef::node("paediatricUseIndicator", "CodeableConcept"))
            .field(FieldDef::node("productClassification", "CodeableConcept").list())
            .field(FieldDef::node("marketingStatus", "MarketingStatus").list())
            .field(
                FieldDef::reference("pharmaceuticalProduct", &["MedicinalProductPharmaceutical"])
                    .list(),
            )
            .field(
                FieldDef::reference("packagedMedicinalProduct", &["MedicinalProductPackaged"])
                    .list(),
            )
            .field(FieldDef::reference("attachedDocument", &["DocumentReference"]).list())
            .field(FieldDef::reference("masterFile", &["DocumentReference"]).list())
            .field(FieldDef::reference("contact", &["Organization", "PractitionerRole"]).list())
            .field(FieldDef::reference("clinicalTrial", &["ResearchStudy"]).list())
            .field(
                FieldDef::node("name", "MedicinalProduct.name")
                    .required()
                    .list(),
            )
            .field(FieldDef::node("crossReference", "Identifier").list())
            .field(
                FieldDef::node(
                    "manufacturingBusinessOperation",
                    "MedicinalProduct.manufacturingBusinessOperation",
                )
                .list(),
            )
            .field(
                FieldDef::node("specialDesignation", "MedicinalProduct.specialDesignation")
                    .list(),
            )
            .build(),
    );

    registry.register(
        NodeKind::define("MedicinalProduct.name", KindCategory::BackboneElement)
            .description("The product's name, including full name and possibly coded parts")
            .field(FieldDef::primitive("productName", P::String).required())
            .field(FieldDef::node("namePart", "MedicinalProduct.name.namePart").list())
            .field(
                FieldDef::node("countryLanguage", "MedicinalProduct.name.countryLanguage").list(),
            )
            .build(),
    );

    registry.register(
        NodeKind::define("MedicinalProduct.name.namePart", KindCategory::BackboneElement)
            .description("Coding words or phrases of the name")
            .field(FieldDef::primitive("part", P::String).required())
            .field(FieldDef::node("type", "Coding").required())
            .build(),
    );

    registry.register(
        NodeKind::define(
            "MedicinalProduct.name.countryLanguage",
            KindCategory::BackboneElement,
        )
        .description("Country where the name applies")
        .field(FieldDef::node("country", "CodeableConcept").required())
        .field(FieldDef::node("jurisdiction", "CodeableConcept"))
        .field(FieldDef::node("language", "CodeableConcept").required())
        .build(),
    );

    registry.register(
        NodeKind::define(
            "MedicinalProduct.manufacturingBusinessOperation",
            KindCategory::BackboneElement,
        )
        .description("An operation applied to the product, for manufacturing or administrative purpose")
        .field(FieldDef::node("operationType", "CodeableConcept"))
        .field(FieldDef::node("authorisationReferenceNumber", "Identifier"))
        .field(FieldDef::primitive("effectiveDate", P::DateTime))
        .field(FieldDef::node("confidentialityIndicator", "CodeableConcept"))
        .field(FieldDef::reference("manufacturer", &["Organization"]).list())
        .field(FieldDef::reference("regulator", &["Organization"]))
        .build(),
    );

    registry.register(
        NodeKind::define(
            "MedicinalProduct.specialDesignation",
            KindCategory::BackboneElement,
        )
        .description("Indicates if the medicinal product has an orphan designation for the treatment of a rare disease")
        .field(FieldDef::node("identifier", "Identifier").list())
        .field(FieldDef::node("type", "CodeableConcept"))
        .field(FieldDef::node("intendedUse", "CodeableConcept"))
        .field(
            FieldDef::choice(
                "indication",
                [
                    ElementType::Node("CodeableConcept".to_string()),
                    ElementType::Node("Reference".to_string()),
                ],
            )
            .references(&["MedicinalProductIndication"]),
        )
        .field(FieldDef::node("status", "CodeableConcept"))
        .field(FieldDef::primitive("date", P::DateTime))
        .field(FieldDef::node("species", "CodeableConcept"))
        .build(),
    );
}
