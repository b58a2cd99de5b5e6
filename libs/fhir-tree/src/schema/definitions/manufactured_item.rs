//! ManufacturedItemDefinition

use super::vs;
use crate::primitive::PrimitiveType as P;
use crate::schema::{
    BindingStrength, ElementType, FieldDef, KindCategory, NodeKind, SchemaRegistry,
};

pub(super) fn register(registry: &mut SchemaRegistry) {
    registry.register(
        NodeKind::define("ManufacturedItemDefinition", KindCategory::DomainResource)
            .description("The definition and characteristics of a medicinal manufactured item")
            .field(FieldDef::node("identifier", "Identifier").list())
            .field(
                FieldDef::primitive("status", P::Code)
                    .required()
                    .bound(BindingStrength::Required, vs::PUBLICATION_STATUS),
            )
            .field(FieldDef::primitive("name", P::String))
            .field(
                FieldDef::node("manufacturedDoseForm", "CodeableConcept")
                    .required()
                    .bound(BindingStrength::Example, vs::MANUFACTURED_DOSE_FORM),
            )
            .field(
                FieldDef::node("unitOfPresentation", "CodeableConcept")
                    .bound(BindingStrength::Example, vs::UNITS_OF_PRESENTATION),
            )
            .field(FieldDef::reference("manufacturer", &["Organization"]).list())
            .field(FieldDef::node("marketingStatus", "MarketingStatus").list())
            .field(FieldDef::node("ingredient", "CodeableConcept").list())
            .field(FieldDef::node("property", "ManufacturedItemDefinition.property").list())
            .field(FieldDef::node("component", "ManufacturedItemDefinition.component").list())
            .build(),
    );

    registry.register(
        NodeKind::define("ManufacturedItemDefinition.property", KindCategory::BackboneElement)
            .description("General characteristics of this item")
            .field(
                FieldDef::node("type", "CodeableConcept")
                    .required()
                    .bound(BindingStrength::Example, vs::PRODUCT_CHARACTERISTIC_CODES),
            )
            .field(
                FieldDef::choice(
                    "value",
                    [
                        ElementType::Node("CodeableConcept".to_string()),
                        ElementType::Node("Quantity".to_string()),
                        ElementType::Primitive(P::Date),
                        ElementType::Primitive(P::Boolean),
                        ElementType::Primitive(P::Markdown),
                        ElementType::Node("Attachment".to_string()),
                        ElementType::Node("Reference".to_string()),
                    ],
                )
                .references(&["Binary"]),
            )
            .build(),
    );

    registry.register(
        NodeKind::define("ManufacturedItemDefinition.component", KindCategory::BackboneElement)
            .description("Physical parts of the manufactured item")
            .field(FieldDef::node("type", "CodeableConcept").required())
            .field(FieldDef::node("function", "CodeableConcept").list())
            .field(FieldDef::node("amount", "Quantity").list())
            .field(
                FieldDef::node(
                    "constituent",
                    "ManufacturedItemDefinition.component.constituent",
                )
                .list(),
            )
            .field(FieldDef::node("property", "ManufacturedItemDefinition.property").list())
            .field(FieldDef::node("component", "ManufacturedItemDefinition.component").list())
            .build(),
    );

    registry.register(
        NodeKind::define(
            "ManufacturedItemDefinition.component.constituent",
            KindCategory::BackboneElement,
        )
        .description("A reference to a constituent of the manufactured item")
        .field(FieldDef::node("amount", "Quantity").list())
        .field(FieldDef::node("location", "CodeableConcept").list())
        .field(FieldDef::node("function", "CodeableConcept").list())
        .field(FieldDef::reference("hasIngredient", &["Ingredient"]).list())
        .build(),
    );
}
