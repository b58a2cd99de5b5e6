//! FHIR JSON reading and canonical writing
//!
//! Parsing builds every node bottom-up through [`NodeBuilder`], so each node
//! is validated as it is built. Choice fields are read from `<name><Type>`
//! keys. Writing goes through a [`Visitor`] and emits keys in declared field
//! order, `resourceType` first for resources.

use crate::builder::NodeBuilder;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::primitive::{Primitive, PrimitiveType};
use crate::schema::{self, ElementType, FieldDef, NodeKind, SchemaRegistry};
use crate::validation::ValidationContext;
use crate::value::Value;
use crate::visitor::Visitor;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use std::sync::Arc;

/// Parse a FHIR JSON resource with the standard registry and current settings
pub fn parse(value: &JsonValue) -> Result<Node> {
    parse_with(schema::standard(), &ValidationContext::current(), value)
}

pub fn parse_str(input: &str) -> Result<Node> {
    let value: JsonValue = serde_json::from_str(input)?;
    parse(&value)
}

/// Parse a FHIR JSON resource; `resourceType` selects the kind
pub fn parse_with(
    registry: &SchemaRegistry,
    ctx: &ValidationContext,
    value: &JsonValue,
) -> Result<Node> {
    let obj = value
        .as_object()
        .ok_or_else(|| Error::parse("$", "expected a JSON object for the resource"))?;
    let resource_type = obj
        .get("resourceType")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::parse("$", "missing resourceType property"))?;

    let kind = registry.kind(resource_type)?;
    if !kind.is_resource() {
        return Err(Error::parse(
            resource_type,
            format!("{} is not a resource kind", resource_type),
        ));
    }

    Reader { registry, ctx }.node(kind, obj)
}

/// Parse a JSON object as a node of the named kind (datatypes and backbone
/// elements included)
pub fn parse_node(
    registry: &SchemaRegistry,
    ctx: &ValidationContext,
    kind: &str,
    value: &JsonValue,
) -> Result<Node> {
    let kind = registry.kind(kind)?;
    let obj = value
        .as_object()
        .ok_or_else(|| Error::parse(kind.name(), "expected a JSON object"))?;
    Reader { registry, ctx }.node(kind, obj)
}

/// Canonical JSON representation of a node
pub fn to_json(node: &Node) -> JsonValue {
    let mut writer = JsonWriter::default();
    node.accept(&mut writer);
    writer.result.unwrap_or(JsonValue::Null)
}

struct Reader<'a> {
    registry: &'a SchemaRegistry,
    ctx: &'a ValidationContext,
}

impl Reader<'_> {
    fn node(&self, kind: Arc<NodeKind>, obj: &Map<String, JsonValue>) -> Result<Node> {
        let mut builder = NodeBuilder::new(kind.clone());
        let mut filled = HashSet::new();

        for (key, json) in obj {
            // Primitive extensions (`_field`) are not modelled.
            if key.starts_with('_') || (key == "resourceType" && kind.is_resource()) {
                continue;
            }

            let (field, ty) = self.resolve_key(&kind, key)?;
            let path = kind.path_of(&field.name);

            // Only choice fields can be named by more than one key.
            if !filled.insert(field.name.as_str()) {
                return Err(Error::parse(
                    &path,
                    format!("more than one value for choice field ({})", field.type_names()),
                ));
            }

            if field.is_list() {
                let items = json
                    .as_array()
                    .ok_or_else(|| Error::parse(&path, "expected an array"))?;
                let values = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        if item.is_null() {
                            Ok(None)
                        } else {
                            self.value(ty, item, &format!("{}[{}]", path, i)).map(Some)
                        }
                    })
                    .collect::<Result<Vec<_>>>()?;
                builder = builder.add_nullable(&field.name, values)?;
            } else {
                if json.is_array() {
                    return Err(Error::parse(&path, "expected a single value, found an array"));
                }
                if json.is_null() {
                    return Err(Error::parse(&path, "null is not a valid value"));
                }
                builder.put(&field.name, self.value(ty, json, &path)?)?;
            }
        }

        builder.build_with(self.ctx)
    }

    /// Map a JSON key to its field and, for choice keys, the alternative named
    /// by the suffix
    fn resolve_key<'k>(
        &self,
        kind: &'k NodeKind,
        key: &str,
    ) -> Result<(&'k FieldDef, &'k ElementType)> {
        if let Some(field) = kind.field(key) {
            if field.is_choice() {
                return Err(Error::parse(
                    kind.path_of(key),
                    format!("choice field needs a type suffix ({})", field.type_names()),
                ));
            }
            return Ok((field, &field.types[0]));
        }

        let field = kind
            .fields()
            .iter()
            .filter(|f| f.is_choice())
            .find(|f| {
                key.strip_prefix(f.name.as_str())
                    .and_then(|suffix| suffix.chars().next())
                    .map_or(false, char::is_uppercase)
            })
            .ok_or_else(|| Error::parse(kind.path_of(key), "unknown element"))?;

        let suffix = &key[field.name.len()..];
        match field.types.iter().find(|t| capitalize(t.name()) == suffix) {
            Some(ty) => Ok((field, ty)),
            None => Err(Error::InvalidChoiceType {
                path: kind.path_of(&field.name),
                found: self.suffix_type_name(suffix),
                allowed: field.type_names(),
            }),
        }
    }

    /// Type name a choice suffix stands for, when it names a known type
    fn suffix_type_name(&self, suffix: &str) -> String {
        if self.registry.contains(suffix) {
            return suffix.to_string();
        }
        let lowered = decapitalize(suffix);
        match PrimitiveType::from_code(&lowered) {
            Some(ty) => ty.code().to_string(),
            None => suffix.to_string(),
        }
    }

    fn value(&self, ty: &ElementType, json: &JsonValue, path: &str) -> Result<Value> {
        match ty {
            ElementType::Primitive(p) => Primitive::from_json(*p, json)
                .map(Value::Primitive)
                .map_err(|message| Error::parse(path, message)),
            ElementType::Node(kind) => {
                let obj = json
                    .as_object()
                    .ok_or_else(|| Error::parse(path, format!("expected a {} object", kind)))?;
                let kind = self.registry.kind(kind)?;
                self.node(kind, obj).map(Value::Node)
            }
            ElementType::Resource => {
                let obj = json
                    .as_object()
                    .ok_or_else(|| Error::parse(path, "expected a resource object"))?;
                let resource_type = obj
                    .get("resourceType")
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| Error::parse(path, "missing resourceType property"))?;
                let kind = self.registry.kind(resource_type)?;
                if !kind.is_resource() {
                    return Err(Error::parse(
                        path,
                        format!("{} is not a resource kind", resource_type),
                    ));
                }
                self.node(kind, obj).map(Value::Node)
            }
        }
    }
}

struct Frame {
    kind: Arc<NodeKind>,
    object: Map<String, JsonValue>,
    list: Option<Vec<JsonValue>>,
}

#[derive(Default)]
struct JsonWriter {
    stack: Vec<Frame>,
    result: Option<JsonValue>,
}

impl JsonWriter {
    fn emit(&mut self, name: &str, type_name: &str, json: JsonValue) {
        let Some(frame) = self.stack.last_mut() else {
            self.result = Some(json);
            return;
        };

        if let Some(list) = frame.list.as_mut() {
            list.push(json);
            return;
        }

        let key = match frame.kind.field(name) {
            Some(field) if field.is_choice() => format!("{}{}", name, capitalize(type_name)),
            _ => name.to_string(),
        };
        frame.object.insert(key, json);
    }
}

impl Visitor for JsonWriter {
    fn visit_start(&mut self, _name: &str, _index: Option<usize>, node: &Node) {
        let mut object = Map::new();
        if node.kind().is_resource() {
            object.insert(
                "resourceType".to_string(),
                JsonValue::String(node.kind_name().to_string()),
            );
        }
        self.stack.push(Frame {
            kind: node.kind().clone(),
            object,
            list: None,
        });
    }

    fn visit_list_start(&mut self, _name: &str, len: usize) {
        if let Some(frame) = self.stack.last_mut() {
            frame.list = Some(Vec::with_capacity(len));
        }
    }

    fn visit_list_end(&mut self, name: &str) {
        if let Some(frame) = self.stack.last_mut() {
            let items = frame.list.take().unwrap_or_default();
            frame
                .object
                .insert(name.to_string(), JsonValue::Array(items));
        }
    }

    fn visit_primitive(&mut self, name: &str, _index: Option<usize>, value: &Primitive) {
        self.emit(name, value.primitive_type().code(), value.to_json());
    }

    fn visit_end(&mut self, name: &str, _index: Option<usize>, node: &Node) {
        if let Some(frame) = self.stack.pop() {
            self.emit(name, node.kind_name(), JsonValue::Object(frame.object));
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
