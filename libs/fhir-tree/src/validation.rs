//! Build-time validation
//!
//! A candidate node is checked field by field in declared order, base fields
//! first. The first violation aborts the build. Findings at weaker binding
//! strengths never block construction; they are returned as warnings.
//!
//! Validation only looks at the current level: children are already-built
//! nodes that passed their own checks.

use crate::builder::PendingValue;
use crate::config::{BindingMode, ModelConfig};
use crate::error::{Error, Result};
use crate::node::{FieldValue, Node};
use crate::schema::{Binding, BindingStrength, FieldDef, NodeKind};
use crate::terminology::{self, TerminologyProvider};
use crate::value::Value;
use crate::visitor::Visitor;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Literal reference: `[base/]Kind/id[/_history/version]`
static LITERAL_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((https?)://([A-Za-z0-9\-\\.:%$]*/)+)?([A-Z][A-Za-z]+)/[A-Za-z0-9\-.]{1,64}(/_history/[A-Za-z0-9\-.]{1,64})?$",
    )
    .expect("valid regex")
});

const STRUCTURE_DEFINITION_BASE: &str = "http://hl7.org/fhir/StructureDefinition/";

/// Switches and services used while validating
#[derive(Clone)]
pub struct ValidationContext {
    /// When false, `build()` skips validation entirely
    pub enabled: bool,
    pub reference_types: bool,
    pub bindings: BindingMode,
    pub terminology: Arc<dyn TerminologyProvider>,
}

impl ValidationContext {
    /// Context built from the installed configuration and terminology provider
    pub fn current() -> Self {
        Self::from_config(&ModelConfig::current(), terminology::provider())
    }

    pub fn from_config(config: &ModelConfig, terminology: Arc<dyn TerminologyProvider>) -> Self {
        Self {
            enabled: config.validation,
            reference_types: config.reference_types,
            bindings: config.bindings,
            terminology,
        }
    }

    /// Every check enabled, using the given terminology
    pub fn new(terminology: Arc<dyn TerminologyProvider>) -> Self {
        Self::from_config(&ModelConfig::default(), terminology)
    }

    /// Context under which `build()` performs no semantic checks
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::current()
        }
    }

    pub fn with_terminology(mut self, terminology: Arc<dyn TerminologyProvider>) -> Self {
        self.terminology = terminology;
        self
    }

    pub fn with_bindings(mut self, bindings: BindingMode) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_reference_types(mut self, enabled: bool) -> Self {
        self.reference_types = enabled;
        self
    }
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("enabled", &self.enabled)
            .field("reference_types", &self.reference_types)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

/// Individual validation issue
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: IssueCode,
    pub diagnostics: String,
    pub location: Option<String>,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, diagnostics: String) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code,
            diagnostics,
            location: None,
        }
    }

    pub fn warning(code: IssueCode, diagnostics: String) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            code,
            diagnostics,
            location: None,
        }
    }

    pub fn with_location(mut self, location: String) -> Self {
        self.location = Some(location);
        self
    }

    /// Issue describing a failed build
    pub fn from_error(error: &Error) -> Self {
        let code = match error {
            Error::MissingRequiredField { .. } | Error::EmptyRequiredList { .. } => {
                IssueCode::Required
            }
            Error::NullListElement { .. }
            | Error::InvalidChoiceType { .. }
            | Error::InvalidFieldType { .. }
            | Error::EmptyElement { .. }
            | Error::Parse { .. }
            | Error::Json(_) => IssueCode::Structure,
            Error::InvalidReferenceTarget { .. } => IssueCode::Value,
            Error::InvalidCodedValue { .. } => IssueCode::CodeInvalid,
            Error::UnknownKind(_) => IssueCode::NotSupported,
            Error::InvalidArgument(_) | Error::Yaml(_) | Error::Io(_) => IssueCode::Invalid,
        };

        let issue = Self::error(code, error.to_string());
        match error.path() {
            Some(path) => issue.with_location(path.to_string()),
            None => issue,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let mut issue = serde_json::json!({
            "severity": self.severity.to_string().to_lowercase(),
            "code": self.code.to_string(),
            "diagnostics": self.diagnostics,
        });

        if let Some(ref loc) = self.location {
            issue["location"] = serde_json::json!([loc]);
        }

        issue
    }
}

/// OperationOutcome resource listing the given issues
pub fn operation_outcome(issues: &[ValidationIssue]) -> JsonValue {
    serde_json::json!({
        "resourceType": "OperationOutcome",
        "issue": issues.iter().map(ValidationIssue::to_json).collect::<Vec<_>>()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Fatal,
    Error,
    Warning,
    Information,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal => write!(f, "Fatal"),
            Self::Error => write!(f, "Error"),
            Self::Warning => write!(f, "Warning"),
            Self::Information => write!(f, "Information"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCode {
    Invalid,
    Structure,
    Required,
    Value,
    CodeInvalid,
    NotSupported,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Invalid => "invalid",
            Self::Structure => "structure",
            Self::Required => "required",
            Self::Value => "value",
            Self::CodeInvalid => "code-invalid",
            Self::NotSupported => "not-supported",
        };
        write!(f, "{}", s)
    }
}

/// Re-run the checks of the current level on a built node
pub fn validate(node: &Node) -> Result<Vec<ValidationIssue>> {
    validate_with(node, &ValidationContext::current())
}

/// Re-run the checks of the current level under an explicit context
///
/// Runs even when `ctx.enabled` is false; that switch only governs `build()`.
pub fn validate_with(node: &Node, ctx: &ValidationContext) -> Result<Vec<ValidationIssue>> {
    let slots: Vec<SlotRef<'_>> = node.field_values().iter().map(SlotRef::from).collect();
    FieldChecker::new(node.kind(), ctx).run(&slots)
}

/// Validate every node of a tree, depth-first in traversal order
///
/// Useful for trees built with validation disabled. Stops at the first error.
pub fn validate_tree(node: &Node, ctx: &ValidationContext) -> Result<Vec<ValidationIssue>> {
    let mut validator = TreeValidator {
        ctx,
        issues: Vec::new(),
        error: None,
    };
    node.accept(&mut validator);

    match validator.error {
        Some(error) => Err(error),
        None => Ok(validator.issues),
    }
}

pub(crate) fn validate_pending(
    kind: &NodeKind,
    slots: &[PendingValue],
    ctx: &ValidationContext,
) -> Result<Vec<ValidationIssue>> {
    let slots: Vec<SlotRef<'_>> = slots.iter().map(SlotRef::from).collect();
    FieldChecker::new(kind, ctx).run(&slots)
}

/// Target kinds named by a `Reference` node
///
/// Reads `type` and literal `reference` values. Fragment (`#id`) and URN
/// references name no kind.
pub fn reference_targets(reference: &Node) -> Vec<String> {
    let mut targets = Vec::new();

    if let Some(ty) = reference.get_str("type") {
        let name = ty.strip_prefix(STRUCTURE_DEFINITION_BASE).unwrap_or(ty);
        targets.push(name.to_string());
    }

    if let Some(literal) = reference.get_str("reference") {
        if !literal.starts_with('#') && !literal.starts_with("urn:") {
            if let Some(kind) = LITERAL_REFERENCE
                .captures(literal)
                .and_then(|caps| caps.get(4))
            {
                let kind = kind.as_str().to_string();
                if !targets.contains(&kind) {
                    targets.push(kind);
                }
            }
        }
    }

    targets
}

/// Codes carried by a value, for binding checks
fn coded_values(value: &Value) -> Vec<&str> {
    match value {
        Value::Primitive(p) if p.primitive_type().is_coded() => p.as_str().into_iter().collect(),
        Value::Primitive(_) => Vec::new(),
        Value::Node(node) => match node.kind_name() {
            "Coding" => node.get_str("code").into_iter().collect(),
            "CodeableConcept" => node
                .get_nodes("coding")
                .filter_map(|coding| coding.get_str("code"))
                .collect(),
            _ => Vec::new(),
        },
    }
}

/// Borrowed view of one field slot, pending or built
enum SlotRef<'a> {
    Empty,
    Single(&'a Value),
    Pending(&'a [Option<Value>]),
    List(&'a [Value]),
}

impl SlotRef<'_> {
    fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Single(_) => false,
            Self::Pending(values) => values.is_empty(),
            Self::List(values) => values.is_empty(),
        }
    }
}

impl<'a> From<&'a PendingValue> for SlotRef<'a> {
    fn from(value: &'a PendingValue) -> Self {
        match value {
            PendingValue::Empty => Self::Empty,
            PendingValue::Single(v) => Self::Single(v),
            PendingValue::List(values) => Self::Pending(values),
        }
    }
}

impl<'a> From<&'a FieldValue> for SlotRef<'a> {
    fn from(value: &'a FieldValue) -> Self {
        match value {
            FieldValue::Empty => Self::Empty,
            FieldValue::Single(v) => Self::Single(v),
            FieldValue::List(values) => Self::List(values),
        }
    }
}

struct FieldChecker<'a> {
    kind: &'a NodeKind,
    ctx: &'a ValidationContext,
    issues: Vec<ValidationIssue>,
}

impl<'a> FieldChecker<'a> {
    fn new(kind: &'a NodeKind, ctx: &'a ValidationContext) -> Self {
        Self {
            kind,
            ctx,
            issues: Vec::new(),
        }
    }

    fn run(mut self, slots: &[SlotRef<'_>]) -> Result<Vec<ValidationIssue>> {
        // Field order is base fields, then own fields.
        for (field, slot) in self.kind.fields().iter().zip(slots) {
            self.check_field(field, slot)?;
        }

        if !self.kind.is_resource()
            && !self.kind.allow_empty()
            && slots.iter().all(SlotRef::is_empty)
        {
            return Err(Error::EmptyElement {
                path: self.kind.name().to_string(),
            });
        }

        Ok(self.issues)
    }

    fn check_field(&mut self, field: &FieldDef, slot: &SlotRef<'_>) -> Result<()> {
        let path = self.kind.path_of(&field.name);

        match slot {
            SlotRef::Empty if field.is_required() => {
                if field.is_list() {
                    Err(Error::EmptyRequiredList { path })
                } else {
                    Err(Error::MissingRequiredField { path })
                }
            }
            SlotRef::Empty => Ok(()),
            SlotRef::Single(value) => self.check_value(field, value, &path),
            SlotRef::Pending(values) => {
                if values.is_empty() && field.is_required() {
                    return Err(Error::EmptyRequiredList { path });
                }
                for (index, value) in values.iter().enumerate() {
                    let value = value
                        .as_ref()
                        .ok_or_else(|| Error::NullListElement {
                            path: path.clone(),
                            index,
                        })?;
                    self.check_value(field, value, &format!("{}[{}]", path, index))?;
                }
                Ok(())
            }
            SlotRef::List(values) => {
                if values.is_empty() && field.is_required() {
                    return Err(Error::EmptyRequiredList { path });
                }
                for (index, value) in values.iter().enumerate() {
                    self.check_value(field, value, &format!("{}[{}]", path, index))?;
                }
                Ok(())
            }
        }
    }

    fn check_value(&mut self, field: &FieldDef, value: &Value, path: &str) -> Result<()> {
        if !field.accepts(value) {
            let found = value.type_name().to_string();
            return Err(if field.is_choice() {
                Error::InvalidChoiceType {
                    path: path.to_string(),
                    found,
                    allowed: field.type_names(),
                }
            } else {
                Error::InvalidFieldType {
                    path: path.to_string(),
                    found,
                    expected: field.type_names(),
                }
            });
        }

        if self.ctx.reference_types {
            check_reference(field, value, path)?;
        }

        if let Some(binding) = &field.binding {
            self.check_binding(binding, value, path)?;
        }

        Ok(())
    }

    fn check_binding(&mut self, binding: &Binding, value: &Value, path: &str) -> Result<()> {
        let required = binding.strength == BindingStrength::Required;
        match self.ctx.bindings {
            BindingMode::Off => return Ok(()),
            BindingMode::RequiredOnly if !required => return Ok(()),
            _ => {}
        }

        let codes = coded_values(value);
        if codes.is_empty() {
            return Ok(());
        }

        let member = codes.iter().any(|code| {
            self.ctx
                .terminology
                .is_member(code, &binding.value_set, binding.strength)
        });
        if member {
            return Ok(());
        }

        let code = codes.join(", ");
        if required {
            return Err(Error::InvalidCodedValue {
                path: path.to_string(),
                code,
                value_set: binding.value_set.clone(),
            });
        }

        self.issues.push(
            ValidationIssue::warning(
                IssueCode::CodeInvalid,
                format!(
                    "Code '{}' is not in the {} value set {}",
                    code, binding.strength, binding.value_set
                ),
            )
            .with_location(path.to_string()),
        );
        Ok(())
    }
}

fn check_reference(field: &FieldDef, value: &Value, path: &str) -> Result<()> {
    if field.target_kinds.is_empty() || field.target_kinds.iter().any(|t| t == "Resource") {
        return Ok(());
    }

    let Some(reference) = value.as_node().filter(|n| n.kind_name() == "Reference") else {
        return Ok(());
    };

    for target in reference_targets(reference) {
        if !field.target_kinds.contains(&target) {
            return Err(Error::InvalidReferenceTarget {
                path: path.to_string(),
                target,
                allowed: field.target_kinds.join(", "),
            });
        }
    }

    Ok(())
}

struct TreeValidator<'a> {
    ctx: &'a ValidationContext,
    issues: Vec<ValidationIssue>,
    error: Option<Error>,
}

impl Visitor for TreeValidator<'_> {
    fn pre_visit(&mut self, _node: &Node) -> bool {
        self.error.is_none()
    }

    fn visit(&mut self, _name: &str, _index: Option<usize>, node: &Node) -> bool {
        match validate_with(node, self.ctx) {
            Ok(issues) => {
                self.issues.extend(issues);
                true
            }
            Err(error) => {
                self.error = Some(error);
                false
            }
        }
    }
}
