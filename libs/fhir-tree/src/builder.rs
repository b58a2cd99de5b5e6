//! Mutable builders that freeze into immutable nodes
//!
//! Setters only enforce structural shape (the field exists, scalar vs list,
//! no null collections); every semantic constraint is checked by
//! [`NodeBuilder::build`]. Building moves the pending values into the node,
//! so a builder can never alter a node it produced.

use crate::error::{Error, Result};
use crate::node::{FieldValue, Node};
use crate::schema::{FieldDef, NodeKind};
use crate::validation::{self, ValidationContext};
use crate::value::Value;
use std::sync::Arc;

/// Pending content of one field slot
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingValue {
    Empty,
    Single(Value),
    /// List entries; `None` marks a null entry received at an untyped boundary
    List(Vec<Option<Value>>),
}

#[derive(Debug, Clone)]
pub struct NodeBuilder {
    kind: Arc<NodeKind>,
    slots: Vec<PendingValue>,
}

impl NodeBuilder {
    pub fn new(kind: Arc<NodeKind>) -> Self {
        let slots = kind
            .fields()
            .iter()
            .map(|field| {
                if field.is_list() {
                    PendingValue::List(Vec::new())
                } else {
                    PendingValue::Empty
                }
            })
            .collect();

        Self { kind, slots }
    }

    /// Seed a builder with all of an existing node's values
    pub fn from_node(node: &Node) -> Self {
        let slots = node
            .field_values()
            .iter()
            .map(|value| match value {
                FieldValue::Empty => PendingValue::Empty,
                FieldValue::Single(v) => PendingValue::Single(v.clone()),
                FieldValue::List(values) => {
                    PendingValue::List(values.iter().cloned().map(Some).collect())
                }
            })
            .collect();

        Self {
            kind: node.kind().clone(),
            slots,
        }
    }

    pub fn kind(&self) -> &Arc<NodeKind> {
        &self.kind
    }

    /// Set a scalar field, replacing any previous value
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.put(name, value.into())?;
        Ok(self)
    }

    /// Set or clear a scalar field
    pub fn set_opt<V: Into<Value>>(mut self, name: &str, value: Option<V>) -> Result<Self> {
        match value {
            Some(v) => self.put(name, v.into())?,
            None => self.clear_field(name)?,
        }
        Ok(self)
    }

    /// Append values to a list field
    pub fn add<I, V>(mut self, name: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(name, values.into_iter().map(Into::into))?;
        Ok(self)
    }

    /// Append possibly-null entries to a list field
    ///
    /// Null entries are accepted here and rejected by `build()` with
    /// [`Error::NullListElement`].
    pub fn add_nullable<I>(mut self, name: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<Value>>,
    {
        let index = self.index_of(name, true)?;
        if let PendingValue::List(list) = &mut self.slots[index] {
            list.extend(values);
        }
        Ok(self)
    }

    /// Replace the whole content of a list field
    ///
    /// Fails immediately with [`Error::InvalidArgument`] when `values` is `None`.
    pub fn replace<I, V>(mut self, name: &str, values: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.ok_or_else(|| {
            Error::InvalidArgument(format!(
                "null collection passed for {}",
                self.kind.path_of(name)
            ))
        })?;
        self.put_list(name, values.into_iter().map(Into::into).collect())?;
        Ok(self)
    }

    /// Unset a field of either shape
    pub fn clear(mut self, name: &str) -> Result<Self> {
        self.clear_field(name)?;
        Ok(self)
    }

    /// Pending value of a scalar field
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.kind.field_index(name)?;
        match &self.slots[index] {
            PendingValue::Single(value) => Some(value),
            _ => None,
        }
    }

    /// Build the node, validating it when validation is enabled process-wide
    pub fn build(self) -> Result<Node> {
        let ctx = ValidationContext::current();
        self.build_with(&ctx)
    }

    /// Build the node under an explicit validation context
    pub fn build_with(self, ctx: &ValidationContext) -> Result<Node> {
        if ctx.enabled {
            let issues = validation::validate_pending(&self.kind, &self.slots, ctx)?;
            for issue in &issues {
                tracing::warn!(
                    kind = self.kind.name(),
                    location = issue.location.as_deref().unwrap_or_default(),
                    "{}",
                    issue.diagnostics
                );
            }
        }

        let fields = self.freeze()?;
        tracing::trace!(kind = self.kind.name(), "built node");
        Ok(Node::from_parts(self.kind, fields))
    }

    fn freeze(&self) -> Result<Vec<FieldValue>> {
        self.kind
            .fields()
            .iter()
            .zip(&self.slots)
            .map(|(field, slot)| freeze_slot(&self.kind, field, slot))
            .collect()
    }

    fn index_of(&self, name: &str, list: bool) -> Result<usize> {
        let index = self.kind.field_index(name).ok_or_else(|| {
            Error::InvalidArgument(format!("{} has no field '{}'", self.kind.name(), name))
        })?;

        let field = &self.kind.fields()[index];
        if field.is_list() != list {
            let shape = if field.is_list() { "list" } else { "scalar" };
            return Err(Error::InvalidArgument(format!(
                "{} is a {} field",
                self.kind.path_of(name),
                shape
            )));
        }

        Ok(index)
    }

    pub(crate) fn put(&mut self, name: &str, value: Value) -> Result<()> {
        let index = self.index_of(name, false)?;
        self.slots[index] = PendingValue::Single(value);
        Ok(())
    }

    pub(crate) fn push(&mut self, name: &str, values: impl IntoIterator<Item = Value>) -> Result<()> {
        let index = self.index_of(name, true)?;
        if let PendingValue::List(list) = &mut self.slots[index] {
            list.extend(values.into_iter().map(Some));
        }
        Ok(())
    }

    pub(crate) fn put_list(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        let index = self.index_of(name, true)?;
        self.slots[index] = PendingValue::List(values.into_iter().map(Some).collect());
        Ok(())
    }

    pub(crate) fn clear_field(&mut self, name: &str) -> Result<()> {
        let index = self.kind.field_index(name).ok_or_else(|| {
            Error::InvalidArgument(format!("{} has no field '{}'", self.kind.name(), name))
        })?;
        self.slots[index] = if self.kind.fields()[index].is_list() {
            PendingValue::List(Vec::new())
        } else {
            PendingValue::Empty
        };
        Ok(())
    }
}

impl From<&Node> for NodeBuilder {
    fn from(node: &Node) -> Self {
        Self::from_node(node)
    }
}

/// Convert a pending slot into its immutable form. Null list entries cannot be
/// represented in a built node, so they are rejected even with validation off.
fn freeze_slot(kind: &NodeKind, field: &FieldDef, slot: &PendingValue) -> Result<FieldValue> {
    match slot {
        PendingValue::Empty => Ok(FieldValue::Empty),
        PendingValue::Single(value) => Ok(FieldValue::Single(value.clone())),
        PendingValue::List(values) => values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value.clone().ok_or_else(|| Error::NullListElement {
                    path: kind.path_of(&field.name),
                    index,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(FieldValue::List),
    }
}
