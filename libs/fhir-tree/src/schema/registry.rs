//! Registry of node kinds

use super::{definitions, NodeKind};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of all node kinds known to a process
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    kinds: HashMap<String, Arc<NodeKind>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in datatype and resource definitions
    pub fn with_standard_definitions() -> Self {
        let mut registry = Self::new();
        definitions::register_all(&mut registry);
        registry
    }

    /// Add a kind, replacing any kind of the same name
    pub fn register(&mut self, kind: NodeKind) -> Arc<NodeKind> {
        let kind = Arc::new(kind);
        self.kinds.insert(kind.name().to_string(), kind.clone());
        kind
    }

    pub fn get(&self, name: &str) -> Option<Arc<NodeKind>> {
        self.kinds.get(name).cloned()
    }

    pub fn kind(&self, name: &str) -> Result<Arc<NodeKind>> {
        self.get(name)
            .ok_or_else(|| Error::UnknownKind(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Iterate over all kinds
    pub fn kinds(&self) -> impl Iterator<Item = &Arc<NodeKind>> {
        self.kinds.values()
    }

    /// Get all resource kinds
    pub fn resource_kinds(&self) -> impl Iterator<Item = &Arc<NodeKind>> {
        self.kinds.values().filter(|k| k.is_resource())
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

static STANDARD: Lazy<SchemaRegistry> = Lazy::new(SchemaRegistry::with_standard_definitions);

/// The process-wide registry of built-in definitions
pub fn standard() -> &'static SchemaRegistry {
    &STANDARD
}
