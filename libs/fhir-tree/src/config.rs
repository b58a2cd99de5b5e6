//! Process-wide model configuration
//!
//! Validation switches are read when a node is built. They can be loaded from
//! YAML, overridden from the environment, and installed for the whole process:
//!
//! ```yaml
//! validation: true
//! reference_types: true
//! bindings: RequiredOnly
//! ```

use crate::error::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::RwLock;

pub const ENV_VALIDATION: &str = "FHIR_TREE_VALIDATION";
pub const ENV_REFERENCE_TYPES: &str = "FHIR_TREE_REFERENCE_TYPES";
pub const ENV_BINDINGS: &str = "FHIR_TREE_BINDINGS";

/// How coded values are checked against their bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BindingMode {
    /// Bindings are not checked
    Off,
    /// Only required bindings are checked
    RequiredOnly,
    /// Required bindings are enforced; weaker bindings produce warnings
    #[default]
    Report,
}

impl BindingMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Some(Self::Off),
            "required" | "requiredonly" | "required-only" => Some(Self::RequiredOnly),
            "report" | "all" => Some(Self::Report),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Validate nodes when they are built
    pub validation: bool,
    /// Check the target kinds of references
    pub reference_types: bool,
    pub bindings: BindingMode,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            validation: true,
            reference_types: true,
            bindings: BindingMode::default(),
        }
    }
}

impl ModelConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Apply `FHIR_TREE_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_VALIDATION) {
            match parse_flag(&value) {
                Some(flag) => self.validation = flag,
                None => tracing::warn!("ignoring invalid {}={}", ENV_VALIDATION, value),
            }
        }
        if let Some(value) = lookup(ENV_REFERENCE_TYPES) {
            match parse_flag(&value) {
                Some(flag) => self.reference_types = flag,
                None => tracing::warn!("ignoring invalid {}={}", ENV_REFERENCE_TYPES, value),
            }
        }
        if let Some(value) = lookup(ENV_BINDINGS) {
            match BindingMode::parse(&value) {
                Some(mode) => self.bindings = mode,
                None => tracing::warn!("ignoring invalid {}={}", ENV_BINDINGS, value),
            }
        }
        self
    }

    /// Make this the configuration used by every subsequent build
    pub fn install(self) {
        tracing::debug!(
            validation = self.validation,
            reference_types = self.reference_types,
            bindings = ?self.bindings,
            "installing model configuration"
        );
        let mut guard = CURRENT.write().unwrap_or_else(|e| e.into_inner());
        *guard = self;
    }

    /// The installed configuration
    pub fn current() -> Self {
        CURRENT.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

static CURRENT: Lazy<RwLock<ModelConfig>> =
    Lazy::new(|| RwLock::new(ModelConfig::default().with_env_overrides()));

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
