//! Value set membership
//!
//! Coded-value validation only needs a yes/no membership answer, so the
//! provider contract is a single method. The process-wide provider defaults to
//! [`InMemoryTerminology::standard`] and can be swapped with [`set_provider`].

use crate::schema::definitions::vs;
use crate::schema::BindingStrength;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Answers whether a code belongs to a value set
pub trait TerminologyProvider: Send + Sync {
    fn is_member(&self, code: &str, value_set: &str, strength: BindingStrength) -> bool;
}

/// Terminology backed by explicit code lists
///
/// Value sets it does not know are treated as containing every code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTerminology {
    value_sets: HashMap<String, HashSet<String>>,
}

impl InMemoryTerminology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider seeded with the value sets bound by the built-in definitions
    pub fn standard() -> Self {
        let mut terminology = Self::new();
        for (url, codes) in STANDARD_VALUE_SETS {
            terminology.insert(url, codes.iter().copied());
        }
        terminology
    }

    /// Add codes to a value set, creating it if needed
    pub fn insert<I, S>(&mut self, value_set: &str, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_sets
            .entry(canonical_url(value_set).to_string())
            .or_default()
            .extend(codes.into_iter().map(Into::into));
    }

    pub fn with_value_set<I, S>(mut self, value_set: &str, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(value_set, codes);
        self
    }

    pub fn contains_value_set(&self, value_set: &str) -> bool {
        self.value_sets.contains_key(canonical_url(value_set))
    }
}

impl TerminologyProvider for InMemoryTerminology {
    fn is_member(&self, code: &str, value_set: &str, strength: BindingStrength) -> bool {
        match self.value_sets.get(canonical_url(value_set)) {
            Some(codes) => codes.contains(code),
            None => {
                tracing::debug!(
                    value_set,
                    strength = strength.code(),
                    "unknown value set, accepting code '{}'",
                    code
                );
                true
            }
        }
    }
}

/// Strip a `|version` suffix from a canonical URL
fn canonical_url(url: &str) -> &str {
    url.split_once('|').map(|(base, _)| base).unwrap_or(url)
}

static PROVIDER: Lazy<RwLock<Arc<dyn TerminologyProvider>>> =
    Lazy::new(|| RwLock::new(Arc::new(InMemoryTerminology::standard())));

/// Replace the process-wide terminology provider
pub fn set_provider(provider: Arc<dyn TerminologyProvider>) {
    let mut guard = PROVIDER.write().unwrap_or_else(|e| e.into_inner());
    *guard = provider;
}

/// The process-wide terminology provider
pub fn provider() -> Arc<dyn TerminologyProvider> {
    PROVIDER
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

const STANDARD_VALUE_SETS: &[(&str, &[&str])] = &[
    (vs::PUBLICATION_STATUS, &["draft", "active", "retired", "unknown"]),
    (
        vs::CODESYSTEM_CONTENT_MODE,
        &["not-present", "example", "fragment", "complete", "supplement"],
    ),
    (
        vs::CODESYSTEM_HIERARCHY_MEANING,
        &["grouped-by", "is-a", "part-of", "classified-with"],
    ),
    (
        vs::FILTER_OPERATOR,
        &[
            "=",
            "is-a",
            "descendent-of",
            "is-not-a",
            "regex",
            "in",
            "not-in",
            "generalizes",
            "exists",
        ],
    ),
    (
        vs::CONCEPT_PROPERTY_TYPE,
        &["code", "Coding", "string", "integer", "boolean", "dateTime", "decimal"],
    ),
    (
        vs::CONCEPT_MAP_EQUIVALENCE,
        &[
            "relatedto",
            "equivalent",
            "equal",
            "wider",
            "subsumes",
            "narrower",
            "specializes",
            "inexact",
            "unmatched",
            "disjoint",
        ],
    ),
    (vs::CONCEPTMAP_UNMAPPED_MODE, &["provided", "fixed", "other-map"]),
    (
        vs::NARRATIVE_STATUS,
        &["generated", "extensions", "additional", "empty"],
    ),
    (
        vs::IDENTIFIER_USE,
        &["usual", "official", "temp", "secondary", "old"],
    ),
    (vs::QUANTITY_COMPARATOR, &["<", "<=", ">=", ">"]),
    (
        vs::CONTACT_POINT_SYSTEM,
        &["phone", "fax", "email", "pager", "url", "sms", "other"],
    ),
    (
        vs::CONTACT_POINT_USE,
        &["home", "work", "temp", "old", "mobile"],
    ),
    (
        vs::DESIGNATION_USE,
        &["900000000000003001", "900000000000013009"],
    ),
    (
        vs::USAGE_CONTEXT_TYPE,
        &[
            "gender", "age", "focus", "user", "workflow", "task", "venue", "species", "program",
        ],
    ),
    (
        vs::LANGUAGES,
        &[
            "ar", "bn", "cs", "da", "de", "de-AT", "de-CH", "de-DE", "el", "en", "en-AU", "en-CA",
            "en-GB", "en-IN", "en-NZ", "en-SG", "en-US", "es", "es-AR", "es-ES", "es-UY", "fi",
            "fr", "fr-BE", "fr-CH", "fr-FR", "fy", "fy-NL", "hi", "hr", "it", "it-CH", "it-IT",
            "ja", "ko", "nl", "nl-BE", "nl-NL", "no", "no-NO", "pa", "pl", "pt", "pt-BR", "ru",
            "ru-RU", "sr", "sr-RS", "sv", "sv-SE", "te", "zh", "zh-CN", "zh-HK", "zh-SG", "zh-TW",
        ],
    ),
];
