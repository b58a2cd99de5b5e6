#![allow(dead_code)]

use ferrum_tree::{json, schema, InMemoryTerminology, Node, ValidationContext};
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> JsonValue {
    let content = std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", name, e));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("invalid JSON in {}: {}", name, e))
}

/// Every check enabled, independent of the installed configuration
pub fn strict() -> ValidationContext {
    ValidationContext::new(Arc::new(InMemoryTerminology::standard()))
}

pub fn parse_fixture(name: &str) -> ferrum_tree::Result<Node> {
    json::parse_with(schema::standard(), &strict(), &load_fixture(name))
}
