//! Error types for the resource tree

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required field: {path}")]
    MissingRequiredField { path: String },

    #[error("Required list is empty: {path}")]
    EmptyRequiredList { path: String },

    #[error("Null element at {path}[{index}]")]
    NullListElement { path: String, index: usize },

    #[error("Invalid type '{found}' for choice field {path} (allowed: {allowed})")]
    InvalidChoiceType {
        path: String,
        found: String,
        allowed: String,
    },

    #[error("Invalid type '{found}' for field {path} (expected: {expected})")]
    InvalidFieldType {
        path: String,
        found: String,
        expected: String,
    },

    #[error("Invalid reference target '{target}' at {path} (allowed: {allowed})")]
    InvalidReferenceTarget {
        path: String,
        target: String,
        allowed: String,
    },

    #[error("Code '{code}' at {path} is not in required value set {value_set}")]
    InvalidCodedValue {
        path: String,
        code: String,
        value_set: String,
    },

    #[error("Element must have a value or children: {path}")]
    EmptyElement { path: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown node kind: {0}")]
    UnknownKind(String),

    #[error("Parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Field path the error refers to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { path }
            | Self::EmptyRequiredList { path }
            | Self::NullListElement { path, .. }
            | Self::InvalidChoiceType { path, .. }
            | Self::InvalidFieldType { path, .. }
            | Self::InvalidReferenceTarget { path, .. }
            | Self::InvalidCodedValue { path, .. }
            | Self::EmptyElement { path }
            | Self::Parse { path, .. } => Some(path),
            _ => None,
        }
    }

    /// True for failures raised by build-time validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. }
                | Self::EmptyRequiredList { .. }
                | Self::NullListElement { .. }
                | Self::InvalidChoiceType { .. }
                | Self::InvalidFieldType { .. }
                | Self::InvalidReferenceTarget { .. }
                | Self::InvalidCodedValue { .. }
                | Self::EmptyElement { .. }
        )
    }

    pub(crate) fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
