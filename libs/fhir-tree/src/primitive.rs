//! FHIR primitive types and values

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// FHIR primitive type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Integer,
    UnsignedInt,
    PositiveInt,
    Decimal,
    String,
    Code,
    Id,
    Uri,
    Url,
    Canonical,
    Oid,
    Markdown,
    Date,
    DateTime,
    Instant,
    Time,
    Base64Binary,
    Xhtml,
}

impl PrimitiveType {
    /// The FHIR type code (e.g. `dateTime`)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::UnsignedInt => "unsignedInt",
            Self::PositiveInt => "positiveInt",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Code => "code",
            Self::Id => "id",
            Self::Uri => "uri",
            Self::Url => "url",
            Self::Canonical => "canonical",
            Self::Oid => "oid",
            Self::Markdown => "markdown",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Instant => "instant",
            Self::Time => "time",
            Self::Base64Binary => "base64Binary",
            Self::Xhtml => "xhtml",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let ty = match code {
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "unsignedInt" => Self::UnsignedInt,
            "positiveInt" => Self::PositiveInt,
            "decimal" => Self::Decimal,
            "string" => Self::String,
            "code" => Self::Code,
            "id" => Self::Id,
            "uri" => Self::Uri,
            "url" => Self::Url,
            "canonical" => Self::Canonical,
            "oid" => Self::Oid,
            "markdown" => Self::Markdown,
            "date" => Self::Date,
            "dateTime" => Self::DateTime,
            "instant" => Self::Instant,
            "time" => Self::Time,
            "base64Binary" => Self::Base64Binary,
            "xhtml" => Self::Xhtml,
            _ => return None,
        };
        Some(ty)
    }

    /// Whether values of this type carry a code that a binding can constrain
    pub fn is_coded(&self) -> bool {
        matches!(self, Self::Code | Self::String | Self::Uri)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A primitive value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean(bool),
    Integer(i32),
    UnsignedInt(u32),
    PositiveInt(u32),
    Decimal(Decimal),
    String(String),
    Code(String),
    Id(String),
    Uri(String),
    Url(String),
    Canonical(String),
    Oid(String),
    Markdown(String),
    Date(String),
    DateTime(String),
    Instant(String),
    Time(String),
    Base64Binary(String),
    Xhtml(String),
}

impl Primitive {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn code(value: impl Into<String>) -> Self {
        Self::Code(value.into())
    }

    pub fn uri(value: impl Into<String>) -> Self {
        Self::Uri(value.into())
    }

    pub fn primitive_type(&self) -> PrimitiveType {
        match self {
            Self::Boolean(_) => PrimitiveType::Boolean,
            Self::Integer(_) => PrimitiveType::Integer,
            Self::UnsignedInt(_) => PrimitiveType::UnsignedInt,
            Self::PositiveInt(_) => PrimitiveType::PositiveInt,
            Self::Decimal(_) => PrimitiveType::Decimal,
            Self::String(_) => PrimitiveType::String,
            Self::Code(_) => PrimitiveType::Code,
            Self::Id(_) => PrimitiveType::Id,
            Self::Uri(_) => PrimitiveType::Uri,
            Self::Url(_) => PrimitiveType::Url,
            Self::Canonical(_) => PrimitiveType::Canonical,
            Self::Oid(_) => PrimitiveType::Oid,
            Self::Markdown(_) => PrimitiveType::Markdown,
            Self::Date(_) => PrimitiveType::Date,
            Self::DateTime(_) => PrimitiveType::DateTime,
            Self::Instant(_) => PrimitiveType::Instant,
            Self::Time(_) => PrimitiveType::Time,
            Self::Base64Binary(_) => PrimitiveType::Base64Binary,
            Self::Xhtml(_) => PrimitiveType::Xhtml,
        }
    }

    /// String content for all textual primitives
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s)
            | Self::Code(s)
            | Self::Id(s)
            | Self::Uri(s)
            | Self::Url(s)
            | Self::Canonical(s)
            | Self::Oid(s)
            | Self::Markdown(s)
            | Self::Date(s)
            | Self::DateTime(s)
            | Self::Instant(s)
            | Self::Time(s)
            | Self::Base64Binary(s)
            | Self::Xhtml(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(i64::from(*i)),
            Self::UnsignedInt(u) | Self::PositiveInt(u) => Some(i64::from(*u)),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Boolean(b) => JsonValue::Bool(*b),
            Self::Integer(i) => JsonValue::from(*i),
            Self::UnsignedInt(u) | Self::PositiveInt(u) => JsonValue::from(*u),
            Self::Decimal(d) => serde_json::from_str(&d.to_string())
                .unwrap_or_else(|_| JsonValue::String(d.to_string())),
            other => JsonValue::String(other.as_str().unwrap_or_default().to_string()),
        }
    }

    /// Read a JSON value as the given primitive type, checking its lexical form
    pub fn from_json(ty: PrimitiveType, value: &JsonValue) -> Result<Self, String> {
        match ty {
            PrimitiveType::Boolean => value
                .as_bool()
                .map(Self::Boolean)
                .ok_or_else(|| expected(ty, value)),
            PrimitiveType::Integer => value
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .map(Self::Integer)
                .ok_or_else(|| expected(ty, value)),
            PrimitiveType::UnsignedInt => value
                .as_u64()
                .and_then(|u| u32::try_from(u).ok())
                .map(Self::UnsignedInt)
                .ok_or_else(|| expected(ty, value)),
            PrimitiveType::PositiveInt => value
                .as_u64()
                .and_then(|u| u32::try_from(u).ok())
                .filter(|u| *u > 0)
                .map(Self::PositiveInt)
                .ok_or_else(|| expected(ty, value)),
            PrimitiveType::Decimal => match value {
                JsonValue::Number(n) => {
                    let text = n.to_string();
                    Decimal::from_str(&text)
                        .or_else(|_| Decimal::from_scientific(&text))
                        .map(Self::Decimal)
                        .map_err(|e| format!("invalid decimal '{}': {}", text, e))
                }
                _ => Err(expected(ty, value)),
            },
            _ => {
                let text = value.as_str().ok_or_else(|| expected(ty, value))?;
                check_lexical(ty, text)?;
                Ok(Self::textual(ty, text.to_string()))
            }
        }
    }

    fn textual(ty: PrimitiveType, text: String) -> Self {
        match ty {
            PrimitiveType::Code => Self::Code(text),
            PrimitiveType::Id => Self::Id(text),
            PrimitiveType::Uri => Self::Uri(text),
            PrimitiveType::Url => Self::Url(text),
            PrimitiveType::Canonical => Self::Canonical(text),
            PrimitiveType::Oid => Self::Oid(text),
            PrimitiveType::Markdown => Self::Markdown(text),
            PrimitiveType::Date => Self::Date(text),
            PrimitiveType::DateTime => Self::DateTime(text),
            PrimitiveType::Instant => Self::Instant(text),
            PrimitiveType::Time => Self::Time(text),
            PrimitiveType::Base64Binary => Self::Base64Binary(text),
            PrimitiveType::Xhtml => Self::Xhtml(text),
            _ => Self::String(text),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::UnsignedInt(u) | Self::PositiveInt(u) => write!(f, "{}", u),
            Self::Decimal(d) => write!(f, "{}", d),
            other => f.write_str(other.as_str().unwrap_or_default()),
        }
    }
}

fn expected(ty: PrimitiveType, value: &JsonValue) -> String {
    format!("expected {} but found {}", ty, value)
}

static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s]+( [^\s]+)*$").expect("valid regex"));
static ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-\.]{1,64}$").expect("valid regex"));
static OID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^urn:oid:[0-2](\.(0|[1-9][0-9]*))+$").expect("valid regex"));
static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1]))?)?$")
        .expect("valid regex")
});
static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[0-9]{4}(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1])",
        r"(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?",
        r"(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00)))?)?)?$"
    ))
    .expect("valid regex")
});
static TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?$").expect("valid regex")
});
static BASE64: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/=\s]*$").expect("valid regex"));

fn check_lexical(ty: PrimitiveType, text: &str) -> Result<(), String> {
    let ok = match ty {
        PrimitiveType::String | PrimitiveType::Markdown | PrimitiveType::Xhtml => {
            !text.trim().is_empty()
        }
        PrimitiveType::Code => CODE.is_match(text),
        PrimitiveType::Id => ID.is_match(text),
        PrimitiveType::Uri | PrimitiveType::Url | PrimitiveType::Canonical => {
            !text.is_empty() && !text.chars().any(char::is_whitespace)
        }
        PrimitiveType::Oid => OID.is_match(text),
        PrimitiveType::Date => DATE.is_match(text),
        PrimitiveType::DateTime => DATE_TIME.is_match(text),
        PrimitiveType::Instant => chrono::DateTime::parse_from_rfc3339(text).is_ok(),
        PrimitiveType::Time => TIME.is_match(text),
        PrimitiveType::Base64Binary => BASE64.is_match(text),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(format!("invalid {} value '{}'", ty, text))
    }
}
