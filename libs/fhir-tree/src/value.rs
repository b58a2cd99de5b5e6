//! Field values
//!
//! Every populated field slot holds a [`Value`]: either a primitive or a
//! nested node. This closed sum is the runtime representation of choice
//! fields; the declared alternatives are checked against [`Value::type_name`].

use crate::node::Node;
use crate::primitive::Primitive;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Primitive(Primitive),
    Node(Node),
}

impl Value {
    /// Concrete type name: a primitive type code or the node's kind name
    pub fn type_name(&self) -> &str {
        match self {
            Self::Primitive(p) => p.primitive_type().code(),
            Self::Node(n) => n.kind_name(),
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            Self::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(n) => Some(n),
            Self::Primitive(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_primitive().and_then(Primitive::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_primitive().and_then(Primitive::as_bool)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Primitive(Primitive::String(value.into()))
    }

    pub fn code(value: impl Into<String>) -> Self {
        Self::Primitive(Primitive::Code(value.into()))
    }

    pub fn uri(value: impl Into<String>) -> Self {
        Self::Primitive(Primitive::Uri(value.into()))
    }

    pub fn canonical(value: impl Into<String>) -> Self {
        Self::Primitive(Primitive::Canonical(value.into()))
    }

    pub fn markdown(value: impl Into<String>) -> Self {
        Self::Primitive(Primitive::Markdown(value.into()))
    }

    pub fn date_time(value: impl Into<String>) -> Self {
        Self::Primitive(Primitive::DateTime(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Self::Primitive(Primitive::Boolean(value))
    }

    pub fn integer(value: i32) -> Self {
        Self::Primitive(Primitive::Integer(value))
    }

    pub fn decimal(value: Decimal) -> Self {
        Self::Primitive(Primitive::Decimal(value))
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<Node> for Value {
    fn from(n: Node) -> Self {
        Self::Node(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::integer(i)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::decimal(d)
    }
}
