//! Expected-type tags and the schema node union.
//!
//! A member's expected type is one of: any value, a primitive tag checked by
//! runtime type equality, or a nested schema validated recursively. Nesting
//! is what makes schema trees: lists of lists, dicts of lists, and so on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dict::DictSchema;
use crate::errors::SchemaResult;
use crate::list::ListSchema;
use crate::size::Size;
use crate::value::Value;

/// Primitive member types checked by runtime type equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Bool,
    Int,
    Float,
    Str,
}

impl ValueType {
    /// Returns the type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Str => "str",
        }
    }

    /// Runtime type check.
    ///
    /// Integers are acceptable floats; no other widening applies, and a
    /// float never passes as an integer.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::Bool => matches!(value, Value::Bool(_)),
            ValueType::Int => matches!(value, Value::Int(_)),
            ValueType::Float => matches!(value, Value::Int(_) | Value::Float(_)),
            ValueType::Str => matches!(value, Value::Str(_)),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Expected type of a container member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    /// Any value passes.
    Any,
    /// A primitive checked by runtime type equality.
    Primitive(ValueType),
    /// A nested schema validated recursively.
    Nested(Box<SchemaNode>),
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberType::Any => f.write_str("any"),
            MemberType::Primitive(value_type) => write!(f, "{}", value_type),
            MemberType::Nested(schema) => write!(f, "{}", schema),
        }
    }
}

impl From<ValueType> for MemberType {
    fn from(value_type: ValueType) -> Self {
        MemberType::Primitive(value_type)
    }
}

impl From<SchemaNode> for MemberType {
    fn from(schema: SchemaNode) -> Self {
        MemberType::Nested(Box::new(schema))
    }
}

impl From<ListSchema> for MemberType {
    fn from(schema: ListSchema) -> Self {
        MemberType::Nested(Box::new(SchemaNode::List(schema)))
    }
}

impl From<DictSchema> for MemberType {
    fn from(schema: DictSchema) -> Self {
        MemberType::Nested(Box::new(SchemaNode::Dict(schema)))
    }
}

/// A schema node: an immutable description of expected structural shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaNode {
    List(ListSchema),
    Dict(DictSchema),
}

impl SchemaNode {
    /// Validates `value` against this schema.
    ///
    /// Returns the value unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SchemaError`] describing the first structural
    /// violation found.
    pub fn ensure<'a>(&self, value: &'a Value) -> SchemaResult<&'a Value> {
        self.check(value)?;
        Ok(value)
    }

    pub(crate) fn check(&self, value: &Value) -> SchemaResult<()> {
        match self {
            SchemaNode::List(schema) => schema.check(value),
            SchemaNode::Dict(schema) => schema.check(value),
        }
    }

    /// Size constraint carried by this node.
    pub(crate) fn size(&self) -> Size {
        match self {
            SchemaNode::List(schema) => schema.size(),
            SchemaNode::Dict(schema) => schema.size(),
        }
    }

    /// Length of `value` if it is the container kind this node expects.
    pub(crate) fn container_len(&self, value: &Value) -> Option<usize> {
        match (self, value) {
            (SchemaNode::List(_), Value::List(members)) => Some(members.len()),
            (SchemaNode::Dict(_), Value::Dict(entries)) => Some(entries.len()),
            _ => None,
        }
    }
}

impl From<ListSchema> for SchemaNode {
    fn from(schema: ListSchema) -> Self {
        SchemaNode::List(schema)
    }
}

impl From<DictSchema> for SchemaNode {
    fn from(schema: DictSchema) -> Self {
        SchemaNode::Dict(schema)
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaNode::List(schema) => write!(f, "{}", schema),
            SchemaNode::Dict(schema) => write!(f, "{}", schema),
        }
    }
}
