//! Sequence schema for list-shaped values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{SchemaError, SchemaResult};
use crate::size::{SiblingSizes, Size};
use crate::types::MemberType;
use crate::value::Value;

/// Schema for ordered, indexable containers.
///
/// Checks run in order: container kind, size, then members from position 0.
/// Validation fails on the first violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSchema {
    member_type: MemberType,
    #[serde(default)]
    size: Size,
}

impl ListSchema {
    /// Accepts any list.
    pub fn any() -> Self {
        Self {
            member_type: MemberType::Any,
            size: Size::Unconstrained,
        }
    }

    /// Accepts any list of the given size.
    pub fn any_sized(size: impl Into<Size>) -> Self {
        Self {
            member_type: MemberType::Any,
            size: size.into(),
        }
    }

    /// Accepts lists whose members all match `member_type`.
    pub fn of(member_type: impl Into<MemberType>) -> Self {
        Self {
            member_type: member_type.into(),
            size: Size::Unconstrained,
        }
    }

    /// Accepts lists of the given size whose members all match `member_type`.
    pub fn of_sized(member_type: impl Into<MemberType>, size: impl Into<Size>) -> Self {
        Self {
            member_type: member_type.into(),
            size: size.into(),
        }
    }

    /// Validates `value` against this schema.
    ///
    /// Returns the value unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] describing the first structural violation
    /// found.
    pub fn ensure<'a>(&self, value: &'a Value) -> SchemaResult<&'a Value> {
        self.check(value)?;
        Ok(value)
    }

    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn check(&self, value: &Value) -> SchemaResult<()> {
        let members = match value {
            Value::List(members) => members,
            other => {
                return Err(SchemaError::new(format!(
                    "Expected list, found {}({})",
                    other.type_name(),
                    other.repr()
                )))
            }
        };
        self.size.check_len(members.len())?;
        match &self.member_type {
            MemberType::Any => Ok(()),
            MemberType::Primitive(expected) => {
                for (position, member) in members.iter().enumerate() {
                    if !expected.matches(member) {
                        return Err(SchemaError::new(format!(
                            "Expected all members to be type {}, found {}({}) at position {}",
                            expected,
                            member.type_name(),
                            member.repr(),
                            position
                        )));
                    }
                }
                Ok(())
            }
            MemberType::Nested(schema) => {
                // An all-equal member size is a constraint between siblings,
                // so this iteration owns the tracking; its error names both
                // positions and is raised here unsuffixed.
                let mut sibling_sizes = SiblingSizes::default();
                for (position, member) in members.iter().enumerate() {
                    if schema.size() == Size::AllEqual {
                        if let Some(size) = schema.container_len(member) {
                            sibling_sizes.observe(position, size)?;
                        }
                    }
                    schema
                        .check(member)
                        .map_err(|error| error.for_position(position))?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ListSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.member_type, self.size) {
            (MemberType::Any, Size::Unconstrained) => f.write_str("ListSchema.any()"),
            (MemberType::Any, size) => write!(f, "ListSchema.any(size={})", size),
            (member_type, Size::Unconstrained) => write!(f, "ListSchema.of({})", member_type),
            (member_type, size) => write!(f, "ListSchema.of({}, size={})", member_type, size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueType;
    use serde_json::json;

    #[test]
    fn test_any_accepts_mixed_members() {
        let schema = ListSchema::any();
        let data = Value::from(json!([1, "two", 3.0, null]));
        assert_eq!(schema.ensure(&data).unwrap(), &data);
    }

    #[test]
    fn test_rejects_non_list() {
        let schema = ListSchema::any();
        let err = schema.ensure(&Value::Int(42)).unwrap_err();
        assert_eq!(err.message(), "Expected list, found int(42)");
    }

    #[test]
    fn test_size_checked_before_members() {
        // A short list of the wrong member type reports its length first.
        let schema = ListSchema::of_sized(ValueType::Int, 3);
        let err = schema.ensure(&Value::from(json!(["a", "b"]))).unwrap_err();
        assert_eq!(err.message(), "Expected length 3, found length 2");
    }

    #[test]
    fn test_first_mismatch_wins() {
        let schema = ListSchema::of(ValueType::Int);
        let err = schema
            .ensure(&Value::from(json!([1, "a", "b"])))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Expected all members to be type int, found str('a') at position 1"
        );
    }

    #[test]
    fn test_empty_list_passes_member_checks() {
        let schema = ListSchema::of(ValueType::Str);
        let data = Value::from(json!([]));
        assert_eq!(schema.ensure(&data).unwrap(), &data);
    }

    #[test]
    fn test_display() {
        assert_eq!(ListSchema::any().to_string(), "ListSchema.any()");
        assert_eq!(ListSchema::any_sized(4).to_string(), "ListSchema.any(size=4)");
        assert_eq!(
            ListSchema::of(ValueType::Float).to_string(),
            "ListSchema.of(float)"
        );
        assert_eq!(
            ListSchema::of_sized(ValueType::Float, Size::AllEqual).to_string(),
            "ListSchema.of(float, size=ALL_EQUAL)"
        );
        assert_eq!(
            ListSchema::of(ListSchema::of_sized(ValueType::Int, 2)).to_string(),
            "ListSchema.of(ListSchema.of(int, size=2))"
        );
    }
}
