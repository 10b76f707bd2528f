//! Mapping schema for dict-shaped values with string keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{SchemaError, SchemaResult};
use crate::size::{SiblingSizes, Size};
use crate::types::MemberType;
use crate::value::Value;

/// Schema for string-keyed associative containers.
///
/// Checks run in order: container kind, key types, key set, size, then
/// members in input order. Validation fails on the first violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictSchema {
    mode: DictMode,
}

/// Member-checking modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DictMode {
    /// String keys, unconstrained members.
    Any {
        #[serde(default)]
        size: Size,
    },
    /// All members share one expected type; the key set may be pinned.
    Uniform {
        member_type: MemberType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        keys: Option<Vec<String>>,
        #[serde(default)]
        size: Size,
    },
    /// One expected type per key. The key set is exactly the declared one:
    /// no missing keys, no unexpected keys.
    Fields { fields: Vec<(String, MemberType)> },
}

impl DictSchema {
    /// Accepts any dict with string keys.
    pub fn any() -> Self {
        Self {
            mode: DictMode::Any {
                size: Size::Unconstrained,
            },
        }
    }

    /// Accepts any dict with string keys and the given size.
    pub fn any_sized(size: impl Into<Size>) -> Self {
        Self {
            mode: DictMode::Any { size: size.into() },
        }
    }

    /// Accepts dicts whose members all match `member_type`.
    pub fn of(member_type: impl Into<MemberType>) -> Self {
        Self {
            mode: DictMode::Uniform {
                member_type: member_type.into(),
                keys: None,
                size: Size::Unconstrained,
            },
        }
    }

    /// Accepts dicts of the given size whose members all match `member_type`.
    pub fn of_sized(member_type: impl Into<MemberType>, size: impl Into<Size>) -> Self {
        Self {
            mode: DictMode::Uniform {
                member_type: member_type.into(),
                keys: None,
                size: size.into(),
            },
        }
    }

    /// Accepts dicts with exactly the given keys, whose members all match
    /// `member_type`.
    pub fn of_keys(
        member_type: impl Into<MemberType>,
        keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            mode: DictMode::Uniform {
                member_type: member_type.into(),
                keys: Some(keys.into_iter().map(Into::into).collect()),
                size: Size::Unconstrained,
            },
        }
    }

    /// Accepts dicts with exactly the given keys, each member matching the
    /// type declared for its key.
    pub fn of_fields(
        fields: impl IntoIterator<Item = (impl Into<String>, impl Into<MemberType>)>,
    ) -> Self {
        Self {
            mode: DictMode::Fields {
                fields: fields
                    .into_iter()
                    .map(|(key, member_type)| (key.into(), member_type.into()))
                    .collect(),
            },
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
        match &self.mode {
            DictMode::Any { size } => *size,
            DictMode::Uniform { size, .. } => *size,
            DictMode::Fields { .. } => Size::Unconstrained,
        }
    }

    pub(crate) fn check(&self, value: &Value) -> SchemaResult<()> {
        let entries = match value {
            Value::Dict(entries) => entries,
            other => {
                return Err(SchemaError::new(format!(
                    "Expected {}, found {}({})",
                    self,
                    other.type_name(),
                    other.repr()
                )))
            }
        };
        // Every key must be a string before anything else is judged.
        let mut keys = Vec::with_capacity(entries.len());
        for (position, (key, _)) in entries.iter().enumerate() {
            match key {
                Value::Str(key) => keys.push(key.as_str()),
                other => {
                    return Err(SchemaError::new(format!(
                        "Expected all keys to be type str, found {}({}) at position {}",
                        other.type_name(),
                        other.repr(),
                        position
                    )))
                }
            }
        }
        match &self.mode {
            DictMode::Any { size } => size.check_len(entries.len()),
            DictMode::Uniform {
                member_type,
                keys: expected_keys,
                size,
            } => {
                if let Some(expected_keys) = expected_keys {
                    let expected: Vec<&str> =
                        expected_keys.iter().map(String::as_str).collect();
                    check_key_set(&keys, &expected)?;
                }
                size.check_len(entries.len())?;
                match member_type {
                    MemberType::Any => Ok(()),
                    MemberType::Primitive(expected) => {
                        for (position, (_, member)) in entries.iter().enumerate() {
                            if !expected.matches(member) {
                                return Err(SchemaError::new(format!(
                                    "Expected all members to be type {}, found {}({}) at position {} for member '{}'",
                                    expected,
                                    member.type_name(),
                                    member.repr(),
                                    position,
                                    keys[position]
                                )));
                            }
                        }
                        Ok(())
                    }
                    MemberType::Nested(schema) => {
                        let mut sibling_sizes = SiblingSizes::default();
                        for (position, (_, member)) in entries.iter().enumerate() {
                            if schema.size() == Size::AllEqual {
                                if let Some(size) = schema.container_len(member) {
                                    sibling_sizes.observe(position, size)?;
                                }
                            }
                            schema
                                .check(member)
                                .map_err(|error| error.for_key(keys[position]))?;
                        }
                        Ok(())
                    }
                }
            }
            DictMode::Fields { fields } => {
                let expected: Vec<&str> =
                    fields.iter().map(|(key, _)| key.as_str()).collect();
                check_key_set(&keys, &expected)?;
                // Positions follow the input dict's own iteration order.
                for (position, (_, member)) in entries.iter().enumerate() {
                    let key = keys[position];
                    // The key set matched exactly, so every input key is declared.
                    if let Some((_, member_type)) =
                        fields.iter().find(|(name, _)| name.as_str() == key)
                    {
                        match member_type {
                            MemberType::Any => {}
                            MemberType::Primitive(expected) => {
                                if !expected.matches(member) {
                                    return Err(SchemaError::new(format!(
                                        "Expected type {} for member '{}', found {}({}) at position {}",
                                        expected,
                                        key,
                                        member.type_name(),
                                        member.repr(),
                                        position
                                    )));
                                }
                            }
                            MemberType::Nested(schema) => {
                                schema.check(member).map_err(|error| error.for_key(key))?;
                            }
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// Exact key-set match: missing keys are reported first, in declared order,
/// then unexpected keys in input order.
fn check_key_set(found: &[&str], expected: &[&str]) -> SchemaResult<()> {
    for key in expected {
        if !found.contains(key) {
            return Err(SchemaError::new(format!("Missing key '{}'", key)));
        }
    }
    for key in found {
        if !expected.contains(key) {
            return Err(SchemaError::new(format!("Unexpected key '{}'", key)));
        }
    }
    Ok(())
}

impl fmt::Display for DictSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            DictMode::Any {
                size: Size::Unconstrained,
            } => f.write_str("DictSchema.any()"),
            DictMode::Any { size } => write!(f, "DictSchema.any(size={})", size),
            DictMode::Uniform {
                member_type,
                keys,
                size,
            } => {
                write!(f, "DictSchema.of({}", member_type)?;
                if let Some(keys) = keys {
                    let keys: Vec<String> =
                        keys.iter().map(|key| format!("'{}'", key)).collect();
                    write!(f, ", keys=[{}]", keys.join(", "))?;
                }
                if *size != Size::Unconstrained {
                    write!(f, ", size={}", size)?;
                }
                f.write_str(")")
            }
            DictMode::Fields { fields } => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(key, member_type)| format!("'{}': {}", key, member_type))
                    .collect();
                write!(f, "DictSchema.of({{{}}})", fields.join(", "))
            }
        }
    }
}
