//! Dynamic value model for candidate values.
//!
//! Values arrive already decoded from some external source; this crate never
//! parses wire formats itself. `serde_json::Value` converts losslessly via
//! `From`, with one extension: `Dict` keys are full values rather than
//! strings, so a malformed mapping key survives long enough to be reported.

/// An untyped, decoded value to be checked against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// Key/value pairs in insertion order. Iteration order is the position
    /// order reported in diagnostics.
    Dict(Vec<(Value, Value)>),
}

impl Value {
    /// Runtime type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }

    /// Diagnostic rendering used in error messages.
    ///
    /// Strings are single-quoted; floats always carry a decimal point so
    /// `1.0` stays distinguishable from the integer `1`.
    pub fn repr(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Int(number) => number.to_string(),
            Value::Float(number) => format!("{:?}", number),
            Value::Str(text) => format!("'{}'", text),
            Value::List(members) => {
                let members: Vec<String> = members.iter().map(Value::repr).collect();
                format!("[{}]", members.join(", "))
            }
            Value::Dict(entries) => {
                let entries: Vec<String> = entries
                    .iter()
                    .map(|(key, member)| format!("{}: {}", key.repr(), member.repr()))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Value::Int(int)
                } else if let Some(float) = number.as_f64() {
                    // u64 beyond i64::MAX and every float land here
                    Value::Float(float)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(text) => Value::Str(text),
            serde_json::Value::Array(members) => {
                Value::List(members.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Dict(
                entries
                    .into_iter()
                    .map(|(key, member)| (Value::Str(key), Value::from(member)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Int(number)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Float(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

impl From<Vec<Value>> for Value {
    fn from(members: Vec<Value>) -> Self {
        Value::List(members)
    }
}
