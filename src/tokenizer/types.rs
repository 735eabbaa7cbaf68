use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::symbol::parse_pair_hint;
use crate::eval::value::Value;

pub type CoercionResult<T> = Result<T, CoercionError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("unknown type `{0}` (expected one of str, int, float, bool)")]
    UnknownType(String),
    #[error("cannot convert `{text}` to {type_name}: {reason}")]
    InvalidValue {
        text: String,
        type_name: TypeName,
        reason: String,
    },
    #[error("map type hint must look like `(key_type, value_type)`, got `{0}`")]
    InvalidMapHint(String),
}

/// The closed set of types a `value -> type` hint may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TypeName {
    Str,
    Int,
    Float,
    Bool,
}

impl TypeName {
    /// Looks up a hint by name, ignoring surrounding whitespace.
    pub fn lookup(name: &str) -> CoercionResult<Self> {
        let name = name.trim();
        name.parse()
            .map_err(|_| CoercionError::UnknownType(name.to_string()))
    }

    pub fn coerce(self, text: &str) -> CoercionResult<Value> {
        let invalid = |reason: String| CoercionError::InvalidValue {
            text: text.to_string(),
            type_name: self,
            reason,
        };
        match self {
            TypeName::Str => Ok(Value::String(text.to_string())),
            TypeName::Int => text
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| invalid(e.to_string())),
            TypeName::Float => text
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| invalid(e.to_string())),
            // Only the exact text "False" and the empty string are false; "0" is true.
            TypeName::Bool => Ok(Value::Boolean(text != "False" && !text.is_empty())),
        }
    }
}

/// Converts `text` with the type named `type_name`.
pub fn coerce(text: &str, type_name: &str) -> CoercionResult<Value> {
    TypeName::lookup(type_name)?.coerce(text)
}

/// Parses the `(key_type, value_type)` hint that may follow a map.
///
/// Returns both types and the text after the closing parenthesis.
pub fn parse_map_hint(input: &str) -> CoercionResult<(TypeName, TypeName, &str)> {
    let input = input.trim_start();
    let (rest, (key, value)) =
        parse_pair_hint(input).map_err(|_| CoercionError::InvalidMapHint(input.to_string()))?;
    Ok((TypeName::lookup(key)?, TypeName::lookup(value)?, rest))
}
