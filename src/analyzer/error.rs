use thiserror::Error;

use crate::ast::NodeKind;
use crate::registry::SymbolError;
use crate::tokenizer::escape::decode;
use crate::tokenizer::types::CoercionError;

pub type ParseResult<T> = Result<T, ParseError>;

/// Longest fragment of offending input carried by an error.
const FRAGMENT_LIMIT: usize = 40;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unterminated {construct}: `{fragment}`")]
    Unterminated {
        construct: NodeKind,
        fragment: String,
    },
    #[error("expected {expected} before `{fragment}`")]
    ExpectedDelimiter { expected: String, fragment: String },
    #[error("unknown setting `--{setting}` on {node}")]
    UnknownSetting { node: NodeKind, setting: String },
    #[error("try chain has no alternatives: `{fragment}`")]
    EmptyTry { fragment: String },
    #[error("type coercion failed: {0}")]
    Coercion(#[from] CoercionError),
    #[error("symbol resolution failed: {0}")]
    Symbol(#[from] SymbolError),
    #[error("unparsed input remains: `{remainder}`")]
    TrailingInput { remainder: String },
}

impl ParseError {
    pub fn unterminated(construct: NodeKind, input: &str) -> Self {
        ParseError::Unterminated {
            construct,
            fragment: fragment(input),
        }
    }

    pub fn expected(expected: impl Into<String>, input: &str) -> Self {
        ParseError::ExpectedDelimiter {
            expected: expected.into(),
            fragment: fragment(input),
        }
    }

    pub fn empty_try(input: &str) -> Self {
        ParseError::EmptyTry {
            fragment: fragment(input),
        }
    }
}

/// Decodes and shortens encoded input so errors show what the user typed.
fn fragment(input: &str) -> String {
    let decoded = decode(input.trim());
    match decoded.char_indices().nth(FRAGMENT_LIMIT) {
        Some((index, _)) => format!("{}...", &decoded[..index]),
        None => decoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_is_decoded_and_truncated() {
        let err = ParseError::unterminated(NodeKind::List, "a%&#44%b");
        assert_eq!(err.to_string(), "unterminated List: `a,b`");

        let long = "x".repeat(100);
        match ParseError::expected("`]`", &long) {
            ParseError::ExpectedDelimiter { fragment, .. } => {
                assert_eq!(fragment.len(), FRAGMENT_LIMIT + 3);
                assert!(fragment.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
