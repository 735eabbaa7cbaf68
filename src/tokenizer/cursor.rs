//! # Lexical Cursor
//!
//! The parser never keeps a position of its own. Every step hands the remaining
//! text to the next one, and the remainder is always a trimmed suffix of its input.

use super::symbol::Delimiter;

/// Text captured up to an exit delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Trimmed text before the delimiter.
    pub token: &'a str,
    /// The delimiter that ended the token, `None` at end of input.
    pub exit: Option<Delimiter>,
    /// Trimmed text after the delimiter.
    pub rest: &'a str,
}

/// Splits `input` at the earliest occurrence of any of `exits`.
///
/// When two delimiters start at the same index the one listed first wins. If none
/// occurs the whole input is the token.
pub fn split_at_exit<'a>(input: &'a str, exits: &[Delimiter]) -> Split<'a> {
    let earliest = exits
        .iter()
        .filter_map(|exit| input.find(exit.as_str()).map(|index| (index, *exit)))
        .min_by_key(|(index, _)| *index);

    match earliest {
        Some((index, exit)) => Split {
            token: input[..index].trim(),
            exit: Some(exit),
            rest: input[index + exit.as_str().len()..].trim(),
        },
        None => Split {
            token: input.trim(),
            exit: None,
            rest: "",
        },
    }
}

/// Consumes one of `exits` if the input starts with it.
pub fn strip_exit<'a>(input: &'a str, exits: &[Delimiter]) -> (Option<Delimiter>, &'a str) {
    let input = input.trim_start();
    exits
        .iter()
        .find_map(|exit| {
            input
                .strip_prefix(exit.as_str())
                .map(|rest| (Some(*exit), rest.trim()))
        })
        .unwrap_or((None, input.trim_end()))
}

/// Skips a single `,` right after an opening marker.
///
/// Arguments assembled from a process command line are joined with commas, so
/// `"[" "1" "]"` arrives as `[,1,]`.
pub fn skip_separator(input: &str) -> &str {
    let input = input.trim_start();
    input
        .strip_prefix(Delimiter::Comma.as_str())
        .map(str::trim_start)
        .unwrap_or(input)
}
