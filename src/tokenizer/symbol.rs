//! # Symbol Handling
//!
//! This module defines the fixed vocabulary of the command language and the small
//! recognizers built on top of it.
//!
//! ## Symbol Types
//!
//! * [`Opener`]: Markers that start a composite node (`<run:`, `<try>`, `[`, `{`)
//! * [`Delimiter`]: Exit sequences a sub-parse may stop at (`,`, `:`, `]`, `}`, `</run>`, `</try>`)
//!
//! ## Matching Strategy
//!
//! Openers are only recognized at the start of the remaining text. Delimiters are
//! searched anywhere in it by the [`cursor`](super::cursor), so their text must not
//! contain anything the escape sentinels can produce.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, space0},
    combinator::{recognize, value},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Introduces a `value -> type` hint.
pub const TYPE_ARROW: &str = "->";

/// Introduces a `--setting` token.
pub const SETTING_PREFIX: &str = "--";

/// Markers that start a composite node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum Opener {
    /// Function header (`<run:name>`)
    #[strum(serialize = "<run:")]
    Function,
    /// Try/except chain (`<try>`)
    #[strum(serialize = "<try>")]
    Try,
    /// Ordered list (`[`)
    #[strum(serialize = "[")]
    List,
    /// Key/value map (`{`)
    #[strum(serialize = "{")]
    Map,
}

/// Exit sequences that end a sub-parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum Delimiter {
    /// Separates siblings (`,`)
    #[strum(serialize = ",")]
    Comma,
    /// Separates a map key from its value (`:`)
    #[strum(serialize = ":")]
    Colon,
    /// Closes a list (`]`)
    #[strum(serialize = "]")]
    CloseBracket,
    /// Closes a map (`}`)
    #[strum(serialize = "}")]
    CloseBrace,
    /// Closes a function (`</run>`)
    #[strum(serialize = "</run>")]
    RunClose,
    /// Closes a try chain (`</try>`)
    #[strum(serialize = "</try>")]
    TryClose,
}

impl Opener {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Recognizes the opening marker at the start of `input`.
///
/// Leading whitespace must already be trimmed. On success the marker is consumed.
pub fn parse_opener(input: &str) -> IResult<&str, Opener> {
    alt((
        value(Opener::Function, tag(Opener::Function.as_str())),
        value(Opener::Try, tag(Opener::Try.as_str())),
        value(Opener::List, tag(Opener::List.as_str())),
        value(Opener::Map, tag(Opener::Map.as_str())),
    ))(input)
}

/// Reads the dotted name of a function header, with `<run:` already consumed.
pub fn parse_function_name(input: &str) -> IResult<&str, &str> {
    terminated(take_until(">"), char('>'))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// Recognizes the `-name=` prefix of a keyword argument and returns `name`.
///
/// Anything that is not an identifier between `-` and `=` is rejected, so a
/// negative number such as `-5 -> int` stays a positional argument.
pub fn parse_keyword(input: &str) -> IResult<&str, &str> {
    delimited(char('-'), identifier, pair(space0, char('=')))(input)
}

/// Reads the type name of a `-> type` hint, with the arrow already consumed.
pub fn parse_type_name(input: &str) -> IResult<&str, &str> {
    preceded(space0, identifier)(input)
}

/// Reads the `(key_type, value_type)` form of a map type hint.
pub fn parse_pair_hint(input: &str) -> IResult<&str, (&str, &str)> {
    delimited(
        char('('),
        pair(terminated(take_until(","), char(',')), take_until(")")),
        char(')'),
    )(input)
}
