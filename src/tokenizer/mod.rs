//! # Tokenizer Component
//!
//! The tokenizer holds the lexical layer of the command language: everything that
//! looks at raw text before the analyzer decides which node to build.
//!
//! ## Component Structure
//!
//! * [`symbol`]: Opening markers, exit delimiters and small `nom` recognizers
//! * [`cursor`]: Splitting the remaining text at the earliest exit delimiter
//! * [`escape`]: Hiding reserved characters inside backtick-protected regions
//! * [`types`]: The type coercion table applied to `value -> type` tokens
//!
//! ## Integration Points
//!
//! 1. **Input**: The assembled command line
//! 2. **Processing**: [`escape::encode`] once, then the analyzer repeatedly calls
//!    [`cursor::split_at_exit`] and [`escape::decode`] on captured leaves
//! 3. **Output**: Plain leaf text and typed [`Value`](crate::eval::value::Value)s

pub mod cursor;
pub mod escape;
pub mod symbol;
pub mod types;
