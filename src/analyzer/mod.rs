//! # Analyzer (Parser) System
//!
//! The analyzer turns an encoded command line into a tree of [`Node`](crate::ast::Node)s
//! by recursive descent. It works directly on text: each step receives the remaining
//! input plus the exit delimiters that may end it, and returns the parsed node, the exit
//! it stopped at and the new remainder.
//!
//! ## Position in the Pipeline
//!
//! ```text
//! Command Line → Escape Codec → Analyzer → Evaluator
//! ```
//!
//! Symbols named in `<run:...>` headers are resolved against a
//! [`Registry`](crate::registry::Registry) while parsing, so an unknown name fails
//! before anything is evaluated.

pub mod error;
pub mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::{Parser, Step};
