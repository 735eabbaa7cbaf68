//! # runevent: one-line command language
//!
//! runevent turns a flat string, usually assembled from process arguments, into a
//! tree of function calls, literals, lists, maps and fallback chains, and evaluates
//! that tree.
//!
//! ```text
//! <run:math.add> 2 -> int, <try> <run:env.get>N</run>, 3 -> int </try> </run>
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//! Command text → Escape Codec → Parser → Expression tree → Evaluator → Value
//! ```
//!
//! ### Stage 1: Escaping
//!
//! Text between backticks may contain the reserved characters `( ) , - : > [ ] { }`.
//! The [`tokenizer::escape`] codec hides them behind sentinels before parsing and
//! restores them when a leaf token is captured.
//!
//! ### Stage 2: Parsing
//!
//! The [`analyzer`] is a recursive-descent parser that works on the remaining text
//! only. It builds [`ast::Node`] values of five kinds:
//!
//! - Literal: `text` or `text -> type` with `type` one of `str`, `int`, `float`, `bool`
//! - List: `[a, b, ...]`, optionally `-> type` to retype every element
//! - Map: `{k: v, ...}`, optionally `-> (key_type, value_type)`
//! - Function: `<run:dotted.name> positional, -keyword=value </run>`
//! - Try: `<try> first, second, ... </try>`, the first alternative that succeeds
//!
//! Function names are resolved against a [`registry::Registry`] while parsing.
//! `--parallel` inside a list, map or function marks its children for concurrent
//! evaluation.
//!
//! ### Stage 3: Evaluation
//!
//! The [`eval::Evaluator`] walks the tree. Children of `--parallel` nodes run as
//! tokio tasks on a bounded pool and their results keep the written order. A try
//! chain is the only place where errors are swallowed.

pub mod analyzer;
pub mod ast;
pub mod builtins;
pub mod config;
pub mod error;
pub mod eval;
pub mod registry;
pub mod tokenizer;
pub mod trace;

use std::sync::Arc;

pub use analyzer::{ParseError, ParseResult, Parser};
pub use ast::{FunctionNode, ListNode, MapNode, Node, NodeKind, Setting, TryNode};
pub use config::RunConfig;
pub use error::{Error, InternalResult};
pub use eval::{EvalError, EvalResult, Evaluator, Value, ValueMap};
pub use registry::{CallResult, Callable, CallableError, FnCallable, Registry, SymbolError};

use trace::{TraceSink, TracingSink};

/// Parses a command into its top-level list.
pub fn parse(registry: &Registry, command: &str) -> ParseResult<ListNode> {
    Parser::new(registry).parse(command)
}

/// Parses a command as the arguments of `callable`.
pub fn parse_bound(
    registry: &Registry,
    callable: Arc<dyn Callable>,
    command: &str,
) -> ParseResult<FunctionNode> {
    Parser::new(registry).parse_bound(callable, command)
}

/// Evaluates a node with a default-sized worker pool.
pub async fn evaluate(node: &Node) -> EvalResult<Value> {
    Evaluator::default().evaluate(node).await
}

fn parser<'r>(registry: &'r Registry, config: &RunConfig) -> Parser<'r> {
    let parser = Parser::new(registry);
    if config.trace {
        let sink: Arc<dyn TraceSink> = Arc::new(TracingSink);
        parser.with_trace(sink)
    } else {
        parser
    }
}

/// Parses and evaluates a command, returning one value per top-level item.
#[tracing::instrument(level = "debug", skip(registry, config))]
pub async fn run(
    registry: &Registry,
    command: &str,
    config: &RunConfig,
) -> InternalResult<Vec<Value>> {
    let mut list = parser(registry, config).parse(command)?;
    list.parallel |= config.parallel;
    let values = config.evaluator().evaluate_list(&list).await?;
    Ok(values)
}

/// Drives a host-supplied callable from a command holding only its arguments.
#[tracing::instrument(level = "debug", skip(registry, callable, config))]
pub async fn run_bound(
    registry: &Registry,
    callable: Arc<dyn Callable>,
    command: &str,
    config: &RunConfig,
) -> InternalResult<Value> {
    let mut function = parser(registry, config).parse_bound(callable, command)?;
    if config.parallel {
        function.args.parallel = true;
        function.kwargs.parallel = true;
    }
    let value = config.evaluator().evaluate_function(&function).await?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}
