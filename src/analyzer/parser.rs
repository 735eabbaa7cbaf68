//! Recursive-descent parser for the command language.
//!
//! Every parse step takes the remaining (escaped) text together with the set of
//! delimiters that may end it, and returns a [`Step`]: what was parsed, which exit
//! delimiter was consumed after it, and the text that is left. Nothing else is
//! carried between steps.

use std::fmt::Display;
use std::sync::Arc;

use tracing::debug;

use super::error::{ParseError, ParseResult};
use crate::ast::{FunctionNode, ListNode, MapNode, Node, NodeKind, Target, TryNode};
use crate::registry::{Callable, Registry};
use crate::tokenizer::cursor::{skip_separator, split_at_exit, strip_exit, Split};
use crate::tokenizer::escape::{decode, encode};
use crate::tokenizer::symbol::{
    parse_function_name, parse_keyword, parse_opener, parse_type_name, Delimiter, Opener,
    SETTING_PREFIX, TYPE_ARROW,
};
use crate::tokenizer::types::{coerce, parse_map_hint, CoercionError, TypeName};
use crate::trace::{TraceEvent, TraceSink};

/// Parsed value, the exit delimiter consumed after it, and the remaining text.
pub type Step<'a, T = Node> = (T, Option<Delimiter>, &'a str);

const TOP_LEVEL: &[Delimiter] = &[Delimiter::Comma];
const LIST: &[Delimiter] = &[Delimiter::Comma, Delimiter::CloseBracket];
const KEY: &[Delimiter] = &[Delimiter::Colon];
const VALUE: &[Delimiter] = &[Delimiter::Comma, Delimiter::CloseBrace];
const ARGUMENT: &[Delimiter] = &[Delimiter::Comma, Delimiter::RunClose];
const BOUND: &[Delimiter] = &[Delimiter::Comma];
const TRY: &[Delimiter] = &[Delimiter::Comma, Delimiter::TryClose];

pub struct Parser<'r> {
    registry: &'r Registry,
    trace: Option<Arc<dyn TraceSink>>,
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            trace: None,
        }
    }

    pub fn with_trace(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Parses a whole command into its top-level list.
    ///
    /// Anything left over after the last item is a [`ParseError::TrailingInput`].
    pub fn parse(&self, command: &str) -> ParseResult<ListNode> {
        let (list, leftover) = self.parse_command(command)?;
        if !leftover.is_empty() {
            return Err(ParseError::TrailingInput {
                remainder: leftover,
            });
        }
        Ok(list)
    }

    /// Parses a command and returns the top-level list with the decoded leftover text.
    pub fn parse_command(&self, command: &str) -> ParseResult<(ListNode, String)> {
        let encoded = encode(command);
        let (list, rest) = self.parse_top_level(&encoded)?;
        Ok((list, decode(rest)))
    }

    /// Parses a command as the argument list of a callable supplied by the host.
    ///
    /// There is no `<run:...>` header or `</run>` footer; arguments run to the end of input.
    pub fn parse_bound(
        &self,
        callable: Arc<dyn Callable>,
        command: &str,
    ) -> ParseResult<FunctionNode> {
        let encoded = encode(command);
        self.enter(NodeKind::Function, &encoded);
        let function = FunctionNode::new(Target::bound(callable));
        let (function, rest) = self.parse_arguments(function, &encoded, BOUND, None)?;
        if !rest.is_empty() {
            return Err(ParseError::TrailingInput {
                remainder: decode(rest),
            });
        }
        self.leave(NodeKind::Function, &function);
        Ok(function)
    }

    fn parse_top_level<'a>(&self, input: &'a str) -> ParseResult<(ListNode, &'a str)> {
        self.enter(NodeKind::List, input);
        let mut list = ListNode::default();
        let mut rest = input.trim();
        while !rest.is_empty() {
            let (exit, after) = match setting(rest, TOP_LEVEL) {
                Some((name, split)) => {
                    list.apply_setting(name)?;
                    self.setting(name);
                    (split.exit, split.rest)
                }
                None => {
                    let (node, exit, after) = self.parse_next(rest, TOP_LEVEL)?;
                    self.child(&node);
                    list.elements.push(node);
                    (exit, after)
                }
            };
            rest = after;
            if exit.is_none() {
                break;
            }
        }
        self.leave(NodeKind::List, &list);
        Ok((list, rest))
    }

    /// Parses one node of any kind, stopping at the earliest of `exits`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn parse_next<'a>(&self, input: &'a str, exits: &[Delimiter]) -> ParseResult<Step<'a>> {
        let input = input.trim_start();
        let (node, rest) = match parse_opener(input) {
            Ok((rest, Opener::Function)) => {
                let (function, rest) = self.parse_function(rest)?;
                (Node::Function(function), rest)
            }
            Ok((rest, Opener::Try)) => {
                let (chain, rest) = self.parse_try(rest)?;
                (Node::Try(chain), rest)
            }
            Ok((rest, Opener::List)) => {
                let (list, rest) = self.parse_list(rest)?;
                (Node::List(list), rest)
            }
            Ok((rest, Opener::Map)) => {
                let (map, rest) = self.parse_map(rest)?;
                (Node::Map(map), rest)
            }
            Err(_) => return self.parse_scalar(input, exits),
        };
        let (exit, rest) = strip_exit(rest, exits);
        Ok((node, exit, rest))
    }

    /// A leaf token, optionally followed by `-> type`.
    ///
    /// The hint is split off before the token is decoded, so an escaped arrow stays text.
    fn parse_scalar<'a>(&self, input: &'a str, exits: &[Delimiter]) -> ParseResult<Step<'a>> {
        let Split { token, exit, rest } = split_at_exit(input, exits);
        let node = match token.split_once(TYPE_ARROW) {
            Some((text, type_name)) => Node::Literal(coerce(&decode(text.trim()), type_name)?),
            None => Node::literal(decode(token)),
        };
        Ok((node, exit, rest))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn parse_list<'a>(&self, input: &'a str) -> ParseResult<(ListNode, &'a str)> {
        self.enter(NodeKind::List, input);
        let mut list = ListNode::default();
        let mut rest = skip_separator(input);
        loop {
            if let (Some(_), after) = strip_exit(rest, &[Delimiter::CloseBracket]) {
                rest = after;
                break;
            }
            if rest.is_empty() {
                return Err(ParseError::unterminated(NodeKind::List, input));
            }
            let (exit, after) = match setting(rest, LIST) {
                Some((name, split)) => {
                    list.apply_setting(name)?;
                    self.setting(name);
                    (split.exit, split.rest)
                }
                None => {
                    let (node, exit, after) = self.parse_next(rest, LIST)?;
                    self.child(&node);
                    list.elements.push(node);
                    (exit, after)
                }
            };
            rest = after;
            match exit {
                Some(Delimiter::CloseBracket) => break,
                Some(_) => {}
                None if rest.is_empty() => {
                    return Err(ParseError::unterminated(NodeKind::List, input))
                }
                None => return Err(ParseError::expected("`,` or `]`", rest)),
            }
        }

        let (list, rest) = match type_hint(rest) {
            Some(hint) => {
                let (after, name) = parse_type_name(hint)
                    .map_err(|_| CoercionError::UnknownType(hint.trim().to_string()))?;
                let type_name = TypeName::lookup(name)?;
                (list.broadcast(type_name)?, after)
            }
            None => (list, rest),
        };
        self.leave(NodeKind::List, &list);
        Ok((list, rest))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn parse_map<'a>(&self, input: &'a str) -> ParseResult<(MapNode, &'a str)> {
        self.enter(NodeKind::Map, input);
        let mut map = MapNode::default();
        let mut rest = skip_separator(input);
        loop {
            if let (Some(_), after) = strip_exit(rest, &[Delimiter::CloseBrace]) {
                rest = after;
                break;
            }
            if rest.is_empty() {
                return Err(ParseError::unterminated(NodeKind::Map, input));
            }
            let (exit, after) = match setting(rest, VALUE) {
                Some((name, split)) => {
                    map.apply_setting(name)?;
                    self.setting(name);
                    (split.exit, split.rest)
                }
                None => {
                    let (key, exit, after) = self.parse_next(rest, KEY)?;
                    if exit != Some(Delimiter::Colon) {
                        return Err(ParseError::expected("`:`", rest));
                    }
                    let (value, exit, after) = self.parse_next(after, VALUE)?;
                    self.child(&format!("{}: {}", key, value));
                    map.entries.push((key, value));
                    (exit, after)
                }
            };
            rest = after;
            match exit {
                Some(Delimiter::CloseBrace) => break,
                Some(_) => {}
                None if rest.is_empty() => {
                    return Err(ParseError::unterminated(NodeKind::Map, input))
                }
                None => return Err(ParseError::expected("`,` or `}`", rest)),
            }
        }

        let (map, rest) = match type_hint(rest) {
            Some(hint) => {
                let (key_type, value_type, after) = parse_map_hint(hint)?;
                (map.retype(key_type, value_type)?, after)
            }
            None => (map, rest),
        };
        self.leave(NodeKind::Map, &map);
        Ok((map, rest))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn parse_function<'a>(&self, input: &'a str) -> ParseResult<(FunctionNode, &'a str)> {
        self.enter(NodeKind::Function, input);
        let (rest, name) = parse_function_name(input)
            .map_err(|_| ParseError::unterminated(NodeKind::Function, input))?;
        let name = name.trim();
        let callable = self.registry.resolve(name)?;
        debug!(name, "resolved function");

        let function = FunctionNode::new(Target::new(name, callable));
        let (function, rest) =
            self.parse_arguments(function, rest, ARGUMENT, Some(Delimiter::RunClose))?;
        self.leave(NodeKind::Function, &function);
        Ok((function, rest))
    }

    /// Fills a function's positional and keyword arguments.
    ///
    /// Without a `closer` the arguments run until the input is exhausted and the
    /// returned remainder is whatever could not be consumed.
    fn parse_arguments<'a>(
        &self,
        mut function: FunctionNode,
        input: &'a str,
        exits: &[Delimiter],
        closer: Option<Delimiter>,
    ) -> ParseResult<(FunctionNode, &'a str)> {
        let mut rest = skip_separator(input);
        loop {
            if let Some(closer) = closer {
                if let (Some(_), after) = strip_exit(rest, &[closer]) {
                    rest = after;
                    break;
                }
            }
            if rest.is_empty() {
                match closer {
                    Some(_) => return Err(ParseError::unterminated(NodeKind::Function, input)),
                    None => break,
                }
            }

            let (exit, after) = if let Some((name, split)) = setting(rest, exits) {
                function.apply_setting(name)?;
                self.setting(name);
                (split.exit, split.rest)
            } else if let Ok((value_input, keyword)) = parse_keyword(rest) {
                let (value, exit, after) = self.parse_next(value_input, exits)?;
                self.child(&format!("-{}={}", keyword, value));
                function.kwargs.entries.push((Node::literal(keyword), value));
                (exit, after)
            } else {
                let (arg, exit, after) = self.parse_next(rest, exits)?;
                self.child(&arg);
                function.args.elements.push(arg);
                (exit, after)
            };

            rest = after;
            match (exit, closer) {
                (Some(exit), Some(closer)) if exit == closer => break,
                (Some(_), _) => {}
                (None, None) => break,
                (None, Some(_)) if rest.is_empty() => {
                    return Err(ParseError::unterminated(NodeKind::Function, input))
                }
                (None, Some(_)) => return Err(ParseError::expected("`,` or `</run>`", rest)),
            }
        }
        Ok((function, rest))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn parse_try<'a>(&self, input: &'a str) -> ParseResult<(TryNode, &'a str)> {
        self.enter(NodeKind::Try, input);
        let rest = skip_separator(input);
        if let (Some(_), _) = strip_exit(rest, &[Delimiter::TryClose]) {
            return Err(ParseError::empty_try(input));
        }
        if rest.is_empty() {
            return Err(ParseError::unterminated(NodeKind::Try, input));
        }
        let (chain, rest) = self.parse_alternatives(rest, input)?;
        self.leave(NodeKind::Try, &chain);
        Ok((chain, rest))
    }

    /// Parses one alternative and, after a `,`, the rest of the chain as its fallback.
    fn parse_alternatives<'a>(
        &self,
        input: &'a str,
        chain_start: &str,
    ) -> ParseResult<(TryNode, &'a str)> {
        let (precedent, exit, rest) = self.parse_next(input, TRY)?;
        self.child(&precedent);
        match exit {
            Some(Delimiter::TryClose) => Ok((TryNode::new(precedent), rest)),
            Some(_) => {
                if let (Some(_), after) = strip_exit(rest, &[Delimiter::TryClose]) {
                    return Ok((TryNode::new(precedent), after));
                }
                if rest.is_empty() {
                    return Err(ParseError::unterminated(NodeKind::Try, chain_start));
                }
                let (fallback, rest) = self.parse_alternatives(rest, chain_start)?;
                Ok((TryNode::with_fallback(precedent, fallback), rest))
            }
            None if rest.is_empty() => Err(ParseError::unterminated(NodeKind::Try, chain_start)),
            None => Err(ParseError::expected("`,` or `</try>`", rest)),
        }
    }

    fn enter(&self, kind: NodeKind, input: &str) {
        if let Some(trace) = &self.trace {
            trace.record(&TraceEvent::Enter {
                kind,
                input: decode(input.trim()),
            });
        }
    }

    fn setting(&self, name: &str) {
        if let Some(trace) = &self.trace {
            trace.record(&TraceEvent::Setting {
                name: name.to_string(),
            });
        }
    }

    fn child(&self, value: &impl Display) {
        if let Some(trace) = &self.trace {
            trace.record(&TraceEvent::Child {
                value: value.to_string(),
            });
        }
    }

    fn leave(&self, kind: NodeKind, output: &impl Display) {
        if let Some(trace) = &self.trace {
            trace.record(&TraceEvent::Leave {
                kind,
                output: output.to_string(),
            });
        }
    }
}

/// Recognizes a `--name` token and returns `name` with the split around it.
fn setting<'a>(input: &'a str, exits: &[Delimiter]) -> Option<(&'a str, Split<'a>)> {
    if !input.starts_with(SETTING_PREFIX) {
        return None;
    }
    let split = split_at_exit(input, exits);
    split
        .token
        .strip_prefix(SETTING_PREFIX)
        .map(|name| (name, split))
}

/// Text after a `->` that follows a composite, if there is one.
fn type_hint(input: &str) -> Option<&str> {
    input.trim_start().strip_prefix(TYPE_ARROW)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::eval::value::Value;
    use crate::registry::{CallableError, SymbolError};
    use crate::trace::RecordingSink;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register_fn("add", |_, _| Ok(Value::Unit))
            .register_fn("greet", |_, _| Ok(Value::Unit))
            .register_fn("fail", |_, _| Err(CallableError::failed("boom")))
            .register_fn("os.path.join", |_, _| Ok(Value::Unit));
        registry
    }

    fn texts(items: &[&str]) -> Vec<Node> {
        items.iter().map(|item| Node::literal(*item)).collect()
    }

    fn function(node: &Node) -> &FunctionNode {
        match node {
            Node::Function(function) => function,
            other => panic!("expected a function, got {other:?}"),
        }
    }

    #[test]
    fn test_scalars_and_escapes() {
        let registry = registry();
        let list = Parser::new(&registry)
            .parse("plain, `a,b [c]`, `1->int`, 7 -> int")
            .unwrap();
        assert_eq!(
            list.elements,
            vec![
                Node::literal("plain"),
                Node::literal("a,b [c]"),
                Node::literal("1->int"),
                Node::literal(7),
            ]
        );
    }

    #[test]
    fn test_bool_hints() {
        let registry = registry();
        let list = Parser::new(&registry)
            .parse("0 -> bool, False -> bool, -> bool")
            .unwrap();
        assert_eq!(
            list.elements,
            vec![Node::literal(true), Node::literal(false), Node::literal(false)]
        );
    }

    #[test]
    fn test_list_broadcast() {
        let registry = registry();
        let parser = Parser::new(&registry);

        let list = parser.parse("[1,2,3] -> int").unwrap();
        assert_eq!(
            list.elements,
            vec![Node::List(ListNode::new(vec![
                Node::literal(1),
                Node::literal(2),
                Node::literal(3),
            ]))]
        );

        let list = parser.parse("[[1,2],[3]] -> float, tail").unwrap();
        assert_eq!(
            list.elements,
            vec![
                Node::List(ListNode::new(vec![
                    Node::List(ListNode::new(vec![Node::literal(1.0), Node::literal(2.0)])),
                    Node::List(ListNode::new(vec![Node::literal(3.0)])),
                ])),
                Node::literal("tail"),
            ]
        );
    }

    #[test]
    fn test_empty_and_argv_joined_lists() {
        let registry = registry();
        let parser = Parser::new(&registry);
        assert_eq!(
            parser.parse("[]").unwrap().elements,
            vec![Node::List(ListNode::default())]
        );
        assert_eq!(
            parser.parse("[,1,2,]").unwrap().elements,
            vec![Node::List(ListNode::new(texts(&["1", "2"])))]
        );
    }

    #[test]
    fn test_maps() {
        let registry = registry();
        let parser = Parser::new(&registry);

        let list = parser.parse("{a:1, a:2}").unwrap();
        assert_eq!(
            list.elements,
            vec![Node::Map(MapNode::new(vec![
                (Node::literal("a"), Node::literal("1")),
                (Node::literal("a"), Node::literal("2")),
            ]))]
        );

        let list = parser.parse("{--parallel, 1: [2, 3]} -> (int, float)").unwrap();
        let mut expected = MapNode::new(vec![(
            Node::literal(1),
            Node::List(ListNode::new(vec![Node::literal(2.0), Node::literal(3.0)])),
        )]);
        expected.parallel = true;
        assert_eq!(list.elements, vec![Node::Map(expected)]);
    }

    #[test]
    fn test_function_arguments() {
        let registry = registry();
        let parser = Parser::new(&registry);

        let list = parser.parse("<run:greet> -name=`World` </run>").unwrap();
        let greet = function(&list.elements[0]);
        assert_eq!(greet.target.name(), "greet");
        assert!(greet.args.elements.is_empty());
        assert_eq!(
            greet.kwargs.entries,
            vec![(Node::literal("name"), Node::literal("World"))]
        );

        let list = parser.parse("<run:add>-5 -> int, 3 -> int</run>").unwrap();
        assert_eq!(
            function(&list.elements[0]).args.elements,
            vec![Node::literal(-5), Node::literal(3)]
        );

        let list = parser.parse("<run:os.path.join>,a,b,</run>").unwrap();
        let join = function(&list.elements[0]);
        assert_eq!(join.target.name(), "os.path.join");
        assert_eq!(join.args.elements, texts(&["a", "b"]));
    }

    #[test]
    fn test_nested_functions() {
        let registry = registry();
        let list = Parser::new(&registry)
            .parse("<run:add> --parallel, <run:add>1, 2</run>, [x], -k={a: b} </run>, last")
            .unwrap();
        assert_eq!(list.elements.len(), 2);

        let outer = function(&list.elements[0]);
        assert!(outer.args.parallel);
        assert!(outer.kwargs.parallel);
        assert_eq!(outer.args.elements.len(), 2);
        assert_eq!(function(&outer.args.elements[0]).args.elements, texts(&["1", "2"]));
        assert_eq!(
            outer.kwargs.entries,
            vec![(
                Node::literal("k"),
                Node::Map(MapNode::new(vec![(Node::literal("a"), Node::literal("b"))]))
            )]
        );
        assert_eq!(list.elements[1], Node::literal("last"));
    }

    #[test]
    fn test_try_chains() {
        let registry = registry();
        let parser = Parser::new(&registry);

        let list = parser.parse("<try> <run:fail>/</run>, 42 -> int </try>").unwrap();
        match &list.elements[0] {
            Node::Try(chain) => {
                assert_eq!(chain.len(), 2);
                assert_eq!(function(&chain.precedent).args.elements, texts(&["/"]));
                let fallback = chain.fallback.as_deref().unwrap();
                assert_eq!(*fallback.precedent, Node::literal(42));
                assert!(fallback.fallback.is_none());
            }
            other => panic!("expected a try chain, got {other:?}"),
        }

        let list = parser
            .parse("<try><run:fail></run>, <try><run:fail></run></try>, ok</try>")
            .unwrap();
        assert_eq!(
            list.elements[0].to_string(),
            "<try><run:fail></run>, <try><run:fail></run></try>, ok</try>"
        );
    }

    #[test]
    fn test_structural_errors() {
        let registry = registry();
        let parser = Parser::new(&registry);

        assert!(matches!(
            parser.parse("[1, 2"),
            Err(ParseError::Unterminated {
                construct: NodeKind::List,
                ..
            })
        ));
        assert!(matches!(
            parser.parse("{a:1"),
            Err(ParseError::Unterminated {
                construct: NodeKind::Map,
                ..
            })
        ));
        assert!(matches!(
            parser.parse("<run:add>1, 2"),
            Err(ParseError::Unterminated {
                construct: NodeKind::Function,
                ..
            })
        ));
        assert!(matches!(
            parser.parse("<try>a, b"),
            Err(ParseError::Unterminated {
                construct: NodeKind::Try,
                ..
            })
        ));
        assert!(matches!(
            parser.parse("<try></try>"),
            Err(ParseError::EmptyTry { .. })
        ));
        assert!(matches!(
            parser.parse("{a}"),
            Err(ParseError::ExpectedDelimiter { .. })
        ));
        assert!(matches!(
            parser.parse("[[1] junk]"),
            Err(ParseError::ExpectedDelimiter { .. })
        ));
    }

    #[test]
    fn test_resolution_and_setting_errors() {
        let registry = registry();
        let parser = Parser::new(&registry);

        assert_eq!(
            parser.parse("<run:os.missing></run>"),
            Err(ParseError::Symbol(SymbolError::Unknown {
                path: "os.missing".to_string(),
                segment: "missing".to_string(),
            }))
        );
        assert_eq!(
            parser.parse("[--fast, 1]"),
            Err(ParseError::UnknownSetting {
                node: NodeKind::List,
                setting: "fast".to_string(),
            })
        );
        assert!(matches!(
            parser.parse("x -> long"),
            Err(ParseError::Coercion(CoercionError::UnknownType(_)))
        ));
        assert!(matches!(
            parser.parse("{a:1} -> int"),
            Err(ParseError::Coercion(CoercionError::InvalidMapHint(_)))
        ));
    }

    #[test]
    fn test_trailing_input() {
        let registry = registry();
        let parser = Parser::new(&registry);

        let (list, leftover) = parser.parse_command("[1] `a,b`").unwrap();
        assert_eq!(list.elements.len(), 1);
        assert_eq!(leftover, "a,b");
        assert_eq!(
            parser.parse("[1] junk"),
            Err(ParseError::TrailingInput {
                remainder: "junk".to_string(),
            })
        );
    }

    #[test]
    fn test_top_level_setting() {
        let registry = registry();
        let list = Parser::new(&registry).parse("--parallel, a, b").unwrap();
        assert!(list.parallel);
        assert_eq!(list.elements, texts(&["a", "b"]));
    }

    #[test]
    fn test_parse_bound() {
        let registry = registry();
        let add = registry.resolve("add").unwrap();
        let function = Parser::new(&registry)
            .parse_bound(add, "2 -> int, [x], -b=3 -> int")
            .unwrap();
        assert_eq!(function.target.name(), "add");
        assert_eq!(
            function.args.elements,
            vec![Node::literal(2), Node::List(ListNode::new(texts(&["x"])))]
        );
        assert_eq!(
            function.kwargs.entries,
            vec![(Node::literal("b"), Node::literal(3))]
        );
    }

    #[test]
    fn test_trace_events() {
        let registry = registry();
        let sink = Arc::new(RecordingSink::new());
        Parser::new(&registry)
            .with_trace(sink.clone())
            .parse("[--parallel, a]")
            .unwrap();

        let events = sink.events();
        assert!(matches!(
            events.first(),
            Some(TraceEvent::Enter {
                kind: NodeKind::List,
                ..
            })
        ));
        assert!(events.contains(&TraceEvent::Setting {
            name: "parallel".to_string()
        }));
        assert!(events.contains(&TraceEvent::Child {
            value: "a".to_string()
        }));
        assert_eq!(
            events.last(),
            Some(&TraceEvent::Leave {
                kind: NodeKind::List,
                output: "[[--parallel, a]]".to_string(),
            })
        );
    }
}
