//! Expression tree produced by the analyzer and walked by the evaluator.
//!
//! Every interior node owns its children. Trees are built once during parsing
//! and only read afterwards, which is what lets the evaluator clone subtrees into
//! worker tasks without any locking.

use core::fmt;
use std::sync::Arc;

use strum_macros::{Display, EnumString};

use crate::analyzer::error::{ParseError, ParseResult};
use crate::eval::value::Value;
use crate::registry::Callable;
use crate::tokenizer::types::{CoercionResult, TypeName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    Literal,
    List,
    Map,
    Function,
    Try,
}

/// Boolean settings enabled with a `--name` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Setting {
    /// Evaluate children concurrently on the worker pool.
    Parallel,
}

impl Setting {
    fn lookup(node: NodeKind, name: &str) -> ParseResult<Self> {
        name.trim()
            .parse()
            .map_err(|_| ParseError::UnknownSetting {
                node,
                setting: name.trim().to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(Value),
    List(ListNode),
    Map(MapNode),
    Function(FunctionNode),
    Try(TryNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Literal(_) => NodeKind::Literal,
            Node::List(_) => NodeKind::List,
            Node::Map(_) => NodeKind::Map,
            Node::Function(_) => NodeKind::Function,
            Node::Try(_) => NodeKind::Try,
        }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Node::Literal(value.into())
    }

    /// Applies a scalar type hint.
    ///
    /// Untyped literals are converted and lists are retyped element by element at
    /// any depth. Maps, functions, try chains and already typed literals are kept as is.
    pub fn broadcast(self, type_name: TypeName) -> CoercionResult<Node> {
        match self {
            Node::Literal(Value::String(text)) => type_name.coerce(&text).map(Node::Literal),
            Node::List(list) => list.broadcast(type_name).map(Node::List),
            other => Ok(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListNode {
    pub elements: Vec<Node>,
    pub parallel: bool,
}

impl ListNode {
    pub fn new(elements: Vec<Node>) -> Self {
        Self {
            elements,
            parallel: false,
        }
    }

    pub fn apply_setting(&mut self, name: &str) -> ParseResult<Setting> {
        let setting = Setting::lookup(NodeKind::List, name)?;
        match setting {
            Setting::Parallel => self.parallel = true,
        }
        Ok(setting)
    }

    pub fn broadcast(self, type_name: TypeName) -> CoercionResult<Self> {
        let elements = self
            .elements
            .into_iter()
            .map(|element| element.broadcast(type_name))
            .collect::<CoercionResult<Vec<_>>>()?;
        Ok(Self { elements, ..self })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapNode {
    pub entries: Vec<(Node, Node)>,
    pub parallel: bool,
}

impl MapNode {
    pub fn new(entries: Vec<(Node, Node)>) -> Self {
        Self {
            entries,
            parallel: false,
        }
    }

    pub fn apply_setting(&mut self, name: &str) -> ParseResult<Setting> {
        let setting = Setting::lookup(NodeKind::Map, name)?;
        match setting {
            Setting::Parallel => self.parallel = true,
        }
        Ok(setting)
    }

    /// Applies a `(key_type, value_type)` hint one level deep.
    ///
    /// A list stored as a value is still broadcast into; a nested map is not retyped.
    pub fn retype(self, key_type: TypeName, value_type: TypeName) -> CoercionResult<Self> {
        let entries = self
            .entries
            .into_iter()
            .map(|(key, value)| Ok((key.broadcast(key_type)?, value.broadcast(value_type)?)))
            .collect::<CoercionResult<Vec<_>>>()?;
        Ok(Self { entries, ..self })
    }
}

/// The callable a function node invokes, resolved while parsing.
#[derive(Clone)]
pub struct Target {
    name: String,
    callable: Arc<dyn Callable>,
}

impl Target {
    pub fn new(name: impl Into<String>, callable: Arc<dyn Callable>) -> Self {
        Self {
            name: name.into(),
            callable,
        }
    }

    /// A callable handed in by the host rather than looked up by name.
    pub fn bound(callable: Arc<dyn Callable>) -> Self {
        Self::new(callable.name().to_string(), callable)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn callable(&self) -> &Arc<dyn Callable> {
        &self.callable
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Target").field(&self.name).finish()
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    pub target: Target,
    pub args: ListNode,
    pub kwargs: MapNode,
}

impl FunctionNode {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            args: ListNode::default(),
            kwargs: MapNode::default(),
        }
    }

    /// `--parallel` on a function evaluates both its positional and keyword arguments concurrently.
    pub fn apply_setting(&mut self, name: &str) -> ParseResult<Setting> {
        let setting = Setting::lookup(NodeKind::Function, name)?;
        match setting {
            Setting::Parallel => {
                self.args.parallel = true;
                self.kwargs.parallel = true;
            }
        }
        Ok(setting)
    }
}

/// One alternative of a try chain; `fallback` links to the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct TryNode {
    pub precedent: Box<Node>,
    pub fallback: Option<Box<TryNode>>,
}

impl TryNode {
    pub fn new(precedent: Node) -> Self {
        Self {
            precedent: Box::new(precedent),
            fallback: None,
        }
    }

    pub fn with_fallback(precedent: Node, fallback: TryNode) -> Self {
        Self {
            precedent: Box::new(precedent),
            fallback: Some(Box::new(fallback)),
        }
    }

    /// Number of alternatives in the chain starting here.
    pub fn len(&self) -> usize {
        1 + self.fallback.as_ref().map_or(0, |fallback| fallback.len())
    }
}

// Renders the node back in command syntax. Used by trace output and error messages.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(Value::String(s)) => write!(f, "{}", s),
            Node::Literal(Value::Integer(i)) => write!(f, "{} -> int", i),
            Node::Literal(Value::Float(x)) => write!(f, "{:?} -> float", x),
            Node::Literal(Value::Boolean(b)) => {
                write!(f, "{} -> bool", if *b { "True" } else { "False" })
            }
            Node::Literal(other) => write!(f, "{}", other),
            Node::List(list) => write!(f, "{}", list),
            Node::Map(map) => write!(f, "{}", map),
            Node::Function(function) => write!(f, "{}", function),
            Node::Try(node) => write!(f, "{}", node),
        }
    }
}

impl fmt::Display for TryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<try>")?;
        let mut alternative = Some(self);
        let mut first = true;
        while let Some(current) = alternative {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", current.precedent)?;
            first = false;
            alternative = current.fallback.as_deref();
        }
        write!(f, "</try>")
    }
}

impl fmt::Display for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        if self.parallel {
            write!(f, "--parallel")?;
            if !self.elements.is_empty() {
                write!(f, ", ")?;
            }
        }
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for MapNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        if self.parallel {
            write!(f, "--parallel")?;
            if !self.entries.is_empty() {
                write!(f, ", ")?;
            }
        }
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for FunctionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<run:{}>", self.target.name())?;
        let mut parts = Vec::new();
        if self.args.parallel {
            parts.push("--parallel".to_string());
        }
        parts.extend(self.args.elements.iter().map(|arg| arg.to_string()));
        parts.extend(
            self.kwargs
                .entries
                .iter()
                .map(|(key, value)| format!("-{}={}", key, value)),
        );
        write!(f, "{}</run>", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text_list(items: &[&str]) -> ListNode {
        ListNode::new(items.iter().map(|item| Node::literal(*item)).collect())
    }

    #[test]
    fn test_nested_broadcast() {
        let list = ListNode::new(vec![
            Node::List(text_list(&["1", "2"])),
            Node::List(text_list(&["3"])),
        ]);
        let typed = list.broadcast(TypeName::Int).unwrap();
        assert_eq!(
            typed,
            ListNode::new(vec![
                Node::List(ListNode::new(vec![Node::literal(1), Node::literal(2)])),
                Node::List(ListNode::new(vec![Node::literal(3)])),
            ])
        );
    }

    #[test]
    fn test_broadcast_keeps_typed_literals_and_maps() {
        let nested = Node::Map(MapNode::new(vec![(Node::literal("k"), Node::literal("1"))]));
        let list = ListNode::new(vec![Node::literal(2.5), nested.clone()]);
        let typed = list.broadcast(TypeName::Int).unwrap();
        assert_eq!(typed.elements, vec![Node::literal(2.5), nested]);
    }

    #[test]
    fn test_retype_is_one_level_deep() {
        let inner = Node::Map(MapNode::new(vec![(Node::literal("1"), Node::literal("2"))]));
        let map = MapNode::new(vec![
            (Node::literal("1"), Node::List(text_list(&["2", "3"]))),
            (Node::literal("4"), inner.clone()),
        ]);
        let typed = map.retype(TypeName::Int, TypeName::Float).unwrap();
        assert_eq!(
            typed.entries,
            vec![
                (
                    Node::literal(1),
                    Node::List(ListNode::new(vec![Node::literal(2.0), Node::literal(3.0)]))
                ),
                (Node::literal(4), inner),
            ]
        );
    }

    #[test]
    fn test_settings() {
        let mut list = ListNode::default();
        assert_eq!(list.apply_setting("parallel").unwrap(), Setting::Parallel);
        assert!(list.parallel);

        let err = MapNode::default().apply_setting("fast").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnknownSetting { node: NodeKind::Map, ref setting } if setting == "fast"
        ));
    }

    #[test]
    fn test_try_chain_len() {
        let chain = TryNode::with_fallback(
            Node::literal("a"),
            TryNode::with_fallback(Node::literal("b"), TryNode::new(Node::literal("c"))),
        );
        assert_eq!(chain.len(), 3);
        assert_eq!(Node::Try(chain).to_string(), "<try>a, b, c</try>");
    }

    #[test]
    fn test_display_typed_list() {
        let mut list = ListNode::new(vec![Node::literal(1), Node::literal(true)]);
        list.parallel = true;
        assert_eq!(list.to_string(), "[--parallel, 1 -> int, True -> bool]");
    }
}
