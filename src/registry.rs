//! Symbol registry: where `<run:dotted.name>` headers find their callables.
//!
//! The host populates a [`Registry`] before parsing. The first segment of a dotted
//! name picks an entry at the root, each further segment looks inside a nested
//! namespace.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::eval::value::{Value, ValueMap};

pub type CallResult = Result<Value, CallableError>;
pub type SymbolResult<T> = Result<T, SymbolError>;

/// Error raised by a callable.
#[derive(Error, Debug)]
pub enum CallableError {
    #[error("{0}")]
    Failed(String),
    #[error("missing argument `{0}`")]
    MissingArgument(String),
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CallableError {
    pub fn failed(message: impl Into<String>) -> Self {
        CallableError::Failed(message.into())
    }

    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CallableError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolError {
    #[error("empty function name")]
    EmptyPath,
    #[error("unknown symbol `{segment}` in `{path}`")]
    Unknown { path: String, segment: String },
    #[error("`{segment}` in `{path}` is a function, not a namespace")]
    NotNamespace { path: String, segment: String },
    #[error("`{0}` is a namespace, not a function")]
    NotCallable(String),
}

/// Anything a function node can invoke.
///
/// Positional arguments arrive in order, keyword arguments in the order they were written.
#[async_trait]
pub trait Callable: Send + Sync {
    async fn call(&self, args: Vec<Value>, kwargs: ValueMap) -> CallResult;

    fn name(&self) -> &str;
}

/// Adapts a plain closure into a [`Callable`].
pub struct FnCallable<F> {
    name: String,
    function: F,
}

impl<F> FnCallable<F>
where
    F: Fn(Vec<Value>, ValueMap) -> CallResult + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, function: F) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }
}

#[async_trait]
impl<F> Callable for FnCallable<F>
where
    F: Fn(Vec<Value>, ValueMap) -> CallResult + Send + Sync + 'static,
{
    async fn call(&self, args: Vec<Value>, kwargs: ValueMap) -> CallResult {
        (self.function)(args, kwargs)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Callables and nested namespaces of one level. A name is one or the other.
#[derive(Clone, Default)]
pub struct Registry {
    callables: HashMap<String, Arc<dyn Callable>>,
    namespaces: HashMap<String, Registry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callable` under a possibly dotted `name`, creating namespaces on the way.
    ///
    /// A later registration replaces whatever was stored under the same name.
    pub fn register(&mut self, name: &str, callable: Arc<dyn Callable>) -> &mut Self {
        let (registry, leaf) = match name.rsplit_once('.') {
            Some((namespace, leaf)) => (self.namespace(namespace), leaf),
            None => (&mut *self, name),
        };
        registry.insert_callable(leaf.trim(), callable);
        self
    }

    /// Registers a closure under `name`.
    pub fn register_fn<F>(&mut self, name: &str, function: F) -> &mut Self
    where
        F: Fn(Vec<Value>, ValueMap) -> CallResult + Send + Sync + 'static,
    {
        self.register(name, Arc::new(FnCallable::new(name, function)))
    }

    /// Returns the namespace at a dotted `path`, creating it if needed.
    ///
    /// A callable registered under one of the segments is dropped.
    pub fn namespace(&mut self, path: &str) -> &mut Registry {
        path.split('.')
            .map(str::trim)
            .fold(self, |registry, segment| {
                if let Some(callable) = registry.callables.remove(segment) {
                    warn!(
                        segment,
                        callable = callable.name(),
                        "namespace replaces a registered callable"
                    );
                }
                registry.namespaces.entry(segment.to_string()).or_default()
            })
    }

    fn insert_callable(&mut self, name: &str, callable: Arc<dyn Callable>) {
        if self.namespaces.remove(name).is_some() {
            warn!(name, "callable replaces a namespace");
        }
        self.callables.insert(name.to_string(), callable);
    }

    /// Looks up a dotted name.
    pub fn resolve(&self, path: &str) -> SymbolResult<Arc<dyn Callable>> {
        let path = path.trim();
        if path.is_empty() {
            return Err(SymbolError::EmptyPath);
        }

        let mut segments = path.split('.').map(str::trim).peekable();
        let mut registry = self;
        while let Some(segment) = segments.next() {
            let last = segments.peek().is_none();
            match (registry.callables.get(segment), registry.namespaces.get(segment)) {
                (Some(callable), _) if last => return Ok(callable.clone()),
                (Some(_), _) => {
                    return Err(SymbolError::NotNamespace {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    })
                }
                (None, Some(namespace)) if !last => registry = namespace,
                (None, Some(_)) => return Err(SymbolError::NotCallable(path.to_string())),
                (None, None) => {
                    return Err(SymbolError::Unknown {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    })
                }
            }
        }
        Err(SymbolError::EmptyPath)
    }

    /// Every callable name, dotted and sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names("", &mut names);
        names.sort();
        names
    }

    fn collect_names(&self, prefix: &str, names: &mut Vec<String>) {
        let qualify = |segment: &str| {
            if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{}.{}", prefix, segment)
            }
        };
        names.extend(self.callables.keys().map(|segment| qualify(segment)));
        for (segment, namespace) in &self.namespaces {
            namespace.collect_names(&qualify(segment), names);
        }
    }
}

/// Fetches an argument by position, falling back to a keyword argument of the same name.
pub fn argument<'a>(
    args: &'a [Value],
    kwargs: &'a ValueMap,
    index: usize,
    name: &str,
) -> Result<&'a Value, CallableError> {
    args.get(index)
        .or_else(|| kwargs.get_str(name))
        .ok_or_else(|| CallableError::MissingArgument(name.to_string()))
}
