use std::num::NonZeroUsize;

use async_recursion::async_recursion;
use futures::StreamExt;
use thiserror::Error;
use tracing::debug;

use super::value::{Value, ValueMap};
use crate::ast::{FunctionNode, ListNode, MapNode, Node, TryNode};
use crate::registry::CallableError;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("function `{name}` failed: {source}")]
    Callable {
        name: String,
        #[source]
        source: CallableError,
    },
    #[error("worker task failed: {0}")]
    Join(String),
}

/// Walks a parsed tree and produces its value.
///
/// Nodes flagged `--parallel` have their children spawned as tokio tasks, with at
/// most `workers` of them in flight at once. Results always come back in the
/// order the children were written.
#[derive(Debug, Clone)]
pub struct Evaluator {
    workers: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self { workers }
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    #[async_recursion]
    pub async fn evaluate(&self, node: &Node) -> EvalResult<Value> {
        match node {
            Node::Literal(value) => Ok(value.clone()),
            Node::List(list) => self.evaluate_list(list).await.map(Value::List),
            Node::Map(map) => self.eval_map(map).await.map(Value::Map),
            Node::Function(function) => self.evaluate_function(function).await,
            Node::Try(chain) => self.eval_try(chain).await,
        }
    }

    pub async fn evaluate_list(&self, list: &ListNode) -> EvalResult<Vec<Value>> {
        self.eval_all(list.elements.iter().collect(), list.parallel)
            .await
    }

    pub async fn evaluate_function(&self, function: &FunctionNode) -> EvalResult<Value> {
        let name = function.target.name();
        let args = self.evaluate_list(&function.args).await?;
        let kwargs = self.eval_map(&function.kwargs).await?;
        debug!(name, args = args.len(), kwargs = kwargs.len(), "calling function");

        function
            .target
            .callable()
            .call(args, kwargs)
            .await
            .map_err(|source| EvalError::Callable {
                name: name.to_string(),
                source,
            })
    }

    // Keys and values are evaluated as one flat sequence so `--parallel` covers both.
    async fn eval_map(&self, map: &MapNode) -> EvalResult<ValueMap> {
        let nodes = map
            .entries
            .iter()
            .flat_map(|(key, value)| [key, value])
            .collect();
        let mut values = self.eval_all(nodes, map.parallel).await?.into_iter();

        let mut result = ValueMap::new();
        while let (Some(key), Some(value)) = (values.next(), values.next()) {
            result.insert(key, value);
        }
        Ok(result)
    }

    /// Alternatives run in order until one succeeds; if none does the result is [`Value::Unit`].
    async fn eval_try(&self, chain: &TryNode) -> EvalResult<Value> {
        let mut alternative = chain;
        loop {
            match self.evaluate(&alternative.precedent).await {
                Ok(value) => return Ok(value),
                Err(error) => match alternative.fallback.as_deref() {
                    Some(fallback) => {
                        debug!(%error, "try alternative failed, falling back");
                        alternative = fallback;
                    }
                    None => {
                        debug!(%error, "every try alternative failed");
                        return Ok(Value::Unit);
                    }
                },
            }
        }
    }

    async fn eval_all(&self, nodes: Vec<&Node>, parallel: bool) -> EvalResult<Vec<Value>> {
        if parallel && nodes.len() > 1 {
            return self.eval_parallel(nodes).await;
        }
        let mut values = Vec::with_capacity(nodes.len());
        for node in nodes {
            values.push(self.evaluate(node).await?);
        }
        Ok(values)
    }

    async fn eval_parallel(&self, nodes: Vec<&Node>) -> EvalResult<Vec<Value>> {
        debug!(tasks = nodes.len(), workers = self.workers, "evaluating in parallel");
        let mut slots: Vec<Option<Value>> = vec![None; nodes.len()];
        let mut completed = futures::stream::iter(nodes.into_iter().cloned().enumerate())
            .map(|(index, node)| {
                let evaluator = self.clone();
                let task = tokio::spawn(async move { evaluator.evaluate(&node).await });
                async move { (index, task.await) }
            })
            .buffer_unordered(self.workers);

        // Completion order; the first failure ends the batch and no further task is started.
        while let Some((index, joined)) = completed.next().await {
            let value = joined.map_err(|e| EvalError::Join(e.to_string()))??;
            slots[index] = Some(value);
        }
        Ok(slots.into_iter().flatten().collect())
    }
}
