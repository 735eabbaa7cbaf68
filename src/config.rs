use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{eval::Evaluator, Error, InternalResult};

/// Options for one invocation, loaded from JSON and overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Worker pool size for `--parallel` nodes. Defaults to the available parallelism.
    #[serde(default)]
    pub workers: Option<usize>,

    /// Report each parse step to the trace sink.
    #[serde(default)]
    pub trace: bool,

    /// Evaluate the top-level list in parallel.
    #[serde(default)]
    pub parallel: bool,

    #[serde(default)]
    pub json_output: bool,
}

impl RunConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    pub fn from_json(s: &str) -> InternalResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))
    }

    pub fn evaluator(&self) -> Evaluator {
        match self.workers {
            Some(workers) => Evaluator::with_workers(workers),
            None => Evaluator::default(),
        }
    }
}
