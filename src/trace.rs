//! Diagnostic trace of a parse.
//!
//! The analyzer reports what it is doing to an optional [`TraceSink`]. Sinks only
//! observe: nothing they do can change the parse.

use std::sync::Mutex;

use tracing::info;

use crate::ast::NodeKind;

#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A node of `kind` starts at `input`.
    Enter { kind: NodeKind, input: String },
    /// A `--name` setting was applied to the current node.
    Setting { name: String },
    /// A child was appended to the current node.
    Child { value: String },
    /// A node of `kind` finished as `output`.
    Leave { kind: NodeKind, output: String },
}

pub trait TraceSink: Send + Sync {
    fn record(&self, event: &TraceEvent);
}

/// Forwards trace events to `tracing` under the `runevent::trace` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&self, event: &TraceEvent) {
        match event {
            TraceEvent::Enter { kind, input } => {
                info!(target: "runevent::trace", %kind, input = %input, "enter")
            }
            TraceEvent::Setting { name } => info!(target: "runevent::trace", setting = %name, "setting"),
            TraceEvent::Child { value } => info!(target: "runevent::trace", child = %value, "append"),
            TraceEvent::Leave { kind, output } => {
                info!(target: "runevent::trace", %kind, output = %output, "leave")
            }
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl TraceSink for RecordingSink {
    fn record(&self, event: &TraceEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
