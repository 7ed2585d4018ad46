//! Graph construction options.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Graph`](crate::Graph).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Number of vertices to reserve room for in the registry
    pub initial_capacity: usize,

    /// Pretty-print JSON snapshots produced by `to_json` / `write_json`
    pub pretty_json: bool,
}

impl GraphConfig {
    /// Reserve room for `capacity` vertices up front
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enable or disable pretty JSON output
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }
}
