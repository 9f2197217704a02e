use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// One row of a result set, column name to value.
pub type QueryRow = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<QueryRow>,
    #[serde(rename = "executionTime")]
    pub execution_time_ms: u64,
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryExecution {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<QueryResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<QueryError>,
}

impl QueryExecution {
    pub fn ok(result: QueryResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(error: QueryError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

/// Executes query text. Implementations never panic on bad input; failures
/// come back as `QueryExecution::failed`.
pub trait QueryEngine: Send + Sync {
    fn execute(&self, query: &str) -> QueryExecution;

    /// Delay the runtime waits before calling `execute`.
    fn latency(&self) -> Duration {
        Duration::ZERO
    }
}
