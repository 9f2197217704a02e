//! Query dispatcher state: status machine, current result and history.

use chrono::{DateTime, Utc};

use crate::kernel::services::ports::{QueryExecution, QueryResult};

pub const EMPTY_QUERY_MESSAGE: &str = "Query cannot be empty";
const FAILED_QUERY_MESSAGE: &str = "Query execution failed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryHistoryEntry {
    pub seq: u64,
    pub query: String,
    pub result: QueryResult,
    pub finished_at: DateTime<Utc>,
}

/// Outcome of asking to run a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStart {
    /// Engine call needed for `seq`.
    Execute { seq: u64 },
    /// Rejected before reaching the engine; only the status timer runs.
    Rejected { seq: u64 },
}

#[derive(Debug, Clone)]
pub struct QueryState {
    status: QueryStatus,
    result: Option<QueryResult>,
    history: Vec<QueryHistoryEntry>,
    history_limit: usize,
    in_flight: Option<(u64, String)>,
    seq: u64,
}

impl QueryState {
    pub fn new(history_limit: usize) -> Self {
        Self {
            status: QueryStatus::Idle,
            result: None,
            history: Vec::new(),
            history_limit,
            in_flight: None,
            seq: 0,
        }
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn result(&self) -> Option<&QueryResult> {
        self.result.as_ref()
    }

    /// Newest first.
    pub fn history(&self) -> &[QueryHistoryEntry] {
        &self.history
    }

    pub fn current_seq(&self) -> u64 {
        self.seq
    }

    pub fn start(&mut self, text: &str) -> QueryStart {
        self.seq += 1;
        let seq = self.seq;
        self.result = None;
        if text.trim().is_empty() {
            self.in_flight = None;
            self.status = QueryStatus::Error(EMPTY_QUERY_MESSAGE.to_string());
            return QueryStart::Rejected { seq };
        }
        self.in_flight = Some((seq, text.to_string()));
        self.status = QueryStatus::Loading;
        QueryStart::Execute { seq }
    }

    /// Applies an engine outcome. Returns false for a superseded request.
    pub fn finish(&mut self, seq: u64, execution: QueryExecution) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, current = self.seq, "stale query result discarded");
            return false;
        }
        let query = match self.in_flight.take() {
            Some((in_flight, query)) if in_flight == seq => query,
            _ => return false,
        };

        match (execution.success, execution.result) {
            (true, Some(result)) => {
                self.history.insert(
                    0,
                    QueryHistoryEntry {
                        seq,
                        query,
                        result: result.clone(),
                        finished_at: Utc::now(),
                    },
                );
                if self.history_limit > 0 {
                    self.history.truncate(self.history_limit);
                }
                self.result = Some(result);
                self.status = QueryStatus::Success;
            }
            _ => {
                let message = execution
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| FAILED_QUERY_MESSAGE.to_string());
                self.status = QueryStatus::Error(message);
            }
        }
        true
    }

    /// Returns the status to idle if `seq` is still the latest request.
    pub fn expire_status(&mut self, seq: u64) -> bool {
        if seq != self.seq || matches!(self.status, QueryStatus::Idle | QueryStatus::Loading) {
            return false;
        }
        self.status = QueryStatus::Idle;
        true
    }

    pub fn clear_results(&mut self) -> bool {
        let changed = self.result.is_some() || !self.history.is_empty();
        self.result = None;
        self.history.clear();
        changed
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/query.rs"]
mod tests;
