use chrono::{Duration as ChronoDuration, NaiveDate};
use serde_json::{json, Map, Value};
use std::sync::Mutex;
use std::time::Duration;

use crate::kernel::services::ports::{
    QueryEngine, QueryExecution, QueryResult, QueryRow, QuerySettings,
};

const DDL_STATUS: &str = "Statement executed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    Select,
    Ddl,
    Dml,
}

fn classify(query: &str) -> StatementKind {
    let upper = query.trim_start().to_ascii_uppercase();
    if ["CREATE", "ALTER", "DROP"].iter().any(|k| upper.starts_with(k)) {
        StatementKind::Ddl
    } else if ["INSERT", "UPDATE", "DELETE"].iter().any(|k| upper.starts_with(k)) {
        StatementKind::Dml
    } else {
        StatementKind::Select
    }
}

/// xorshift64*; good enough for mock data and reproducible from a seed.
#[derive(Debug)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `low..=high`.
    fn range(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        low + self.next_u64() % (high - low + 1)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Query engine that fabricates plausible results from the statement text.
pub struct MockQueryEngine {
    rng: Mutex<Rng>,
    min_latency_ms: u64,
    max_latency_ms: u64,
}

impl MockQueryEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(Rng::new(seed)),
            min_latency_ms: 0,
            max_latency_ms: 0,
        }
    }

    pub fn from_settings(settings: &QuerySettings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5eed)
        });
        Self {
            rng: Mutex::new(Rng::new(seed)),
            min_latency_ms: settings.min_latency_ms,
            max_latency_ms: settings.max_latency_ms.max(settings.min_latency_ms),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut Rng) -> T) -> T {
        match self.rng.lock() {
            Ok(mut rng) => f(&mut rng),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    fn select_result(&self, query: &str) -> QueryResult {
        let lower = query.to_lowercase();
        self.with_rng(|rng| {
            let row_count = rng.range(1, 20) as usize;
            let execution_time_ms = rng.range(100, 599);
            let (columns, rows): (&[&str], Vec<QueryRow>) = if lower.contains("customer") {
                (
                    &["id", "name", "email", "created_at"],
                    (1..=row_count)
                        .map(|i| {
                            row([
                                ("id", json!(i)),
                                ("name", json!(format!("Customer {}", i))),
                                ("email", json!(format!("customer{}@example.com", i))),
                                ("created_at", json!(day(i).format("%Y-%m-%d").to_string())),
                            ])
                        })
                        .collect(),
                )
            } else if lower.contains("sales") || lower.contains("product") {
                (
                    &["product_id", "product_name", "quantity", "revenue"],
                    (1..=row_count)
                        .map(|i| {
                            let quantity = rng.range(100, 1099);
                            let revenue = rng.unit() * 10_000.0 + 1_000.0;
                            row([
                                ("product_id", json!(i)),
                                ("product_name", json!(format!("Product {}", i))),
                                ("quantity", json!(quantity)),
                                ("revenue", json!(format!("{:.2}", revenue))),
                            ])
                        })
                        .collect(),
                )
            } else {
                (
                    &["id", "value", "timestamp"],
                    (1..=row_count)
                        .map(|i| {
                            row([
                                ("id", json!(i)),
                                ("value", json!(format!("Value {}", i))),
                                (
                                    "timestamp",
                                    json!(day(i).format("%Y-%m-%dT00:00:00.000Z").to_string()),
                                ),
                            ])
                        })
                        .collect(),
                )
            };
            QueryResult {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows,
                execution_time_ms,
                row_count,
            }
        })
    }
}

fn row<const N: usize>(cells: [(&str, Value); N]) -> QueryRow {
    let mut map = Map::new();
    for (key, value) in cells {
        map.insert(key.to_string(), value);
    }
    map
}

/// 2024-01-01 plus `i - 1` days.
fn day(i: usize) -> NaiveDate {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    base + ChronoDuration::days(i as i64 - 1)
}

impl QueryEngine for MockQueryEngine {
    fn execute(&self, query: &str) -> QueryExecution {
        let query = query.trim();
        match classify(query) {
            StatementKind::Select => QueryExecution::ok(self.select_result(query)),
            StatementKind::Ddl => {
                let execution_time_ms = self.with_rng(|rng| rng.range(100, 599));
                QueryExecution::ok(QueryResult {
                    columns: vec!["status".to_string()],
                    rows: vec![row([("status", json!(DDL_STATUS))])],
                    execution_time_ms,
                    row_count: 0,
                })
            }
            StatementKind::Dml => {
                let (affected, execution_time_ms) =
                    self.with_rng(|rng| (rng.range(1, 100), rng.range(100, 599)));
                QueryExecution::ok(QueryResult {
                    columns: vec!["rows_affected".to_string()],
                    rows: vec![row([("rows_affected", json!(affected))])],
                    execution_time_ms,
                    row_count: affected as usize,
                })
            }
        }
    }

    fn latency(&self) -> Duration {
        let ms = self.with_rng(|rng| rng.range(self.min_latency_ms, self.max_latency_ms));
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/mock_engine.rs"]
mod tests;
