// oleum-client/src/backend/memory.rs
// In-process tables, used by tests and the demo mode

use super::{Backend, Select};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

/// A call observed by [`InMemoryBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Select {
        table: String,
        filters: Vec<(String, Value)>,
    },
    Insert {
        table: String,
        row: Value,
    },
}

impl BackendCall {
    pub fn table(&self) -> &str {
        match self {
            BackendCall::Select { table, .. } | BackendCall::Insert { table, .. } => table,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, BackendCall::Insert { .. })
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<String, Vec<Value>>,
    failures: HashMap<String, String>,
    calls: Vec<BackendCall>,
    next_id: i64,
}

/// In-memory backend
///
/// Selects support equality filters, column projection and ordering;
/// inserts fill in `id` and `created_at` when missing. Every call is
/// recorded, and tables can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `table` with rows (builder style, before sharing)
    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        self.state
            .lock()
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(rows);
        self
    }

    /// Make every call on `table` fail with `message`
    pub fn with_failure(self, table: &str, message: &str) -> Self {
        self.state
            .lock()
            .failures
            .insert(table.to_string(), message.to_string());
        self
    }

    /// Current rows of `table`
    pub fn rows(&self, table: &str) -> Vec<Value> {
        let state = self.state.lock();
        state.tables.get(table).cloned().unwrap_or_default()
    }

    /// Every call made so far, oldest first
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().calls.clone()
    }

    /// Number of inserts made so far
    pub fn insert_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| c.is_insert())
            .count()
    }

    /// Number of selects made so far
    pub fn select_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| !c.is_insert())
            .count()
    }
}

impl MemoryState {
    fn check_failure(&self, table: &str) -> ClientResult<()> {
        match self.failures.get(table) {
            Some(message) => Err(ClientError::Api {
                status: 503,
                code: None,
                message: message.clone(),
                details: None,
            }),
            None => Ok(()),
        }
    }

    fn allocate_id(&mut self) -> i64 {
        let max_seen = self
            .tables
            .values()
            .flatten()
            .filter_map(|row| row.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max_seen) + 1;
        self.next_id
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Null) | None, Some(Value::Null) | None) => Ordering::Equal,
        // Nulls sort last ascending, like the hosted store
        (Some(Value::Null) | None, _) => Ordering::Greater,
        (_, Some(Value::Null) | None) => Ordering::Less,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn project(row: &Value, columns: &str) -> Value {
    if columns.trim() == "*" {
        return row.clone();
    }
    let mut out = Map::new();
    for column in columns.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if let Some(value) = row.get(column) {
            out.insert(column.to_string(), value.clone());
        }
    }
    Value::Object(out)
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn select(&self, query: &Select) -> ClientResult<Vec<Value>> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::Select {
            table: query.table.clone(),
            filters: query.filters.clone(),
        });
        state.check_failure(&query.table)?;

        let mut rows: Vec<Value> = state
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query
                            .filters
                            .iter()
                            .all(|(column, value)| row.get(column) == Some(value))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending { ord } else { ord.reverse() }
            });
        }

        Ok(rows.iter().map(|row| project(row, &query.columns)).collect())
    }

    async fn insert(&self, table: &str, row: Value) -> ClientResult<Vec<Value>> {
        let mut state = self.state.lock();
        state.calls.push(BackendCall::Insert {
            table: table.to_string(),
            row: row.clone(),
        });
        state.check_failure(table)?;

        let Value::Object(mut fields) = row else {
            return Err(ClientError::InvalidResponse(format!(
                "insert into {} expects an object",
                table
            )));
        };
        if !fields.contains_key("id") {
            let id = state.allocate_id();
            fields.insert("id".to_string(), Value::from(id));
        }
        fields
            .entry("created_at")
            .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));

        let stored = Value::Object(fields);
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        tracing::debug!(table = %table, "in-memory insert");
        Ok(vec![stored])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trips() -> InMemoryBackend {
        InMemoryBackend::new().with_rows(
            "trips",
            vec![
                json!({"id": "t1", "date": "2024-09-01", "status": "Delivered"}),
                json!({"id": "t2", "date": "2024-10-15", "status": "Pending"}),
                json!({"id": "t3", "date": "2024-10-01", "status": "In Transit"}),
            ],
        )
    }

    #[tokio::test]
    async fn test_order_desc() {
        let backend = trips();
        let rows = backend
            .select(&Select::from("trips").order("date", false))
            .await
            .unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["t2", "t3", "t1"]);
    }

    #[tokio::test]
    async fn test_filter_and_projection() {
        let backend = trips();
        let rows = backend
            .select(&Select::from("trips").columns("id").eq("status", "Pending"))
            .await
            .unwrap();
        assert_eq!(rows, vec![json!({"id": "t2"})]);
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_records_call() {
        let backend =
            InMemoryBackend::new().with_rows("users", vec![json!({"id": 4, "name": "a"})]);
        let inserted = backend
            .insert("users", json!({"name": "b", "password": "x"}))
            .await
            .unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0]["id"], json!(5));
        assert!(inserted[0]["created_at"].is_string());
        assert_eq!(backend.rows("users").len(), 2);
        assert_eq!(backend.insert_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_and_returned() {
        let backend = trips().with_failure("trips", "service unavailable");
        let err = backend.select(&Select::from("trips")).await.unwrap_err();
        assert_eq!(err.to_string(), "service unavailable");
        assert_eq!(backend.select_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_table_is_empty() {
        let backend = InMemoryBackend::new();
        let rows = backend.select(&Select::from("presses")).await.unwrap();
        assert!(rows.is_empty());
    }
}
