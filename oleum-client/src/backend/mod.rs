//! Backend collaborator
//!
//! The hosted store is reached through table-scoped select and insert
//! calls only. [`Backend`] is the seam: [`RestBackend`] talks to the hosted
//! store over HTTP, [`InMemoryBackend`] keeps tables in process.

mod memory;
mod rest;

pub use memory::{BackendCall, InMemoryBackend};
pub use rest::RestBackend;

use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Ordering clause of a select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Select query against one collection
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    /// Comma separated column list, `*` for all
    pub columns: String,
    /// Equality filters, all of which must hold
    pub filters: Vec<(String, Value)>,
    pub order: Option<Order>,
}

impl Select {
    /// Select all columns of `table`
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Restrict the returned columns
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Add an equality filter
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    /// Order by `column`
    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }
}

/// Table-scoped access to the hosted store
#[async_trait]
pub trait Backend: Send + Sync {
    /// Run a select, returning the raw rows in store order
    async fn select(&self, query: &Select) -> ClientResult<Vec<Value>>;

    /// Insert one row, returning the inserted row(s) as the store echoes them
    async fn insert(&self, table: &str, row: Value) -> ClientResult<Vec<Value>>;
}

/// Select and decode every row
pub async fn select_all<T: DeserializeOwned>(
    backend: &dyn Backend,
    query: &Select,
) -> ClientResult<Vec<T>> {
    let rows = backend.select(query).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(ClientError::from))
        .collect()
}

/// Insert one row and decode the single row the store returns
pub async fn insert_single<T: DeserializeOwned, B: Serialize + ?Sized>(
    backend: &dyn Backend,
    table: &str,
    row: &B,
) -> ClientResult<T> {
    let row = serde_json::to_value(row)?;
    let mut rows = backend.insert(table, row).await?;
    if rows.len() != 1 {
        return Err(ClientError::UnexpectedRows {
            table: table.to_string(),
            expected: "exactly one",
            found: rows.len(),
        });
    }
    Ok(serde_json::from_value(rows.remove(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_builder() {
        let q = Select::from("users")
            .columns("id")
            .eq("name", "nadia")
            .order("created_at", false);
        assert_eq!(q.table, "users");
        assert_eq!(q.columns, "id");
        assert_eq!(q.filters, vec![("name".to_string(), json!("nadia"))]);
        assert_eq!(
            q.order,
            Some(Order {
                column: "created_at".into(),
                ascending: false
            })
        );
    }

    #[tokio::test]
    async fn test_insert_single_returns_stored_row() {
        let backend = InMemoryBackend::new();
        let row: Value = insert_single(&backend, "presses", &json!({"name": "Wadi Press"}))
            .await
            .unwrap();
        assert_eq!(row["id"], 1);
        assert_eq!(row["name"], "Wadi Press");
    }

    #[tokio::test]
    async fn test_select_all_decodes_rows() {
        let backend = InMemoryBackend::new().with_rows(
            "users",
            vec![json!({"id": 1, "name": "a"}), json!({"id": 2, "name": "a"})],
        );
        let rows: Vec<Value> = select_all(&backend, &Select::from("users").eq("name", "a"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let err = select_all::<u32>(&backend, &Select::from("users"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Serialization(_)));
    }
}
