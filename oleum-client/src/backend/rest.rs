// oleum-client/src/backend/rest.rs
// Hosted store over HTTP (PostgREST dialect)

use super::{Backend, Select};
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// Path prefix of the table API on the hosted store
const REST_PREFIX: &str = "rest/v1";

/// Error body returned by the hosted store
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    code: Option<String>,
    message: String,
    #[serde(default)]
    details: Option<String>,
}

/// REST backend for the hosted store
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestBackend {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let base_url = config.backend_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Config("backend URL is empty".into()));
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL of the hosted store
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PREFIX, table)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => req
                .header("apikey", key)
                .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", key)),
            None => req,
        }
    }
}

/// Decode a hosted-store response into rows.
///
/// Error statuses become [`ClientError::Api`], taking message, code and
/// details from the JSON error body when there is one. A success body may be
/// an array of rows, a single object, or empty.
async fn handle_response(response: reqwest::Response) -> ClientResult<Vec<Value>> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await?;
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
            return Err(ClientError::Api {
                status: status.as_u16(),
                code: api_err.code,
                message: api_err.message,
                details: api_err.details,
            });
        }
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            text
        };
        return Err(ClientError::Api {
            status: status.as_u16(),
            code: None,
            message,
            details: None,
        });
    }
    let body = response.bytes().await?;
    if body.is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_slice::<Value>(&body)? {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        row @ Value::Object(_) => Ok(vec![row]),
        other => Err(ClientError::InvalidResponse(format!(
            "expected rows, got {}",
            other
        ))),
    }
}

/// Query string pairs for a select
pub(crate) fn query_params(query: &Select) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.columns.clone())];
    for (column, value) in &query.filters {
        params.push((column.clone(), format!("eq.{}", filter_literal(value))));
    }
    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
    }
    params
}

fn filter_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn select(&self, query: &Select) -> ClientResult<Vec<Value>> {
        let url = self.table_url(&query.table);
        tracing::debug!(table = %query.table, filters = query.filters.len(), "select");
        let req = self.authorize(self.client.get(&url).query(&query_params(query)));
        let response = req.send().await?;
        handle_response(response).await
    }

    async fn insert(&self, table: &str, row: Value) -> ClientResult<Vec<Value>> {
        let url = self.table_url(table);
        tracing::debug!(table = %table, "insert");
        let req = self
            .authorize(self.client.post(&url).json(&row))
            .header("Prefer", "return=representation");
        let response = req.send().await?;
        handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::{AppError, ErrorCode};

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body(body)
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn test_conflict_body_keeps_backend_message() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint","details":"Key (name)=(nadia) already exists.","hint":null}"#;
        let err = handle_response(response(409, body)).await.unwrap_err();
        match &err {
            ClientError::Api {
                status,
                code,
                message,
                details,
            } => {
                assert_eq!(*status, 409);
                assert_eq!(code.as_deref(), Some("23505"));
                assert_eq!(message, "duplicate key value violates unique constraint");
                assert_eq!(details.as_deref(), Some("Key (name)=(nadia) already exists."));
            }
            other => panic!("unexpected error {:?}", other),
        }

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::Conflict);
        assert_eq!(app.message, "duplicate key value violates unique constraint");
    }

    #[tokio::test]
    async fn test_plain_text_error_is_transport() {
        let err = handle_response(response(503, "upstream connect error"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::TransportFailure);
        assert_eq!(err.to_string(), "upstream connect error");
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_status_reason() {
        let err = handle_response(response(502, "")).await.unwrap_err();
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_success_bodies() {
        let rows = handle_response(response(200, r#"[{"id":1},{"id":2}]"#))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let rows = handle_response(response(201, r#"{"id":"p1","name":"Al-Zaytouna"}"#))
            .await
            .unwrap();
        assert_eq!(rows, vec![serde_json::json!({"id": "p1", "name": "Al-Zaytouna"})]);

        assert!(handle_response(response(200, "null")).await.unwrap().is_empty());
        assert!(handle_response(response(204, "")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scalar_body_rejected() {
        let err = handle_response(response(200, "42")).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_query_params() {
        let q = Select::from("users")
            .eq("name", "nadia")
            .eq("id", 4)
            .order("date", false);
        assert_eq!(
            query_params(&q),
            vec![
                ("select".to_string(), "*".to_string()),
                ("name".to_string(), "eq.nadia".to_string()),
                ("id".to_string(), "eq.4".to_string()),
                ("order".to_string(), "date.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_table_url_trims_slash() {
        let backend =
            RestBackend::new(&ClientConfig::new("https://example.supabase.co/")).unwrap();
        assert_eq!(backend.base_url(), "https://example.supabase.co");
        assert_eq!(
            backend.table_url("trips"),
            "https://example.supabase.co/rest/v1/trips"
        );
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(
            RestBackend::new(&ClientConfig::new("")),
            Err(ClientError::Config(_))
        ));
    }
}
