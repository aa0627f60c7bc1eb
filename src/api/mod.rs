//! HTTP layer for the remote ticket API
//!
//! Thin wrapper around `reqwest` that joins paths onto the configured base
//! URL, attaches `Authorization: Token <token>` whenever a session token is
//! present, and maps non-success responses into typed [`DeskError`] values.
//! No retries are performed; every failure surfaces exactly once.

use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::session::SessionStore;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for the remote ticket API
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client from configuration and a session store
    pub fn new(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| DeskError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api.base_url.clone(),
            session,
        })
    }

    /// Issue a GET request and decode the JSON response
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json(Method::GET, path, None::<&()>).await
    }

    /// Issue a POST request with a JSON body and decode the response
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request_json(Method::POST, path, Some(body)).await
    }

    /// Issue a PUT request with a JSON body and decode the response
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request_json(Method::PUT, path, Some(body)).await
    }

    /// Issue a DELETE request, expecting an empty response
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.send(Method::DELETE, path, None::<&()>).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_error_response(status, &body))
    }

    async fn request_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let response = self.send(method, path, body).await?;
        let status = response.status();

        if status.is_success() {
            let value = response.json::<T>().await.map_err(|e| DeskError::Api {
                status: status.as_u16(),
                message: format!("invalid response body: {e}"),
            })?;
            return Ok(value);
        }

        let text = response.text().await.unwrap_or_default();
        Err(map_error_response(status, &text))
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = self.url_for(path);
        debug!(%method, %url, "sending API request");

        let mut request = self
            .client
            .request(method, url.as_str())
            .headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                DeskError::Network {
                    message: format!("request to {url} timed out"),
                }
            } else {
                DeskError::Network {
                    message: e.to_string(),
                }
            }
        })
    }

    /// Build the header set for a request, attaching the token when present
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.session.get()? {
            let value = HeaderValue::from_str(&format!("Token {token}"))
                .map_err(|_| DeskError::custom("stored token contains invalid characters"))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Map a non-success response into a typed error
///
/// The server reports validation problems as a JSON object keyed by field
/// name with a list (or string) of messages. `detail` and
/// `non_field_errors` are not tied to a field and map to auth/API errors.
fn map_error_response(status: StatusCode, body: &str) -> DeskError {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DeskError::Auth {
            message: detail_message(parsed.as_ref())
                .unwrap_or_else(|| "authentication rejected by the server".to_string()),
        },
        StatusCode::NOT_FOUND => DeskError::NotFound {
            resource: detail_message(parsed.as_ref()).unwrap_or_else(|| "resource".to_string()),
        },
        StatusCode::BAD_REQUEST => {
            if let Some(fields) = field_errors(parsed.as_ref()) {
                if let Some(message) = fields.get("non_field_errors") {
                    return DeskError::Auth {
                        message: message.clone(),
                    };
                }
                return DeskError::Validation { fields };
            }
            DeskError::Api {
                status: status.as_u16(),
                message: detail_message(parsed.as_ref())
                    .unwrap_or_else(|| "bad request".to_string()),
            }
        },
        _ => DeskError::Api {
            status: status.as_u16(),
            message: detail_message(parsed.as_ref())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
        },
    }
}

/// Extract the `detail` message if the body carries one
fn detail_message(value: Option<&serde_json::Value>) -> Option<String> {
    value?
        .get("detail")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Flatten a field-error object into `field -> first message`
fn field_errors(value: Option<&serde_json::Value>) -> Option<BTreeMap<String, String>> {
    let object = value?.as_object()?;
    let mut fields = BTreeMap::new();

    for (key, messages) in object {
        if key == "detail" {
            continue;
        }
        let message = match messages {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        };
        if !message.is_empty() {
            fields.insert(key.clone(), message);
        }
    }

    if fields.is_empty() { None } else { Some(fields) }
}
