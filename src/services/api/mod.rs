pub mod endpoints;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{ApiError, AppError};
use crate::services::session::TokenStore;
use crate::services::toasts::Toasts;

/// Shown when an error response carries no usable `detail`.
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Method, body and extra headers of one call. Headers set here win over the
/// client's defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<String>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn post<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        Self::with_json(Method::POST, body)
    }

    pub fn put<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        Self::with_json(Method::PUT, body)
    }

    pub fn with_json<B: Serialize>(method: Method, body: &B) -> Result<Self, ApiError> {
        Ok(Self {
            method,
            body: Some(serde_json::to_string(body)?),
            headers: HeaderMap::new(),
        })
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Authenticated JSON client for the booking API.
///
/// Failures are pushed to the toast center here, so callers only decide what
/// to re-render. An unauthorized response also drops the session token and
/// raises a reload request that the view controller picks up.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<TokenStore>,
    toasts: Arc<Toasts>,
    reload_requested: AtomicBool,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<TokenStore>,
        toasts: Arc<Toasts>,
    ) -> Result<Self, AppError> {
        reqwest::Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("invalid API_URL {base_url:?}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            tokens,
            toasts,
            reload_requested: AtomicBool::new(false),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.tokens.is_set()
    }

    pub fn clear_token(&self) {
        self.tokens.clear();
    }

    /// Returns and resets the pending reload request.
    pub fn take_reload_request(&self) -> bool {
        self.reload_requested.swap(false, Ordering::SeqCst)
    }

    /// Assembles the outgoing request without sending it.
    pub fn build_request(&self, path: &str, options: &RequestOptions) -> reqwest::RequestBuilder {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.tokens.get() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("session token is not a valid header value, sending without it"),
            }
        }

        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        let mut builder = self
            .http
            .request(options.method.clone(), format!("{}{}", self.base_url, path))
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(body.clone());
        }
        builder
    }

    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        match self.send(path, &options).await {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(method = %options.method, path, error = %e, "API request failed");
                self.toasts.error(e.to_string());
                Err(e)
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, options: &RequestOptions) -> Result<T, ApiError> {
        tracing::debug!(method = %options.method, path, "API request");

        let resp = self.build_request(path, options).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            let message = error_message(&body);

            if status == StatusCode::UNAUTHORIZED {
                self.expire_session();
                return Err(ApiError::Unauthorized { message });
            }
            return Err(ApiError::Status { status, message });
        }

        let body = resp.bytes().await?;
        if body.is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    fn expire_session(&self) {
        tracing::info!("session rejected by API, clearing token");
        self.tokens.clear();
        self.reload_requested.store(true, Ordering::SeqCst);
    }
}

/// Extracts the human-readable message from an error body: a string
/// `detail`, or the `msg` entries of a validation-error list.
pub fn error_message(body: &[u8]) -> String {
    let Ok(data) = serde_json::from_slice::<serde_json::Value>(body) else {
        return GENERIC_ERROR.to_string();
    };

    match &data["detail"] {
        serde_json::Value::String(detail) if !detail.is_empty() => detail.clone(),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items.iter().filter_map(|item| item["msg"].as_str()).collect();
            if messages.is_empty() {
                GENERIC_ERROR.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => GENERIC_ERROR.to_string(),
    }
}
