//! Request gateway for the dashboard REST API.
//!
//! Every access module goes through [`ApiClient`], which resolves endpoints
//! against the configured base URL, attaches the session's bearer token and
//! turns non-2xx responses into [`RequestError::Http`] carrying the API's
//! own message when it sent one.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// A path below the API root plus query parameters.
///
/// Segments and query values are percent-encoded when the endpoint is
/// resolved, so ids and search terms can be passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    /// Start from a literal path such as `"/tasks"` or `"auth/login"`.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
        }
    }

    /// Append one path segment (encoded, may contain any character).
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Add a query parameter only when `value` is set.
    pub fn query_opt<V: Into<String>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Build the absolute URL below `base`.
    pub fn resolve(&self, base: &Url) -> Result<Url, RequestError> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RequestError::InvalidUrl(base.to_string()))?;
            segments
                .pop_if_empty()
                .extend(self.segments.iter().map(String::as_str));
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                self.query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// Method, body and extra headers for one request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    body: Option<Vec<u8>>,
    headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, RequestError> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Set a header. Caller headers are applied after the defaults and win.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// HTTP client for the dashboard API, bound to one session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Create a client for the configured API.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, RequestError> {
        Self::with_client(reqwest::Client::new(), config, session)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        http: reqwest::Client,
        config: &ClientConfig,
        session: Session,
    ) -> Result<Self, RequestError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| RequestError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::InvalidUrl(config.base_url.clone()));
        }
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a request and decode the JSON response body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        options: RequestOptions,
    ) -> Result<T, RequestError> {
        let response = self.send(endpoint, options).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send a request whose response body is irrelevant (e.g. `DELETE`).
    pub async fn request_no_content(
        &self,
        endpoint: &Endpoint,
        options: RequestOptions,
    ) -> Result<(), RequestError> {
        self.send(endpoint, options).await?;
        Ok(())
    }

    /// Default headers, then the bearer token if there is one, then the
    /// caller's headers.
    pub fn build_headers(&self, extra: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("Stored auth token is not a valid header value, ignoring it");
                }
            }
        }

        for (name, value) in extra {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    async fn send(
        &self,
        endpoint: &Endpoint,
        options: RequestOptions,
    ) -> Result<reqwest::Response, RequestError> {
        let url = endpoint.resolve(&self.base_url)?;
        let headers = self.build_headers(&options.headers);
        let method = options.method;

        tracing::debug!(%method, %endpoint, "Sending API request");

        let mut builder = self.http.request(method.clone(), url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, %endpoint, error = %e, "API request failed to send");
            RequestError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%method, %endpoint, status = status.as_u16(), "API request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        tracing::warn!(
            %method,
            %endpoint,
            status = status.as_u16(),
            message = %message,
            "API request returned an error"
        );
        Err(RequestError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extract a human-readable message from an error body.
///
/// Uses the body's `message` field when it is a non-empty string or a list
/// of strings (joined with ", "); otherwise falls back to the status code.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || format!("HTTP error! status: {}", status.as_u16());

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    match value.get("message") {
        Some(serde_json::Value::String(msg)) if !msg.is_empty() => msg.clone(),
        Some(serde_json::Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => fallback(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
