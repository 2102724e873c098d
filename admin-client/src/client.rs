//! Request executor for the admin API
//!
//! Every domain call goes through `AdminClient::request`: resolve the
//! session, attach the standard headers, send, translate errors.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::session::Session;

/// Invoked when a request comes back 401, after the session was cleared
///
/// Hosts use this to reload or redirect to their login screen.
pub trait SessionExpiredHandler: Send + Sync {
    fn session_expired(&self);
}

impl<F> SessionExpiredHandler for F
where
    F: Fn() + Send + Sync,
{
    fn session_expired(&self) {
        self()
    }
}

/// Request payload
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text {
        content_type: &'static str,
        body: String,
    },
}

/// Method, body and extra headers for one request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    /// Applied last, so these override the defaults
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
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

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::InvalidRequest(format!("Unserializable body: {}", e)))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    pub fn text(mut self, content_type: &'static str, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text {
            content_type,
            body: body.into(),
        });
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP client for the admin API, bound to a session
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    session: Arc<Session>,
    on_session_expired: Option<Arc<dyn SessionExpiredHandler>>,
}

impl AdminClient {
    pub fn new(session: Arc<Session>) -> Self {
        Self::with_http_client(session, reqwest::Client::new())
    }

    pub fn with_http_client(session: Arc<Session>, http: reqwest::Client) -> Self {
        Self {
            http,
            session,
            on_session_expired: None,
        }
    }

    /// Register the callback fired on a 401
    pub fn on_session_expired(mut self, handler: impl SessionExpiredHandler + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(handler));
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Send a request and parse the JSON response as `T`
    ///
    /// An empty success body parses as `null`, so `()` and
    /// `Option<_>` targets accept it.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let response = self.send(path, options).await?;
        let bytes = response.bytes().await?;
        let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Send a request and return the raw response body
    pub async fn request_text(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<String, ClientError> {
        let response = self.send(path, options).await?;
        Ok(response.text().await?)
    }

    // --- Internal helpers ---

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(path, RequestOptions::get()).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RequestOptions::post().json(body)?).await
    }

    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RequestOptions::patch().json(body)?).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(path, RequestOptions::delete()).await
    }

    async fn send(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ClientError> {
        let (endpoint, token) = self.session.credentials();
        let endpoint = endpoint.ok_or(ClientError::Configuration)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::InvalidRequest("Invalid token format".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(RequestBody::Text { content_type, .. }) = &options.body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(*content_type));
        }
        headers.extend(options.headers);

        let url = format!("{}{}", endpoint, path);
        tracing::debug!(method = %options.method, path, "API request");

        let mut builder = self.http.request(options.method.clone(), &url).headers(headers);
        builder = match options.body {
            Some(RequestBody::Json(value)) => builder.body(
                serde_json::to_vec(&value)
                    .map_err(|e| ClientError::InvalidRequest(e.to_string()))?,
            ),
            Some(RequestBody::Text { body, .. }) => builder.body(body),
            None => builder,
        };

        let response = builder.send().await?;
        self.check_status(&options.method, path, response).await
    }

    async fn check_status(
        &self,
        method: &Method,
        path: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(ClientError::SessionExpired);
        }

        let message = match response.text().await {
            Ok(text) if !text.is_empty() => text,
            _ => status.canonical_reason().unwrap_or_default().to_string(),
        };
        tracing::warn!(%method, path, status = status.as_u16(), "API error");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn expire_session(&self) {
        tracing::info!("Session expired, clearing credentials");
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
        if let Some(handler) = &self.on_session_expired {
            handler.session_expired();
        }
    }
}
