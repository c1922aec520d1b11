//! # HTTP transport — the network seam of the gateway
//!
//! [`crate::ApiClient`] never talks to `reqwest` directly. It builds an
//! [`HttpRequest`], hands it to an [`HttpTransport`], and interprets the
//! [`HttpResponse`]. The app uses [`ReqwestTransport`]; tests use a scripted
//! transport so the refresh/retry logic runs without a backend.
//!
//! A transport only fails with [`TransportError`] when no response arrived.
//! Every HTTP status, 4xx and 5xx included, is a successful send.

use std::future::Future;

use crate::error::ApiError;

/// HTTP methods the backend API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    /// Methods that need a CSRF header in cookie-session mode.
    pub fn is_unsafe(&self) -> bool {
        !matches!(self, Method::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A fully built request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<String>,
    /// Send browser credentials (cookies) with the request.
    pub with_credentials: bool,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            with_credentials: false,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn json_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into its [`ApiError`].
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_status(self.status, &self.body))
        }
    }
}

/// No response arrived (DNS, refused connection, CORS, offline...).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Network(e.0)
    }
}

/// Async trait for sending HTTP requests.
pub trait HttpTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

/// `reqwest`-backed transport (browser `fetch` on WASM).
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        let client = reqwest::Client::new();
        // Native builds keep their own cookie jar for session mode.
        #[cfg(not(target_arch = "wasm32"))]
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }
        #[cfg(target_arch = "wasm32")]
        {
            if request.with_credentials {
                builder = builder.fetch_credentials_include();
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status() {
        assert!(HttpResponse::new(204, "").error_for_status().is_ok());
        let err = HttpResponse::new(401, r#"{"error": "expired"}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(err, ApiError::Unauthorized("expired".into()));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest::new(Method::Get, "http://x/api/")
            .header("Authorization", "Bearer abc");
        assert_eq!(req.header_value("authorization"), Some("Bearer abc"));
        assert_eq!(req.header_value("X-CSRFToken"), None);
    }

    #[test]
    fn test_unsafe_methods() {
        assert!(!Method::Get.is_unsafe());
        assert!(Method::Post.is_unsafe());
        assert!(Method::Delete.is_unsafe());
    }
}
