//! Scripted transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

pub const BASE_URL: &str = "http://backend.test/api";

#[derive(Default)]
struct Script {
    routes: HashMap<(Method, String), VecDeque<HttpResponse>>,
    requests: Vec<HttpRequest>,
    offline: bool,
}

/// Transport answering from per-route queues of canned responses.
///
/// Each route pops its queue front; the last response of a queue is sticky
/// and answers every further call. Unscripted routes and an offline
/// transport fail like an unreachable server.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path` (path relative to [`BASE_URL`],
    /// query string included).
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(HttpResponse::new(status, body));
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.script.lock().unwrap().offline = offline;
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    /// Number of recorded requests to `method path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        let url = format!("{BASE_URL}{path}");
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(request.clone());
        if script.offline {
            return Err(TransportError("connection refused".to_string()));
        }
        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let queue = script
            .routes
            .get_mut(&(request.method, path.clone()))
            .ok_or_else(|| TransportError(format!("no route for {path}")))?;
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.ok_or_else(|| TransportError(format!("no response for {path}")))
    }
}

#[derive(Default)]
struct Rotation {
    valid_access: Option<String>,
    valid_refresh: String,
    generation: u32,
    refresh_calls: usize,
}

/// Backend that rotates refresh tokens and blacklists the used one.
///
/// Every request yields to the executor once before it is answered, so
/// requests joined on one task are in flight at the same time. Data routes
/// answer `[]` for the current access token and 401 otherwise.
#[derive(Clone, Default)]
pub struct RotatingBackend {
    state: Arc<Mutex<Rotation>>,
}

impl RotatingBackend {
    /// No access token is valid yet; `refresh` is.
    pub fn new(refresh: &str) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().valid_refresh = refresh.to_string();
        backend
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.lock().unwrap().refresh_calls
    }
}

impl HttpTransport for RotatingBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        if request.url.ends_with("/auth/token/refresh/") {
            state.refresh_calls += 1;
            let body: serde_json::Value =
                serde_json::from_str(request.body.as_deref().unwrap_or("{}")).unwrap();
            if body["refresh"] != state.valid_refresh.as_str() {
                return Ok(HttpResponse::new(401, r#"{"detail": "Token is blacklisted"}"#));
            }
            state.generation += 1;
            let access = format!("acc-{}", state.generation);
            let refresh = format!("ref-{}", state.generation);
            state.valid_access = Some(access.clone());
            state.valid_refresh = refresh.clone();
            let body = serde_json::json!({ "access": access, "refresh": refresh });
            return Ok(HttpResponse::new(200, body.to_string()));
        }
        let bearer = request
            .header_value("Authorization")
            .and_then(|v| v.strip_prefix("Bearer "));
        if bearer.is_some() && bearer == state.valid_access.as_deref() {
            Ok(HttpResponse::new(200, "[]"))
        } else {
            Ok(HttpResponse::new(401, r#"{"detail": "expired"}"#))
        }
    }
}
