//! Request plumbing: bearer injection, status→error mapping, and the
//! global 401 handling contract.
//!
//! Every mutating call is a single in-flight request; nothing is
//! queued, cancelled, or retried here.

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use licctl_core::ApiError;

use crate::session::Session;

/// Callback fired when any request comes back 401, after the adapter
/// has dropped its own copy of the token.
pub type UnauthorizedHook = Box<dyn Fn() + Send + Sync>;

/// HTTP adapter for the license service.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: Mutex<Option<String>>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl ApiClient {
    pub fn new(session: Session) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: session.base_url().to_string(),
            token: Mutex::new(session.token().map(String::from)),
            on_unauthorized: None,
        })
    }

    /// Inject the hook invoked on any 401 response.
    pub fn on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Box::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The current token, if the session still has one.
    pub fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    pub(crate) fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.url(path, query);
        debug!(%url, "GET");
        let request = self.http.get(&url);
        self.execute(request)
    }

    pub(crate) fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.url(path, &[]);
        debug!(%url, "POST");
        let request = self.http.post(&url).json(body);
        self.execute(request)
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let pairs: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencode(v)))
                .collect();
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    fn execute(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<serde_json::Value, ApiError> {
        let request = match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().map_err(|e| {
            ApiError::Transport(format!("cannot reach the server: {}", e))
        })?;

        let status = response.status().as_u16();
        let body: serde_json::Value = response.json().unwrap_or(serde_json::Value::Null);

        if status == 401 {
            self.invalidate_session();
            return Err(ApiError::from_status(status, &body));
        }

        if !(200..300).contains(&status) {
            debug!(status, "request failed");
            return Err(ApiError::from_status(status, &body));
        }

        Ok(body)
    }

    /// Drop the token and fire the injected hook. The in-flight call
    /// still fails with Unauthorized; the hook's job is to erase any
    /// persisted credentials.
    fn invalidate_session(&self) {
        if let Ok(mut token) = self.token.lock() {
            *token = None;
        }
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }
}

/// Minimal percent-encoding for query values.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}
