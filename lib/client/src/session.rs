//! Explicit session context for the HTTP adapter.
//!
//! The token lives here instead of in process-global storage, and the
//! adapter's on-unauthorized hook is injected so a 401 can invalidate
//! persisted credentials without the adapter knowing where they live.

/// Connection parameters for one service.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    token: Option<String>,
}

impl Session {
    /// A session against `base_url`, unauthenticated. Trailing slashes
    /// are stripped so paths can be appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
        }
    }

    /// Attach a bearer token. An empty token counts as none.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
