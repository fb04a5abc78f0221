use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::api::user_extractor::extract_header_value;
use crate::error::{ApiError, AppError};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Process-wide shared secret. When unset every request passes.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGate {
    expected: Option<Arc<str>>,
}

impl ApiKeyGate {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            expected: api_key
                .filter(|key| !key.trim().is_empty())
                .map(Arc::from),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    pub fn allows(&self, presented: Option<&str>) -> bool {
        match &self.expected {
            None => true,
            Some(expected) => presented == Some(expected.as_ref()),
        }
    }
}

/// Middleware rejecting requests whose `X-API-Key` does not match the configured key
pub async fn require_api_key(
    State(gate): State<ApiKeyGate>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = extract_header_value(request.headers(), API_KEY_HEADER);
    if gate.allows(presented.as_deref()) {
        Ok(next.run(request).await)
    } else {
        log::warn!(
            "Rejected {} {}: bad API key",
            request.method(),
            request.uri().path()
        );
        Err(AppError::Unauthorized.into())
    }
}
