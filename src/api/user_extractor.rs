use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use crate::error::{ApiError, AppError};
use crate::model::UserContext;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Axum extractor for UserContext from request headers
///
/// Reads the tenant from `X-User-Id`. A missing or blank header falls back to
/// the shared `default-user` tenant; a header that is not visible ASCII is
/// rejected with 400.
#[async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        user_from_headers(&parts.headers).map_err(ApiError::from)
    }
}

pub fn user_from_headers(headers: &HeaderMap) -> Result<UserContext, AppError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(UserContext::default_user());
    };
    let user_id = value
        .to_str()
        .map_err(|_| AppError::Validation("X-User-Id must be visible ASCII".to_string()))?
        .trim();

    if user_id.is_empty() {
        Ok(UserContext::default_user())
    } else {
        Ok(UserContext::new(user_id))
    }
}

/// Extract a non-blank header value as string
pub(crate) fn extract_header_value(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    #[test]
    fn test_user_context_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_static("test-user-123"),
        );

        assert_eq!(user_from_headers(&headers).unwrap().user_id, "test-user-123");
    }

    #[test]
    fn test_missing_header_uses_default_user() {
        let headers = HeaderMap::new();
        assert_eq!(user_from_headers(&headers).unwrap().user_id, "default-user");
    }

    #[test]
    fn test_blank_header_uses_default_user() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_static("   "),
        );
        assert_eq!(user_from_headers(&headers).unwrap(), UserContext::default_user());
    }

    #[test]
    fn test_non_ascii_header_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_bytes(b"jos\xe9").unwrap(),
        );
        assert!(matches!(
            user_from_headers(&headers),
            Err(AppError::Validation(_))
        ));
    }
}
