// Session extraction from request headers
use crate::domain::session::{Session, UserType};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};

pub const USER_TYPE_HEADER: &str = "x-user-type";

pub fn session_from_headers(headers: &axum::http::HeaderMap) -> Result<Session, StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let user_type = match headers.get(USER_TYPE_HEADER).and_then(|v| v.to_str().ok()) {
        Some(raw) => UserType::parse(raw).ok_or(StatusCode::BAD_REQUEST)?,
        None => UserType::default(),
    };

    Ok(Session::new(token.to_string(), user_type))
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_headers(&parts.headers)
    }
}
