//! API error type shared by all handlers.
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Represents an API Error.
///
/// Serializes as `{"error": [..]}`; the status code travels in the HTTP
/// response, not the body.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    error: Vec<String>,
    #[serde(skip)]
    status: StatusCode,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Api Error")?;
        write!(f, "({})", self.status.as_str())?;

        self.error.iter().try_for_each(|e| write!(f, " {},", e))
    }
}

impl StdError for ApiError {}

impl ApiError {
    #[inline]
    pub fn new(status: StatusCode) -> Self {
        let error = match status.canonical_reason() {
            Some(reason) => vec![reason.to_owned()],
            None => vec![],
        };
        Self { error, status }
    }

    /// Push an explanatory error message to the error list.
    #[inline]
    pub fn explain(mut self, error: impl Into<String>) -> Self {
        self.error.push(error.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.error
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST).explain(error)
    }

    /// A path parameter that should have been a hex `ObjectId` but was not.
    #[inline]
    pub fn bad_object_id(param: &str, raw: &str) -> Self {
        Self::bad_request(format!("`{raw}` is not a valid `{param}`"))
    }

    #[inline]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        let err_str = err.to_string();
        tracing::error!(error = err_str.as_str(), "Mongo error");
        Self::internal()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut body = Json(self).into_response();
        *body.status_mut() = status;
        body
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use serde_json::{json, to_value};

    use super::*;

    #[test]
    fn body_carries_reason_and_explanation() {
        let err = ApiError::bad_object_id("tid", "not-a-hex-id");

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            to_value(&err).unwrap(),
            json!({ "error": ["Bad Request", "`not-a-hex-id` is not a valid `tid`"] })
        );
    }

    #[test]
    fn internal_error_has_no_detail() {
        let err = ApiError::internal();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.errors(), ["Internal Server Error"]);
    }
}
