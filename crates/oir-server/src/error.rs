//! HTTP error mapping
//!
//! Every failure leaves the service as JSON with at least an `error` field.

use oir_core::RegistryError;
use serde::Serialize;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// Request failures raised by handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Query string value outside the accepted set
    #[error("invalid query parameter {name}: {value}")]
    InvalidQuery { name: &'static str, value: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            Self::Registry(RegistryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Registry(RegistryError::Duplicate { .. }) => StatusCode::CONFLICT,
            Self::Registry(RegistryError::CodeSpaceExhausted) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Registry(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl warp::reject::Reject for ApiError {}

/// JSON error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub fn reply(&self, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
        warp::reply::with_status(warp::reply::json(self), status)
    }
}

/// Turn rejections into JSON responses
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, body) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, ErrorBody::new("not found"))
    } else if let Some(api) = err.find::<ApiError>() {
        (api.status(), ErrorBody::new(api.to_string()))
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, ErrorBody::new(e.to_string()))
    } else if let Some(e) = err.find::<warp::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, ErrorBody::new(e.to_string()))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, ErrorBody::new("payload too large"))
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, ErrorBody::new("content length required"))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, ErrorBody::new("method not allowed"))
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new("internal server error"),
        )
    };
    Ok(body.reply(status))
}
