use std::collections::BTreeMap;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::app::negotiate::{self, Representation};

/// Handler-boundary failures. Only `Validation` carries a body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(&'static str),

    #[error("validation failed for {0}")]
    Validation(ValidationErrors),

    #[error("not acceptable")]
    NotAcceptable,
}

/// Field name -> messages, in field name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "{}", fields.join(", "))
    }
}

impl Representation for ValidationErrors {
    const XML_ROOT: &'static str = "errors";
}

pub fn api_error_to_response(err: ApiError, headers: &HeaderMap) -> Response {
    match err {
        ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
        ApiError::BadRequest(reason) => {
            tracing::debug!(reason, "bad request");
            StatusCode::BAD_REQUEST.into_response()
        }
        ApiError::Validation(errors) => {
            tracing::debug!(fields = %errors, "validation failed");
            negotiate::render_negotiated(headers, StatusCode::UNPROCESSABLE_ENTITY, &errors)
        }
        ApiError::NotAcceptable => StatusCode::NOT_ACCEPTABLE.into_response(),
    }
}
