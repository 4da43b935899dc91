//! Response format selection from the `Accept` header.
//!
//! JSON is the default; XML is offered for `application/xml` and `text/xml`.
//! A header that names only unsupported types yields 406.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

pub const JSON_UTF8: &str = "application/json; charset=utf-8";
pub const XML_UTF8: &str = "application/xml; charset=utf-8";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Xml,
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("xml encoding failed: {0}")]
    Xml(String),
}

/// A body that can be written in every supported format.
///
/// XML needs one root element; collections override [`Representation::to_xml`]
/// to wrap their items.
pub trait Representation: Serialize + Sized {
    const XML_ROOT: &'static str;

    fn to_xml(&self) -> Result<String, EncodeError> {
        quick_xml::se::to_string_with_root(Self::XML_ROOT, self)
            .map_err(|e| EncodeError::Xml(e.to_string()))
    }
}

impl ResponseFormat {
    /// Pick the best supported format, or `None` when the client accepts none.
    ///
    /// A missing or blank `Accept` header means JSON. Ranges are tried by
    /// descending `q`, ties in header order; `q=0` ranges are skipped.
    pub fn negotiate(headers: &HeaderMap) -> Option<Self> {
        let accept = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(",");

        if accept.trim().is_empty() {
            return Some(Self::Json);
        }

        let mut ranges: Vec<(f32, String)> = accept
            .split(',')
            .filter_map(parse_media_range)
            .filter(|(q, _)| *q > 0.0)
            .collect();
        ranges.sort_by(|a, b| b.0.total_cmp(&a.0));

        ranges.iter().find_map(|(_, media)| Self::for_media_type(media))
    }

    fn for_media_type(media: &str) -> Option<Self> {
        match media {
            "application/json" | "text/json" | "application/*" | "*/*" => Some(Self::Json),
            "application/xml" | "text/xml" | "text/*" | "application/*+xml" => Some(Self::Xml),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => JSON_UTF8,
            Self::Xml => XML_UTF8,
        }
    }

    pub fn encode<T: Representation>(self, body: &T) -> Result<String, EncodeError> {
        match self {
            Self::Json => Ok(serde_json::to_string(body)?),
            Self::Xml => body.to_xml(),
        }
    }
}

/// `"text/xml;q=0.5"` -> `(0.5, "text/xml")`. Unparsable `q` counts as 1;
/// parameter names are case-insensitive.
fn parse_media_range(part: &str) -> Option<(f32, String)> {
    let mut pieces = part.split(';');
    let media = pieces.next()?.trim().to_ascii_lowercase();
    if media.is_empty() {
        return None;
    }

    let q = pieces
        .filter_map(|p| p.split_once('='))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .find_map(|(_, v)| v.trim().parse::<f32>().ok())
        .unwrap_or(1.0);

    Some((q, media))
}

/// Encode `body` in an already negotiated format.
pub fn render<T: Representation>(
    format: ResponseFormat,
    status: StatusCode,
    body: &T,
) -> Response {
    match format.encode(body) {
        Ok(encoded) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(format.content_type()))],
            encoded,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Negotiate against the request headers, then [`render`].
pub fn render_negotiated<T: Representation>(
    headers: &HeaderMap,
    status: StatusCode,
    body: &T,
) -> Response {
    match ResponseFormat::negotiate(headers) {
        Some(format) => render(format, status, body),
        None => StatusCode::NOT_ACCEPTABLE.into_response(),
    }
}
