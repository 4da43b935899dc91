//! Absolute URIs for `Location` and paging links.

use axum::http::{header, HeaderMap};
use roster_core::UserId;

use crate::app::routes::users::USERS_PATH;

/// Builds absolute links to the users resource.
///
/// With a configured public base URL every link uses it; otherwise the
/// request's `Host` is used over plain http.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGenerator {
    public_base_url: Option<String>,
}

impl LinkGenerator {
    pub fn new(public_base_url: Option<String>) -> Self {
        Self {
            public_base_url: public_base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    fn base(&self, headers: &HeaderMap) -> String {
        if let Some(base) = &self.public_base_url {
            return base.clone();
        }
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| !h.is_empty())
            .unwrap_or("localhost");
        format!("http://{host}")
    }

    pub fn user(&self, headers: &HeaderMap, id: UserId) -> String {
        format!("{}{USERS_PATH}/{id}", self.base(headers))
    }

    pub fn users_page(&self, headers: &HeaderMap, page_number: u32, page_size: u32) -> String {
        format!(
            "{}{USERS_PATH}?pageNumber={page_number}&pageSize={page_size}",
            self.base(headers)
        )
    }
}
