//! Dependencies shared by every handler, passed in at construction.

use std::sync::Arc;

use roster_infra::users::{InMemoryUserRepository, UserRepository};

use crate::app::links::LinkGenerator;
use crate::config::{ApiConfig, PagingLimits};

pub struct AppServices {
    pub users: Arc<dyn UserRepository>,
    pub links: LinkGenerator,
    pub paging: PagingLimits,
}

impl AppServices {
    pub fn new(users: Arc<dyn UserRepository>, links: LinkGenerator, paging: PagingLimits) -> Self {
        Self { users, links, paging }
    }

    /// Services backed by a fresh in-memory repository.
    pub fn in_memory(config: &ApiConfig) -> Self {
        Self::with_repository(Arc::new(InMemoryUserRepository::new()), config)
    }

    pub fn with_repository(users: Arc<dyn UserRepository>, config: &ApiConfig) -> Self {
        Self::new(
            users,
            LinkGenerator::new(config.public_base_url.clone()),
            config.paging,
        )
    }

    /// Clamp raw query values: page number to at least 1, page size to
    /// `[1, max_page_size]`. Absent values take the defaults.
    pub fn clamp_page(&self, page_number: Option<i64>, page_size: Option<i64>) -> (u32, u32) {
        let number = page_number.unwrap_or(1).clamp(1, i64::from(u32::MAX));
        let size = page_size
            .unwrap_or(i64::from(self.paging.default_page_size))
            .clamp(1, i64::from(self.paging.max_page_size));
        (
            u32::try_from(number).unwrap_or(u32::MAX),
            u32::try_from(size).unwrap_or(self.paging.max_page_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_page_applies_defaults_and_bounds() {
        let services = AppServices::in_memory(&ApiConfig::default());

        assert_eq!(services.clamp_page(None, None), (1, 10));
        assert_eq!(services.clamp_page(Some(0), Some(0)), (1, 1));
        assert_eq!(services.clamp_page(Some(-4), Some(500)), (1, 20));
        assert_eq!(services.clamp_page(Some(3), Some(7)), (3, 7));
        assert_eq!(services.clamp_page(Some(i64::MAX), None), (u32::MAX, 10));
    }
}
