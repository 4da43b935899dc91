//! `roster-core` — domain building blocks for the user directory.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod page;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use page::PageList;
pub use user::{Login, UserDraft, UserEntity};
