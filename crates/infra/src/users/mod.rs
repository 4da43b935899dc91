//! User storage boundary.
//!
//! The handler layer only ever sees [`UserRepository`]; the in-memory adapter
//! is the one shipped with the service.

pub mod in_memory;
pub mod repository;

pub use in_memory::InMemoryUserRepository;
pub use repository::{UpsertOutcome, UserRepository};
