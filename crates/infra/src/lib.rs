//! Infrastructure layer: storage adapters behind domain-facing traits.

pub mod users;
