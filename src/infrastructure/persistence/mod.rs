//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! - [`PgUrlRepository`] - URL record storage and retrieval

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
