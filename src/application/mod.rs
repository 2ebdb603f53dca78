//! Application layer services implementing business logic.
//!
//! Services consume repository traits and cache handles injected at
//! construction and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::mapping_service::MappingService`] - Create/read/update/delete/list of
//!   URL mappings with cache consistency rules

pub mod services;
