//! Core domain entities.
//!
//! - [`UrlRecord`] - A persisted long URL ↔ shortcode mapping
//! - [`NewUrlRecord`] - Input for inserting a record
//! - [`UrlSummary`] - The `{url, shortcode}` projection served by listings
//!   and stored in the cached snapshot

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord, UrlSummary};
