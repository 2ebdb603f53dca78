//! Utility functions shared across layers.
//!
//! - [`shortener`] - Deterministic shortcode derivation
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod shortener;
