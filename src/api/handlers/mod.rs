//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod list;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use health::health_handler;
pub use list::list_all_handler;
pub use redirect::redirect_handler;
pub use shorten::{create_handler, delete_handler, update_handler};
pub use stats::stats_handler;
