//! Helpers for classifying database errors.

/// Name of the unique constraint guarding `url_store.shortcode`.
pub const SHORTCODE_CONSTRAINT: &str = "url_store_shortcode_key";

/// Returns true if `e` is a unique violation on the shortcode column.
pub fn is_unique_violation_on_shortcode(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORTCODE_CONSTRAINT))
}
