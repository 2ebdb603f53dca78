//! Deterministic shortcode derivation.
//!
//! A shortcode is the first [`SHORTCODE_LEN`] characters of the lowercase hex
//! SHA-256 digest of the URL's UTF-8 bytes. The same URL always yields the same
//! code. Two different URLs can share a prefix; the store's unique constraint
//! is the only guard against that.

use sha2::{Digest, Sha256};

/// Length of every generated shortcode.
pub const SHORTCODE_LEN: usize = 6;

/// Strategy for turning a URL into a shortcode.
pub trait Shortener: Send + Sync {
    fn shorten(&self, url: &str) -> String;
}

/// Production shortener backed by SHA-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Shortener;

impl Shortener for Sha256Shortener {
    fn shorten(&self, url: &str) -> String {
        shorten(url)
    }
}

/// Computes the shortcode for `url`.
///
/// # Examples
///
/// ```
/// use shortcode_service::utils::shortener::shorten;
///
/// let code = shorten("https://example.com");
/// assert_eq!(code.len(), 6);
/// assert_eq!(code, shorten("https://example.com"));
/// ```
pub fn shorten(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut code = hex::encode(digest);
    code.truncate(SHORTCODE_LEN);
    code
}
