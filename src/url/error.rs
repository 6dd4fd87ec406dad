//! Error type for URL manipulation.

use thiserror::Error;

/// Errors raised by explicit URL mutation or parsing.
///
/// Segment algebra and query parsing never fail; an absent match or an
/// oddly encoded pair is handled in place, so the only hard error left is
/// a bad port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// Port value outside 1..=65535, or not numeric.
    #[error("invalid port {0:?}: expected an integer in 1..=65535")]
    InvalidPort(String),
}
