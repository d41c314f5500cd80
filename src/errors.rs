//! Error types shared across the crate
//!
//! Navigation never produces errors - a missing key or a wrongly-typed
//! intermediate step degrades to the empty state or a null view instead.
//! Errors only surface at the explicit boundaries: wrapping, typed
//! extraction, encoding and the keyed fold.

use thiserror::Error;

/// Global result type used throughout the crate
pub type JsonResult<T> = Result<T, Error>;

/// Enumeration of the failures the crate can report
#[derive(Debug, Error)]
pub enum Error {
    /// An attempt was made to wrap a document that does not exist
    #[error("can't wrap a missing value as json")]
    NilInput,
    /// A typed read was attempted against the empty state
    #[error("empty json can't be read as {0}")]
    EmptyValue(&'static str),
    /// The held value can't be coerced to the requested type
    #[error("json value is not {expected}")]
    Coercion {
        /// Human-readable name of the requested type
        expected: &'static str,
    },
    /// More keys than transforms were supplied to [`crate::Json::trampoline_keys`]
    #[error("{keys} keys supplied but only {transforms} transforms")]
    ArityMismatch {
        /// Number of keys requested
        keys: usize,
        /// Number of transforms available
        transforms: usize,
    },
    /// The underlying parser or encoder failed
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
