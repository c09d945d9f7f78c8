//! # Error Types
//!
//! Error handling for trace loading.
//!
//! We use `thiserror` to automatically generate `Error` trait
//! implementations and nice error messages.
//!
//! Classification itself never fails: every predicate and selector in this
//! crate is total over its documented inputs, and malformed data degrades to
//! a defined fallback instead of an error. The only fallible surface is
//! getting a trace into memory in the first place.

use thiserror::Error;

/// Main error type for trace loading operations.
#[derive(Error, Debug)]
pub enum TraceError
{
    /// The trace file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload was not valid JSON or did not match the expected trace
    /// shape.
    #[error("Malformed trace payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload parsed but cannot be presented.
    ///
    /// Example: a trace with no frames at all. Frame assembly is upstream's
    /// job; this viewer requires at least one frame to present.
    #[error("Invalid trace: {0}")]
    InvalidTrace(String),
}

/// Convenience type alias for `Result<T, TraceError>`
///
/// ```rust
/// use tracelens_core::error::TraceResult;
/// fn foo() -> TraceResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type TraceResult<T> = std::result::Result<T, TraceError>;
