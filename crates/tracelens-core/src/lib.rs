//! # tracelens-core
//!
//! Frame classification and presentation primitives for Tracelens.
//!
//! This crate owns the decision logic behind the stack-trace viewer:
//! - Resolving the effective platform of a frame (frame platform first,
//!   ambient trace platform as fallback)
//! - Deciding whether a frame row is expandable (source context, local
//!   variables, registers, or inline assembly available)
//! - Selecting the native vs. generic row layout
//! - Classifying the load status of the binary image behind a frame
//! - Detecting inline-frame and leads-to-app relationships between
//!   neighboring frames
//!
//! Everything here is synchronous and total: absent optional fields fall
//! back to defined behavior instead of failing. Frame descriptors arrive
//! fully parsed and symbolicated from upstream; this crate never mutates
//! them.

pub mod error;
pub mod events;
pub mod layout;
pub mod symbol;
pub mod trace;
pub mod types;

// Re-export commonly used types
pub use error::{TraceError, TraceResult};
pub use layout::{is_expandable, FrameLayout};
pub use trace::Trace;
pub use types::{BinaryImage, Frame, PackageStatus, Platform, Registers};
