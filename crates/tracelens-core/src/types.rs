//! # Types
//!
//! Presentation-agnostic data model for the frame viewer.
//!
//! These types mirror what upstream symbolication hands us: immutable frame
//! descriptors, the binary images loaded in the crashed process, and the
//! register snapshot captured with the trace. The presentation layer only
//! reads them; nothing in this crate writes them back.

use std::collections::BTreeMap;

pub mod frame;
pub mod image;
pub mod platform;

// Re-export all public types
pub use frame::{ContextLine, Frame, FrameTrust, SymbolicatorStatus};
pub use image::{BinaryImage, ImageStatus, PackageStatus};
pub use platform::Platform;

/// Register name mapped to its formatted value.
///
/// Ordered so the register pane renders deterministically; may be empty when
/// the trace carried no register snapshot.
pub type Registers = BTreeMap<String, String>;
