//! Row layout selection and expandability.

use crate::types::{Frame, Platform, Registers};

/// Rendering mode for a single frame row.
///
/// Exactly one layout is chosen per render, and the choice is a pure
/// function of the resolved platform. Expansion state never factors in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLayout
{
    /// Low-level row: package + load status, toggleable instruction address,
    /// symbol block.
    Native,
    /// Title row: function/file/line summary, lead hint, repeat badge.
    Generic,
}

impl FrameLayout
{
    /// Choose the layout for a resolved platform. The native family
    /// (`objc`, `cocoa`, `native`) gets the low-level row; everything else
    /// the generic one.
    pub fn select(platform: &Platform) -> Self
    {
        if platform.is_native() {
            FrameLayout::Native
        } else {
            FrameLayout::Generic
        }
    }
}

/// Whether a frame row has anything worth expanding.
///
/// True if ANY of:
/// - the frame is not the sole frame of the trace and the caller permits the
///   empty-source notation placeholder;
/// - source context lines are available;
/// - local variables were captured;
/// - a register snapshot is available;
/// - an inline-assembly view is available (assembly-capable platform with a
///   known package).
///
/// Evaluated fresh on every render: registers and context can change
/// identity across renders of the same logical frame, so the result is never
/// cached.
pub fn is_expandable(
    frame: &Frame,
    registers: &Registers,
    resolved_platform: &Platform,
    is_only_frame: bool,
    empty_source_notation: bool,
) -> bool
{
    (!is_only_frame && empty_source_notation)
        || frame.has_context_source()
        || frame.has_context_vars()
        || !registers.is_empty()
        || frame.has_assembly(resolved_platform)
}
