//! Trace input aggregate.
//!
//! Parsing raw error payloads and symbolicating addresses happen upstream;
//! this module only loads the already-processed frame list the presentation
//! engine consumes, and offers the small helpers callers need to wire frames
//! to their neighbors and images.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{TraceError, TraceResult};
use crate::types::{BinaryImage, Frame, Platform, Registers};

/// A fully processed stack trace ready for presentation.
///
/// Frames are ordered outermost-first: callers precede their callees and the
/// crashing frame comes last. For a frame at index `i`, its previous
/// neighbor is `frames[i - 1]` (the caller) and its next neighbor is
/// `frames[i + 1]` (the callee).
#[derive(Debug, Clone, Deserialize)]
pub struct Trace
{
    /// Ambient platform of the enclosing error event.
    pub platform: Platform,
    /// Frame list, outermost-first.
    pub frames: Vec<Frame>,
    /// Register snapshot captured with the trace, if any.
    #[serde(default)]
    pub registers: Registers,
    /// Binary images loaded in the crashed process.
    #[serde(default)]
    pub images: Vec<BinaryImage>,
}

impl Trace
{
    /// Load a trace from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] when the file cannot be read,
    /// [`TraceError::Parse`] when the payload does not match the trace
    /// shape, and [`TraceError::InvalidTrace`] when it parses but holds no
    /// frames.
    pub fn from_json_file(path: &Path) -> TraceResult<Self>
    {
        let raw = fs::read_to_string(path)?;
        let trace: Trace = serde_json::from_str(&raw)?;

        if trace.frames.is_empty() {
            return Err(TraceError::InvalidTrace(
                "trace contains no frames".to_string(),
            ));
        }

        debug!(
            frames = trace.frames.len(),
            images = trace.images.len(),
            platform = %trace.platform,
            "loaded trace"
        );

        Ok(trace)
    }

    /// Whether the trace consists of a single frame.
    pub fn is_only_frame(&self) -> bool
    {
        self.frames.len() == 1
    }

    /// Find the image whose mapped range covers a frame's instruction
    /// address. At most one image backs any given frame.
    pub fn image_for_frame(&self, frame: &Frame) -> Option<&BinaryImage>
    {
        let addr = frame.instruction_addr.as_deref()?;
        self.images.iter().find(|image| image.contains_address(addr))
    }
}

/// Collapse consecutive duplicate frames into one representative plus the
/// number of hidden repeats.
///
/// Two frames count as duplicates when function, module, file position, and
/// instruction address all agree. A run of `k` identical frames yields one
/// entry with `times_repeated = k - 1`, so a unique frame reports zero and
/// renders no badge.
pub fn collapse_repeats(frames: Vec<Frame>) -> Vec<(Frame, u32)>
{
    let mut collapsed: Vec<(Frame, u32)> = Vec::with_capacity(frames.len());

    for frame in frames {
        match collapsed.last_mut() {
            Some((last, times_repeated)) if is_repeat(last, &frame) => {
                *times_repeated += 1;
            }
            _ => collapsed.push((frame, 0)),
        }
    }

    collapsed
}

fn is_repeat(a: &Frame, b: &Frame) -> bool
{
    a.function == b.function
        && a.module == b.module
        && a.filename == b.filename
        && a.lineno == b.lineno
        && a.colno == b.colno
        && a.instruction_addr == b.instruction_addr
}
