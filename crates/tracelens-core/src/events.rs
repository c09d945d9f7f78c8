//! Presentation event types and helpers.
//!
//! Frame rows and the trace-wide image list are unrelated components;
//! effects that cross between them travel over this channel instead of a
//! direct reference. A frame publishes [`TraceEvent::FocusImage`] and the
//! image-list pane reacts by filtering itself to the matching image and
//! scrolling to the [`IMAGE_LIST_ANCHOR`]. The two formatting toggles ride
//! the same channel so their owner (the app) stays the only writer of the
//! formatting flags.

use std::sync::mpsc;

/// Anchor identifier shared between the frame rows and the image-list pane.
/// A focus-image request always scrolls to this pane.
pub const IMAGE_LIST_ANCHOR: &str = "images";

/// Event published by a frame presenter for trace-wide collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent
{
    /// Filter the image list down to the image covering this address and
    /// scroll the image-list anchor into view. Never touches expansion
    /// state.
    FocusImage
    {
        /// Instruction address of the originating frame (if it has one).
        instruction_addr: Option<String>,
    },
    /// Flip absolute vs. image-relative address display for every frame.
    ToggleAddressFormat,
    /// Flip trimmed vs. complete function names on native rows.
    ToggleFunctionName
    {
        /// Identifier of the originating frame, for correlation.
        frame_id: Option<usize>,
    },
}

impl TraceEvent
{
    /// Human-readable description of the event.
    #[must_use]
    pub fn describe(&self) -> String
    {
        match self {
            Self::FocusImage { instruction_addr } => match instruction_addr {
                Some(addr) => format!("Focus image covering {addr}"),
                None => "Focus image list".to_string(),
            },
            Self::ToggleAddressFormat => "Toggle address format".to_string(),
            Self::ToggleFunctionName { frame_id } => match frame_id {
                Some(id) => format!("Toggle function name on frame {id}"),
                None => "Toggle function name".to_string(),
            },
        }
    }
}

/// Sender side of the trace event channel.
pub type TraceEventSender = mpsc::Sender<TraceEvent>;
/// Receiver side of the trace event channel.
pub type TraceEventReceiver = mpsc::Receiver<TraceEvent>;

/// Create a new trace event channel.
#[must_use]
pub fn event_channel() -> (TraceEventSender, TraceEventReceiver)
{
    mpsc::channel()
}
