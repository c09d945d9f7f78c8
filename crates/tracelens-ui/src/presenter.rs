//! Per-frame presentation state and composition.
//!
//! One [`FramePresenter`] exists per rendered frame and is the sole owner of
//! that frame's expand/collapse state. Everything else it shows is computed
//! fresh on each render from the frame descriptor and the borrowed
//! [`FrameContext`], so a new register snapshot or neighbor list is picked
//! up without any cache invalidation.

use ratatui::text::Line;
use tracelens_core::events::{TraceEvent, TraceEventSender};
use tracelens_core::layout::{is_expandable, FrameLayout};
use tracelens_core::types::{BinaryImage, Frame, PackageStatus, Platform, Registers};
use tracelens_utils::warn;

use crate::render;

/// Trace-level context a presenter borrows for one render pass.
///
/// The neighbors follow trace order: `prev_frame` is the caller,
/// `next_frame` the callee. `image` is the at-most-one binary image whose
/// mapped range covers this frame.
#[derive(Clone, Copy)]
pub struct FrameContext<'a>
{
    /// Caller frame, if any.
    pub prev_frame: Option<&'a Frame>,
    /// Callee frame, if any.
    pub next_frame: Option<&'a Frame>,
    /// Ambient platform of the enclosing trace.
    pub trace_platform: &'a Platform,
    /// Register snapshot captured with the trace.
    pub registers: &'a Registers,
    /// Binary image backing this frame.
    pub image: Option<&'a BinaryImage>,
    /// Show absolute instruction addresses instead of image-relative ones.
    pub show_absolute_address: bool,
    /// Show fully-qualified function names on native rows.
    pub show_complete_function_name: bool,
    /// Whether this frame is the sole frame of the trace.
    pub is_only_frame: bool,
    /// Whether the empty-source notation placeholder may be offered.
    pub empty_source_notation: bool,
}

/// Row classification for styling and tests.
///
/// Mirrors the computed predicates one-to-one; consumers may rely on these
/// matching the presenter's rendering decisions for the same render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTags
{
    pub expandable: bool,
    pub expanded: bool,
    pub system_frame: bool,
    pub has_errors: bool,
    pub leads_to_app: bool,
    pub platform: String,
}

/// Presenter for a single stack-trace frame.
///
/// Owns the frame descriptor and the one piece of mutable state in this
/// engine: `is_expanded`. The toggle interaction flips it unconditionally;
/// the guard lives at the interaction surface (the app only routes toggles
/// to expandable rows), not here.
pub struct FramePresenter
{
    frame: Frame,
    frame_id: Option<usize>,
    times_repeated: u32,
    is_expanded: bool,
}

impl FramePresenter
{
    /// Create a presenter for a frame, collapsed by default.
    #[must_use]
    pub fn new(frame: Frame, times_repeated: u32) -> Self
    {
        Self {
            frame,
            frame_id: None,
            times_repeated,
            is_expanded: false,
        }
    }

    /// Set the numeric frame identifier used to correlate native-row
    /// function-name toggles.
    #[must_use]
    pub fn with_frame_id(mut self, frame_id: usize) -> Self
    {
        self.frame_id = Some(frame_id);
        self
    }

    /// Override the initial expansion state.
    #[must_use]
    pub fn with_initial_expansion(mut self, is_expanded: bool) -> Self
    {
        self.is_expanded = is_expanded;
        self
    }

    /// The frame this presenter renders.
    pub fn frame(&self) -> &Frame
    {
        &self.frame
    }

    /// Identifier for toggle correlation, if one was assigned.
    pub fn frame_id(&self) -> Option<usize>
    {
        self.frame_id
    }

    /// Number of identical frames collapsed into this row.
    pub fn times_repeated(&self) -> u32
    {
        self.times_repeated
    }

    /// Current expansion state.
    pub fn is_expanded(&self) -> bool
    {
        self.is_expanded
    }

    /// Flip the expansion state.
    ///
    /// Deliberately unguarded: repeated toggles simply alternate state, and
    /// the interaction surface only offers the toggle on expandable rows.
    pub fn toggle_context(&mut self)
    {
        self.is_expanded = !self.is_expanded;
    }

    /// Effective platform for this frame.
    pub fn resolved_platform(&self, ctx: &FrameContext<'_>) -> Platform
    {
        self.frame.resolved_platform(ctx.trace_platform)
    }

    /// Row layout, a pure function of the resolved platform.
    pub fn layout(&self, ctx: &FrameContext<'_>) -> FrameLayout
    {
        FrameLayout::select(&self.resolved_platform(ctx))
    }

    /// Whether this row carries anything worth expanding. Recomputed every
    /// render.
    pub fn is_expandable(&self, ctx: &FrameContext<'_>) -> bool
    {
        is_expandable(
            &self.frame,
            ctx.registers,
            &self.resolved_platform(ctx),
            ctx.is_only_frame,
            ctx.empty_source_notation,
        )
    }

    /// Load status of the image backing this frame.
    pub fn package_status(&self, ctx: &FrameContext<'_>) -> PackageStatus
    {
        PackageStatus::classify(ctx.image)
    }

    /// Whether the "Called from:" lead hint renders. Only meaningful as a
    /// pre-expansion teaser, so expansion suppresses it.
    pub fn shows_lead_hint(&self, ctx: &FrameContext<'_>) -> bool
    {
        self.frame.leads_to_app(ctx.next_frame) && !self.is_expanded
    }

    /// Row classification for styling and tests.
    pub fn tags(&self, ctx: &FrameContext<'_>) -> FrameTags
    {
        FrameTags {
            expandable: self.is_expandable(ctx),
            expanded: self.is_expanded,
            system_frame: !self.frame.in_app,
            has_errors: self.frame.errors.as_ref().is_some_and(|errors| !errors.is_empty()),
            leads_to_app: self.frame.leads_to_app(ctx.next_frame),
            platform: self.resolved_platform(ctx).name().to_string(),
        }
    }

    /// Publish the focus-image side effect for this frame.
    ///
    /// Independent of expand/collapse: it carries the frame's instruction
    /// address to the image-list pane and never mutates expansion state.
    /// Fire-and-forget; a closed channel only logs.
    pub fn focus_image(&self, events: &TraceEventSender)
    {
        let event = TraceEvent::FocusImage {
            instruction_addr: self.frame.instruction_addr.clone(),
        };
        if events.send(event).is_err() {
            warn!("trace event channel closed, dropping focus-image request");
        }
    }

    /// Ask the owner of the address-format flag to flip it.
    pub fn request_address_toggle(&self, events: &TraceEventSender)
    {
        if events.send(TraceEvent::ToggleAddressFormat).is_err() {
            warn!("trace event channel closed, dropping address toggle");
        }
    }

    /// Ask the owner of the function-name flag to flip it.
    pub fn request_function_name_toggle(&self, events: &TraceEventSender)
    {
        let event = TraceEvent::ToggleFunctionName {
            frame_id: self.frame_id,
        };
        if events.send(event).is_err() {
            warn!("trace event channel closed, dropping function name toggle");
        }
    }

    /// Title row for this frame in the layout the resolved platform selects.
    pub fn title(&self, ctx: &FrameContext<'_>) -> Line<'static>
    {
        match self.layout(ctx) {
            FrameLayout::Native => render::native_title(self, ctx),
            FrameLayout::Generic => render::generic_title(self, ctx),
        }
    }

    /// Full rendering: the title row plus, when expanded, the context body.
    pub fn render(&self, ctx: &FrameContext<'_>) -> Vec<Line<'static>>
    {
        let mut lines = vec![self.title(ctx)];
        if self.is_expanded {
            lines.extend(render::context_body(self, ctx));
        }
        lines
    }
}
