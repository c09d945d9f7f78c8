//! Application state and logic

use ratatui::widgets::ListState;
use tracelens_core::events::{event_channel, TraceEvent, TraceEventReceiver, TraceEventSender, IMAGE_LIST_ANCHOR};
use tracelens_core::trace::collapse_repeats;
use tracelens_core::types::{BinaryImage, Platform, Registers};
use tracelens_core::Trace;
use tracelens_utils::debug;

use crate::presenter::{FrameContext, FramePresenter};

/// Panes the user can focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane
{
    /// The stack-trace frame list.
    Trace,
    /// The image list; the target of the focus-image anchor.
    Images,
}

/// Application state
pub struct App
{
    /// Ambient platform of the loaded trace
    pub platform: Platform,
    /// One presenter per rendered frame row; each owns its expansion state
    pub presenters: Vec<FramePresenter>,
    /// Register snapshot captured at the point of the crash
    pub registers: Registers,
    /// Binary images loaded in the crashed process
    pub images: Vec<BinaryImage>,
    /// Index of the selected frame row
    pub selected_frame: usize,
    /// Which pane has keyboard focus
    pub focused_pane: Pane,
    /// Show absolute instruction addresses instead of image-relative ones
    pub show_absolute_addresses: bool,
    /// Show fully-qualified function names on native rows
    pub show_complete_function_names: bool,
    /// Permit the empty-source notation expandability path
    pub empty_source_notation: bool,
    /// Address filter applied to the image list (set by focus-image)
    pub image_filter: Option<String>,
    /// Selection state for the image list
    pub images_state: ListState,
    /// Transient status line
    pub status_message: Option<String>,
    /// Whether the application should exit
    pub should_quit: bool,
    events: TraceEventSender,
    event_queue: TraceEventReceiver,
    no_registers: Registers,
}

impl App
{
    /// Create the application state for a loaded trace.
    ///
    /// Consecutive duplicate frames collapse into one presenter carrying the
    /// repeat count; every presenter starts collapsed.
    #[must_use]
    pub fn new(trace: Trace) -> Self
    {
        let Trace {
            platform,
            frames,
            registers,
            images,
        } = trace;

        let presenters: Vec<FramePresenter> = collapse_repeats(frames)
            .into_iter()
            .enumerate()
            .map(|(id, (frame, times_repeated))| {
                FramePresenter::new(frame, times_repeated).with_frame_id(id)
            })
            .collect();

        let (events, event_queue) = event_channel();

        Self {
            platform,
            presenters,
            registers,
            images,
            selected_frame: 0,
            focused_pane: Pane::Trace,
            show_absolute_addresses: false,
            show_complete_function_names: false,
            empty_source_notation: true,
            image_filter: None,
            images_state: ListState::default(),
            status_message: None,
            should_quit: false,
            events,
            event_queue,
            no_registers: Registers::new(),
        }
    }

    /// Per-render context for the presenter at `index`.
    #[must_use]
    pub fn frame_context(&self, index: usize) -> FrameContext<'_>
    {
        let frame = self.presenters[index].frame();
        FrameContext {
            prev_frame: index
                .checked_sub(1)
                .map(|prev| self.presenters[prev].frame()),
            next_frame: self.presenters.get(index + 1).map(FramePresenter::frame),
            trace_platform: &self.platform,
            // The snapshot describes CPU state where execution stopped, so
            // only the innermost frame carries it
            registers: if index + 1 == self.presenters.len() {
                &self.registers
            } else {
                &self.no_registers
            },
            image: frame
                .instruction_addr
                .as_deref()
                .and_then(|addr| self.images.iter().find(|image| image.contains_address(addr))),
            show_absolute_address: self.show_absolute_addresses,
            show_complete_function_name: self.show_complete_function_names,
            is_only_frame: self.presenters.len() == 1,
            empty_source_notation: self.empty_source_notation,
        }
    }

    /// Images shown in the image pane, honoring the focus-image filter.
    /// Returns `(original index, image)` pairs.
    #[must_use]
    pub fn filtered_images(&self) -> Vec<(usize, &BinaryImage)>
    {
        match self.image_filter.as_deref() {
            Some(addr) => self
                .images
                .iter()
                .enumerate()
                .filter(|(_, image)| image.contains_address(addr))
                .collect(),
            None => self.images.iter().enumerate().collect(),
        }
    }

    /// Handle a keyboard event
    ///
    /// Returns `true` if the application should quit, `false` otherwise.
    pub fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) -> bool
    {
        use crossterm::event::KeyCode;

        self.status_message = None;

        match key_event.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Tab => {
                self.focused_pane = match self.focused_pane {
                    Pane::Trace => Pane::Images,
                    Pane::Images => Pane::Trace,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.navigate_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.navigate_down();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.focused_pane == Pane::Trace {
                    self.toggle_selected();
                }
            }
            KeyCode::Char('i') => {
                if self.focused_pane == Pane::Trace {
                    self.focus_selected_image();
                }
            }
            KeyCode::Char('a') => {
                if let Some(presenter) = self.presenters.get(self.selected_frame) {
                    presenter.request_address_toggle(&self.events);
                }
            }
            KeyCode::Char('f') => {
                if let Some(presenter) = self.presenters.get(self.selected_frame) {
                    presenter.request_function_name_toggle(&self.events);
                }
            }
            KeyCode::Char('c') => {
                self.image_filter = None;
                self.images_state.select(None);
            }
            _ => {}
        }

        // Side effects published by the handlers above land before the next
        // draw
        self.apply_trace_events();

        false
    }

    /// Update the application state (called on each tick)
    pub fn tick(&mut self)
    {
        self.apply_trace_events();
    }

    /// Toggle the selected frame's expansion, when and only when the frame
    /// is expandable. Toggling a non-expandable row is a no-op here; the
    /// presenter's own toggle stays unguarded.
    fn toggle_selected(&mut self)
    {
        let index = self.selected_frame;
        if index >= self.presenters.len() {
            return;
        }
        let expandable = {
            let ctx = self.frame_context(index);
            self.presenters[index].is_expandable(&ctx)
        };
        if expandable {
            self.presenters[index].toggle_context();
        }
    }

    /// Fire the focus-image interaction for the selected frame.
    ///
    /// Only frames the symbolicator matched to a loaded image link anywhere;
    /// the effect travels over the event channel, never through expansion
    /// state.
    fn focus_selected_image(&mut self)
    {
        let Some(presenter) = self.presenters.get(self.selected_frame) else {
            return;
        };
        if presenter.frame().should_link_to_image() {
            presenter.focus_image(&self.events);
        } else {
            self.status_message = Some("No image is known for this frame".to_string());
        }
    }

    /// Resolve a focus anchor published on the event channel to the pane
    /// that owns it. Unknown anchors resolve to nothing and leave focus
    /// untouched.
    #[must_use]
    pub fn pane_for_anchor(anchor: &str) -> Option<Pane>
    {
        (anchor == IMAGE_LIST_ANCHOR).then_some(Pane::Images)
    }

    /// Drain the trace event channel and apply each effect.
    fn apply_trace_events(&mut self)
    {
        while let Ok(event) = self.event_queue.try_recv() {
            debug!("trace event: {}", event.describe());
            match event {
                TraceEvent::FocusImage { instruction_addr } => {
                    self.image_filter = instruction_addr;
                    // Focus-image requests target the well-known image-list
                    // anchor: resolve it to its pane and select the match
                    if let Some(pane) = Self::pane_for_anchor(IMAGE_LIST_ANCHOR) {
                        self.focused_pane = pane;
                    }
                    let selection = if self.filtered_images().is_empty() {
                        None
                    } else {
                        Some(0)
                    };
                    self.images_state.select(selection);
                }
                TraceEvent::ToggleAddressFormat => {
                    self.show_absolute_addresses = !self.show_absolute_addresses;
                }
                TraceEvent::ToggleFunctionName { frame_id: _ } => {
                    self.show_complete_function_names = !self.show_complete_function_names;
                }
            }
        }
    }

    fn navigate_up(&mut self)
    {
        match self.focused_pane {
            Pane::Trace => {
                let max = self.presenters.len().saturating_sub(1);
                if max == 0 {
                    return;
                }
                self.selected_frame = if self.selected_frame == 0 {
                    max
                } else {
                    self.selected_frame - 1
                };
            }
            Pane::Images => {
                let count = self.filtered_images().len();
                if count == 0 {
                    return;
                }
                let i = self.images_state.selected().unwrap_or(0);
                let next = if i == 0 { count - 1 } else { i - 1 };
                self.images_state.select(Some(next));
            }
        }
    }

    fn navigate_down(&mut self)
    {
        match self.focused_pane {
            Pane::Trace => {
                let max = self.presenters.len().saturating_sub(1);
                if max == 0 {
                    return;
                }
                self.selected_frame = if self.selected_frame >= max {
                    0
                } else {
                    self.selected_frame + 1
                };
            }
            Pane::Images => {
                let count = self.filtered_images().len();
                if count == 0 {
                    return;
                }
                let i = self.images_state.selected().unwrap_or(0);
                let next = if i + 1 >= count { 0 } else { i + 1 };
                self.images_state.select(Some(next));
            }
        }
    }
}
