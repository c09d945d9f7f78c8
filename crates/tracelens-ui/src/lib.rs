//! # tracelens-ui
//!
//! Terminal User Interface (TUI) for the Tracelens stack-trace viewer.
//!
//! This crate drives the per-frame presentation engine: each frame of the
//! loaded trace gets a [`presenter::FramePresenter`] owning its own
//! expand/collapse state, and the interface composes those presenters into
//! the trace pane plus the image-list pane they talk to over the trace
//! event channel.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tracelens_core::Trace;
//! use tracelens_ui::Tui;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let trace = Trace::from_json_file(Path::new("trace.json"))?;
//!
//! let mut tui = Tui::new()?;
//! tui.run(trace).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod event;
pub mod presenter;
pub mod render;
pub mod tui;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use presenter::{FrameContext, FramePresenter, FrameTags};
pub use tui::Tui;

/// Run the TUI for a loaded trace.
///
/// Convenience wrapper that creates a [`Tui`] and runs it until the user
/// quits.
pub async fn run_tui(trace: tracelens_core::Trace) -> std::io::Result<()>
{
    let mut tui = Tui::new()?;
    tui.run(trace).await
}
