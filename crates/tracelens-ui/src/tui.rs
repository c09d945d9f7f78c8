//! Terminal User Interface initialization and management

use std::io::{self, Stdout};
use std::panic;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracelens_core::Trace;
use tracelens_utils::info;

use crate::app::App;
use crate::event::Event;

/// Terminal User Interface for the Tracelens viewer
///
/// This struct manages the terminal state and provides methods to run
/// the interactive trace viewer.
pub struct Tui
{
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui
{
    /// Create a new TUI instance
    ///
    /// This initializes the terminal in raw mode and alternate screen,
    /// and sets up panic handling to restore the terminal on panic.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails (raw mode, alternate screen, etc.)
    ///
    /// # Panics
    ///
    /// May panic if terminal restoration fails during panic hook setup
    pub fn new() -> io::Result<Self>
    {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Set up panic hook to restore terminal on panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            Self::restore().unwrap();
            original_hook(panic_info);
        }));

        Ok(Self { terminal })
    }

    /// Run the TUI event loop
    ///
    /// This starts the interactive trace viewer and handles user input
    /// until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails or terminal restoration fails
    pub async fn run(&mut self, trace: Trace) -> io::Result<()>
    {
        info!(
            "Tracelens TUI started ({} frames, platform: {})",
            trace.frames.len(),
            trace.platform
        );

        let mut app = App::new(trace);
        let mut event_handler = crate::event::EventHandler::new();

        loop {
            if app.should_quit {
                break;
            }

            self.terminal.draw(|frame| crate::ui::draw(frame, &mut app))?;

            // Use a timeout to allow periodic checks
            match tokio::time::timeout(std::time::Duration::from_millis(100), event_handler.next()).await {
                Ok(Some(event)) => match event {
                    Event::Key(key_event) => {
                        if app.handle_key_event(key_event) {
                            break;
                        }
                    }
                    Event::Tick => {
                        app.tick();
                    }
                },
                Ok(None) => {
                    // Channel closed
                    break;
                }
                Err(_) => {
                    // Timeout - check should_quit and continue
                    if app.should_quit {
                        break;
                    }
                }
            }
        }

        info!("Tracelens TUI closing");

        // Restore terminal before stopping the handler so the user sees
        // normal output right away
        Self::restore()?;
        event_handler.stop();

        Ok(())
    }

    /// Restore the terminal to its original state
    ///
    /// This should be called when exiting the TUI to ensure the terminal
    /// is left in a usable state.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal restoration fails (disabling raw mode, leaving alternate screen, etc.)
    pub fn restore() -> io::Result<()>
    {
        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }
}

impl Drop for Tui
{
    fn drop(&mut self)
    {
        let _ = Self::restore();
    }
}
