//! UI rendering logic

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, Pane};

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &mut App)
{
    let constraints: Box<[Constraint]> = Box::new([
        Constraint::Length(3), // Header
        Constraint::Min(0),    // Main content
        Constraint::Length(3), // Footer/status
    ]);
    let chunks = Layout::vertical(constraints).split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_main_content(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

/// Draw the header bar
fn draw_header(frame: &mut Frame, area: Rect, app: &App)
{
    let title = format!(
        "Tracelens - {} trace, {} frames, {} images",
        app.platform,
        app.presenters.len(),
        app.images.len()
    );

    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL).title("Tracelens"))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(header, area);
}

/// Draw the main content area: the frame list beside the image list
fn draw_main_content(frame: &mut Frame, area: Rect, app: &mut App)
{
    let constraints: Box<[Constraint]> = Box::new([
        Constraint::Percentage(70), // Stack trace
        Constraint::Percentage(30), // Images
    ]);
    let chunks = Layout::horizontal(constraints).split(area);

    crate::widgets::draw_trace(frame, chunks[0], app);
    crate::widgets::draw_images(frame, chunks[1], app);
}

/// Draw the footer with help text
fn draw_footer(frame: &mut Frame, area: Rect, app: &App)
{
    let help_text = match app.focused_pane {
        Pane::Trace => {
            "↑/↓:Navigate Enter/Space:Expand i:Image a:AddrFormat f:FullNames Tab:Pane q/Esc:Quit"
        }
        Pane::Images => "↑/↓:Navigate c:ClearFilter Tab:Pane q/Esc:Quit",
    };

    let mut footer_lines = vec![Line::from(help_text)];

    if let Some(ref message) = app.status_message {
        footer_lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let footer = Paragraph::new(footer_lines)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .style(Style::default().fg(Color::White))
        .wrap(ratatui::widgets::Wrap { trim: true });

    frame.render_widget(footer, area);
}
