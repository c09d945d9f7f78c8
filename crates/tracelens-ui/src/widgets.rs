//! Widget drawing functions for the trace and image panes

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use tracelens_core::symbol::trim_package;
use tracelens_core::types::image::ImageStatus;

use crate::app::{App, Pane};

fn pane_block(title: &str, focused: bool) -> Block<'_>
{
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default().borders(Borders::ALL).title(title).border_style(border_style)
}

/// Draw the stack-trace pane: one multi-line item per frame presenter
pub fn draw_trace(frame: &mut Frame, area: Rect, app: &mut App)
{
    let items: Vec<ListItem> = (0..app.presenters.len())
        .map(|index| {
            let ctx = app.frame_context(index);
            ListItem::new(app.presenters[index].render(&ctx))
        })
        .collect();

    let list = List::new(items)
        .block(pane_block("Stack Trace", app.focused_pane == Pane::Trace))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.presenters.is_empty() {
        state.select(Some(app.selected_frame));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the image pane, honoring the focus-image filter
pub fn draw_images(frame: &mut Frame, area: Rect, app: &mut App)
{
    let items: Vec<ListItem> = app
        .filtered_images()
        .iter()
        .map(|(_, image)| {
            let mut spans = Vec::new();

            let (marker, marker_color) = match ImageStatus::combine(image.debug_status, image.unwind_status) {
                ImageStatus::Found => ("● ", Color::Green),
                ImageStatus::Unused => ("○ ", Color::DarkGray),
                _ => ("✗ ", Color::Red),
            };
            spans.push(Span::styled(marker, Style::default().fg(marker_color)));

            let name = image
                .code_file
                .as_deref()
                .map_or_else(|| "<unknown>".to_string(), trim_package);
            spans.push(Span::raw(name));

            if let Some(addr) = &image.image_addr {
                spans.push(Span::styled(
                    format!("  {addr}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if app.image_filter.is_some() {
        "Images (filtered)"
    } else {
        "Images"
    };

    let list = List::new(items)
        .block(pane_block(title, app.focused_pane == Pane::Images))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.images_state);
}
