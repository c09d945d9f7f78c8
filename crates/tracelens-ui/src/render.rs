//! Frame row and context-body composition.
//!
//! Builds the ratatui lines for both row layouts. The layout decision
//! itself lives in `tracelens-core`; this module only lays out what the
//! presenter already decided to show.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tracelens_core::symbol::{display_function, trim_package};
use tracelens_core::types::image::parse_address;
use tracelens_core::types::{Frame, PackageStatus};

use crate::presenter::{FrameContext, FramePresenter};

/// Text of the lead hint rendered ahead of the title on collapsed rows.
pub const LEAD_HINT: &str = "Called from: ";

/// Notation line shown in the body when a frame has nothing but the
/// placeholder to offer.
pub const EMPTY_SOURCE_NOTATION: &str = "No additional details are available for this frame.";

fn dim() -> Style
{
    Style::default().fg(Color::DarkGray)
}

fn label() -> Style
{
    Style::default().fg(Color::Yellow)
}

/// Low-level row: package + load-status marker, toggleable address, symbol
/// block, expander affordance.
pub fn native_title(presenter: &FramePresenter, ctx: &FrameContext<'_>) -> Line<'static>
{
    let frame = presenter.frame();
    let mut spans = Vec::new();

    push_lead_hint(&mut spans, presenter, ctx);

    let package = frame
        .package
        .as_deref()
        .map_or_else(|| "<unknown>".to_string(), trim_package);
    let package_style = if frame.should_link_to_image() {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    };
    spans.push(Span::styled(package, package_style));
    spans.push(package_status_marker(presenter.package_status(ctx)));

    if frame.instruction_addr.is_some() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format_address(frame, ctx),
            Style::default().fg(Color::Green),
        ));
        if frame.is_inline_frame(ctx.prev_frame, ctx.trace_platform) {
            spans.push(Span::styled(" (inline)", dim()));
        }
        if frame.is_found_by_stack_scanning() {
            // Scanned frames carry a caution marker: the address is a guess
            spans.push(Span::styled(" ?", label()));
        }
    }

    spans.push(Span::raw("  "));
    let function = display_function(
        frame.function.as_deref(),
        frame.raw_function.as_deref(),
        ctx.show_complete_function_name,
    )
    .unwrap_or_else(|| "<unknown>".to_string());
    spans.push(Span::styled(function, Style::default().add_modifier(Modifier::BOLD)));

    if let Some(filename) = &frame.filename {
        let position = match frame.lineno {
            Some(lineno) => format!(" ({filename}:{lineno})"),
            None => format!(" ({filename})"),
        };
        spans.push(Span::styled(position, dim()));
    }

    push_expander(&mut spans, presenter, ctx);

    Line::from(spans)
}

/// Title row for everything that is not a native-family platform.
pub fn generic_title(presenter: &FramePresenter, ctx: &FrameContext<'_>) -> Line<'static>
{
    let frame = presenter.frame();
    let mut spans = Vec::new();

    push_lead_hint(&mut spans, presenter, ctx);

    let title = frame
        .function
        .as_deref()
        .or(frame.filename.as_deref())
        .or(frame.module.as_deref())
        .unwrap_or("<unknown>");
    spans.push(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    if let Some(filename) = &frame.filename {
        if frame.function.is_some() {
            let position = match frame.lineno {
                Some(lineno) => format!("  {filename}:{lineno}"),
                None => format!("  {filename}"),
            };
            spans.push(Span::styled(position, dim()));
        }
    }

    if presenter.times_repeated() > 0 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("↻ {}", presenter.times_repeated()),
            Style::default().fg(Color::Magenta),
        ));
    }

    push_expander(&mut spans, presenter, ctx);

    Line::from(spans)
}

/// Expanded body: source context, local variables, registers, assembly
/// note; falls back to the empty-source notation when nothing else applies.
pub fn context_body(presenter: &FramePresenter, ctx: &FrameContext<'_>) -> Vec<Line<'static>>
{
    let frame = presenter.frame();
    let resolved = presenter.resolved_platform(ctx);
    let mut lines = Vec::new();

    for context_line in &frame.context {
        let current = frame.lineno.is_some_and(|lineno| i64::from(lineno) == context_line.lineno());
        let style = if current {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            dim()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("    {:>6}  ", context_line.lineno()), dim()),
            Span::styled(context_line.text().to_string(), style),
        ]));
    }

    if frame.has_context_vars() {
        lines.push(Line::from(Span::styled("    Variables", label())));
        for (name, value) in &frame.vars {
            lines.push(Line::from(vec![
                Span::styled(format!("      {name} = "), dim()),
                Span::raw(value.to_string()),
            ]));
        }
    }

    if !ctx.registers.is_empty() {
        lines.push(Line::from(Span::styled("    Registers", label())));
        for (name, value) in ctx.registers {
            lines.push(Line::from(vec![
                Span::styled(format!("      {name:<8}"), dim()),
                Span::raw(value.clone()),
            ]));
        }
    }

    if frame.has_assembly(&resolved) {
        if let Some(package) = &frame.package {
            lines.push(Line::from(vec![
                Span::styled("    Assembly  ", label()),
                Span::styled(package.clone(), dim()),
            ]));
        }
    }

    if lines.is_empty() && ctx.empty_source_notation {
        lines.push(Line::from(Span::styled(format!("    {EMPTY_SOURCE_NOTATION}"), dim())));
    }

    lines
}

/// Instruction address in the display format the context asks for:
/// the exact wire string when absolute, an offset from the image base when
/// relative and the geometry is known.
pub fn format_address(frame: &Frame, ctx: &FrameContext<'_>) -> String
{
    let Some(addr) = frame.instruction_addr.as_deref() else {
        return String::new();
    };

    if !ctx.show_absolute_address {
        let base = ctx
            .image
            .and_then(|image| image.image_addr.as_deref())
            .and_then(parse_address);
        if let (Some(base), Some(absolute)) = (base, parse_address(addr)) {
            if absolute >= base {
                return format!("+0x{:x}", absolute - base);
            }
        }
    }

    addr.to_string()
}

fn push_lead_hint(spans: &mut Vec<Span<'static>>, presenter: &FramePresenter, ctx: &FrameContext<'_>)
{
    if presenter.shows_lead_hint(ctx) {
        spans.push(Span::styled(LEAD_HINT, label()));
    }
}

fn push_expander(spans: &mut Vec<Span<'static>>, presenter: &FramePresenter, ctx: &FrameContext<'_>)
{
    // The affordance only exists on expandable rows; toggling anything else
    // is unreachable through the interaction surface
    if presenter.is_expandable(ctx) {
        let marker = if presenter.is_expanded() { " [-]" } else { " [+]" };
        spans.push(Span::styled(marker, Style::default().fg(Color::Cyan)));
    }
}

fn package_status_marker(status: PackageStatus) -> Span<'static>
{
    match status {
        PackageStatus::Empty => Span::raw("  "),
        PackageStatus::Success => Span::styled(" ●", Style::default().fg(Color::Green)),
        PackageStatus::Error => Span::styled(" ✗", Style::default().fg(Color::Red)),
    }
}
