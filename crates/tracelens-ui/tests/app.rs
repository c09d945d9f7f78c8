//! Tests for application state and the trace event flow

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracelens_core::types::{BinaryImage, ContextLine, Frame, Platform, Registers, SymbolicatorStatus};
use tracelens_core::Trace;
use tracelens_ui::app::Pane;
use tracelens_ui::App;

fn key(code: KeyCode) -> KeyEvent
{
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn trace_with(frames: Vec<Frame>, images: Vec<BinaryImage>) -> Trace
{
    Trace {
        platform: Platform::Native,
        frames,
        registers: Registers::new(),
        images,
    }
}

fn recursive_frame() -> Frame
{
    Frame {
        function: Some("recurse".to_string()),
        instruction_addr: Some("0x1010".to_string()),
        ..Frame::default()
    }
}

#[test]
fn test_app_collapses_repeated_frames()
{
    let frames = vec![
        recursive_frame(),
        recursive_frame(),
        recursive_frame(),
        Frame {
            function: Some("main".to_string()),
            ..Frame::default()
        },
    ];
    let app = App::new(trace_with(frames, Vec::new()));

    assert_eq!(app.presenters.len(), 2);
    assert_eq!(app.presenters[0].times_repeated(), 2);
    assert_eq!(app.presenters[1].times_repeated(), 0);
}

#[test]
fn test_enter_expands_only_expandable_rows()
{
    let frames = vec![
        Frame {
            function: Some("with_source".to_string()),
            context: vec![ContextLine(1, Some("fn main() {".to_string()))],
            ..Frame::default()
        },
        Frame {
            function: Some("bare".to_string()),
            ..Frame::default()
        },
    ];
    let mut app = App::new(trace_with(frames, Vec::new()));
    app.empty_source_notation = false;

    app.handle_key_event(key(KeyCode::Enter));
    assert!(app.presenters[0].is_expanded());

    // The second frame has nothing to expand
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Enter));
    assert!(!app.presenters[1].is_expanded());
}

#[test]
fn test_address_toggle_round_trips_through_the_channel()
{
    let mut app = App::new(trace_with(vec![Frame::default()], Vec::new()));
    assert!(!app.show_absolute_addresses);

    app.handle_key_event(key(KeyCode::Char('a')));
    assert!(app.show_absolute_addresses);

    app.handle_key_event(key(KeyCode::Char('a')));
    assert!(!app.show_absolute_addresses);
}

#[test]
fn test_function_name_toggle_round_trips_through_the_channel()
{
    let mut app = App::new(trace_with(vec![Frame::default()], Vec::new()));

    app.handle_key_event(key(KeyCode::Char('f')));
    assert!(app.show_complete_function_names);
}

#[test]
fn test_focus_image_filters_and_moves_focus()
{
    let frame = Frame {
        instruction_addr: Some("0x1010".to_string()),
        symbolicator_status: Some(SymbolicatorStatus::Symbolicated),
        ..Frame::default()
    };
    let matching = BinaryImage {
        code_file: Some("/usr/lib/libfoo.so".to_string()),
        image_addr: Some("0x1000".to_string()),
        image_size: Some(0x1000),
        ..BinaryImage::default()
    };
    let other = BinaryImage {
        code_file: Some("/usr/lib/libbar.so".to_string()),
        image_addr: Some("0x9000".to_string()),
        image_size: Some(0x1000),
        ..BinaryImage::default()
    };
    let mut app = App::new(trace_with(vec![frame], vec![other, matching]));

    app.handle_key_event(key(KeyCode::Char('i')));

    assert_eq!(app.image_filter.as_deref(), Some("0x1010"));
    assert_eq!(app.focused_pane, Pane::Images);
    assert_eq!(app.images_state.selected(), Some(0));
    // Only the covering image survives the filter; index 1 is its original
    // position
    let filtered = app.filtered_images();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].0, 1);
    // The interaction never expands the frame
    assert!(!app.presenters[0].is_expanded());
}

#[test]
fn test_focus_image_unavailable_sets_status()
{
    // No symbolicator status, so the frame cannot link to an image
    let mut app = App::new(trace_with(vec![Frame::default()], Vec::new()));

    app.handle_key_event(key(KeyCode::Char('i')));

    assert!(app.status_message.is_some());
    assert_eq!(app.focused_pane, Pane::Trace);
    assert_eq!(app.image_filter, None);
}

#[test]
fn test_clear_filter()
{
    let frame = Frame {
        instruction_addr: Some("0x1010".to_string()),
        symbolicator_status: Some(SymbolicatorStatus::Symbolicated),
        ..Frame::default()
    };
    let image = BinaryImage {
        image_addr: Some("0x1000".to_string()),
        image_size: Some(0x1000),
        ..BinaryImage::default()
    };
    let mut app = App::new(trace_with(vec![frame], vec![image]));

    app.handle_key_event(key(KeyCode::Char('i')));
    assert!(app.image_filter.is_some());

    app.handle_key_event(key(KeyCode::Char('c')));
    assert_eq!(app.image_filter, None);
    assert_eq!(app.images_state.selected(), None);
}

#[test]
fn test_tab_switches_panes()
{
    let mut app = App::new(trace_with(vec![Frame::default()], Vec::new()));
    assert_eq!(app.focused_pane, Pane::Trace);

    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focused_pane, Pane::Images);

    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focused_pane, Pane::Trace);
}

#[test]
fn test_navigation_wraps()
{
    let frames = vec![
        Frame {
            function: Some("a".to_string()),
            ..Frame::default()
        },
        Frame {
            function: Some("b".to_string()),
            ..Frame::default()
        },
    ];
    let mut app = App::new(trace_with(frames, Vec::new()));

    app.handle_key_event(key(KeyCode::Up));
    assert_eq!(app.selected_frame, 1);
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected_frame, 0);
}

#[test]
fn test_registers_reach_only_the_crashing_frame()
{
    let frames = vec![
        Frame {
            function: Some("caller".to_string()),
            ..Frame::default()
        },
        Frame {
            function: Some("crashed".to_string()),
            ..Frame::default()
        },
    ];
    let mut registers = Registers::new();
    registers.insert("rip".to_string(), "0x7fff5bf34520".to_string());
    let mut app = App::new(Trace {
        platform: Platform::Native,
        frames,
        registers,
        images: Vec::new(),
    });
    app.empty_source_notation = false;

    assert!(app.frame_context(0).registers.is_empty());
    assert!(!app.frame_context(1).registers.is_empty());

    // Only the innermost frame is expandable through the register clause
    let ctx = app.frame_context(0);
    assert!(!app.presenters[0].is_expandable(&ctx));
    let ctx = app.frame_context(1);
    assert!(app.presenters[1].is_expandable(&ctx));
}

#[test]
fn test_anchor_resolves_to_the_image_pane()
{
    use tracelens_core::events::IMAGE_LIST_ANCHOR;

    assert_eq!(App::pane_for_anchor(IMAGE_LIST_ANCHOR), Some(Pane::Images));
    assert_eq!(App::pane_for_anchor("frames"), None);
}

#[test]
fn test_frameless_app_ignores_frame_keys()
{
    // Frameless traces never come out of the loader, but App construction
    // does not enforce that
    let mut app = App::new(trace_with(Vec::new(), Vec::new()));

    for code in [
        KeyCode::Enter,
        KeyCode::Char(' '),
        KeyCode::Char('i'),
        KeyCode::Char('a'),
        KeyCode::Char('f'),
        KeyCode::Up,
        KeyCode::Down,
    ] {
        assert!(!app.handle_key_event(key(code)));
    }
    assert!(!app.should_quit);
}

#[test]
fn test_quit_keys()
{
    let mut app = App::new(trace_with(vec![Frame::default()], Vec::new()));
    assert!(app.handle_key_event(key(KeyCode::Char('q'))));
    assert!(app.should_quit);

    let mut app = App::new(trace_with(vec![Frame::default()], Vec::new()));
    assert!(app.handle_key_event(key(KeyCode::Esc)));
    assert!(app.should_quit);
}
