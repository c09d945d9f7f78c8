//! Tests for frame predicates and expandability

use std::collections::BTreeMap;

use serde_json::json;
use tracelens_core::layout::is_expandable;
use tracelens_core::types::{ContextLine, Frame, FrameTrust, Platform, Registers, SymbolicatorStatus};

fn frame_at(addr: &str) -> Frame
{
    Frame {
        instruction_addr: Some(addr.to_string()),
        ..Frame::default()
    }
}

#[test]
fn test_inline_frame_requires_prev_frame()
{
    let frame = frame_at("0x1000");
    assert!(!frame.is_inline_frame(None, &Platform::Native));
}

#[test]
fn test_inline_frame_same_platform_same_address()
{
    let frame = frame_at("0x1000");
    let prev = frame_at("0x1000");
    assert!(frame.is_inline_frame(Some(&prev), &Platform::Native));
}

#[test]
fn test_inline_frame_address_mismatch()
{
    let frame = frame_at("0x1000");
    // Differs by a single character
    let prev = frame_at("0x1001");
    assert!(!frame.is_inline_frame(Some(&prev), &Platform::Native));
}

#[test]
fn test_inline_frame_no_address_normalization()
{
    // Same numeric address, different spelling: not inline
    let frame = frame_at("0x1000");
    let prev = frame_at("0x01000");
    assert!(!frame.is_inline_frame(Some(&prev), &Platform::Native));
}

#[test]
fn test_inline_frame_platform_mismatch()
{
    let frame = frame_at("0x1000");
    let mut prev = frame_at("0x1000");
    prev.platform = Some(Platform::Cocoa);
    assert!(!frame.is_inline_frame(Some(&prev), &Platform::Native));
}

#[test]
fn test_inline_frame_prev_falls_back_to_trace_platform()
{
    // Frame says cocoa explicitly, prev inherits cocoa from the trace
    let mut frame = frame_at("0x1000");
    frame.platform = Some(Platform::Cocoa);
    let prev = frame_at("0x1000");
    assert!(frame.is_inline_frame(Some(&prev), &Platform::Cocoa));
}

#[test]
fn test_leads_to_app_truth_table()
{
    let system = Frame::default();
    let app = Frame {
        in_app: true,
        ..Frame::default()
    };

    assert!(system.leads_to_app(Some(&app)));
    assert!(!system.leads_to_app(Some(&system.clone())));
    assert!(!system.leads_to_app(None));
    assert!(!app.leads_to_app(Some(&app.clone())));
    assert!(!app.leads_to_app(Some(&system)));
}

#[test]
fn test_found_by_stack_scanning()
{
    let mut frame = Frame::default();
    assert!(!frame.is_found_by_stack_scanning());

    frame.trust = Some(FrameTrust::Cfi);
    assert!(!frame.is_found_by_stack_scanning());

    frame.trust = Some(FrameTrust::Scan);
    assert!(frame.is_found_by_stack_scanning());

    frame.trust = Some(FrameTrust::CfiScan);
    assert!(frame.is_found_by_stack_scanning());
}

#[test]
fn test_should_link_to_image()
{
    let mut frame = Frame::default();
    assert!(!frame.should_link_to_image());

    frame.symbolicator_status = Some(SymbolicatorStatus::UnknownImage);
    assert!(!frame.should_link_to_image());

    frame.symbolicator_status = Some(SymbolicatorStatus::Symbolicated);
    assert!(frame.should_link_to_image());

    frame.symbolicator_status = Some(SymbolicatorStatus::MissingSymbol);
    assert!(frame.should_link_to_image());
}

#[test]
fn test_only_frame_suppresses_empty_notation_path()
{
    // Scenario: sole frame, everything empty, notation permitted
    let frame = Frame::default();
    let registers = Registers::new();
    assert!(!is_expandable(&frame, &registers, &Platform::Python, true, true));
}

#[test]
fn test_empty_notation_path_needs_permission()
{
    let frame = Frame::default();
    let registers = Registers::new();
    assert!(!is_expandable(&frame, &registers, &Platform::Python, false, false));
    assert!(is_expandable(&frame, &registers, &Platform::Python, false, true));
}

#[test]
fn test_expandable_with_context_source()
{
    let frame = Frame {
        context: vec![ContextLine(41, Some("let x = 1;".to_string()))],
        ..Frame::default()
    };
    assert!(is_expandable(&frame, &Registers::new(), &Platform::Python, true, false));
}

#[test]
fn test_expandable_with_vars()
{
    let mut vars = BTreeMap::new();
    vars.insert("request".to_string(), json!({"method": "GET"}));
    let frame = Frame {
        vars,
        ..Frame::default()
    };
    assert!(is_expandable(&frame, &Registers::new(), &Platform::Python, true, false));
}

#[test]
fn test_expandable_with_registers()
{
    let frame = Frame::default();
    let mut registers = Registers::new();
    registers.insert("rip".to_string(), "0x7fff5bf34520".to_string());
    assert!(is_expandable(&frame, &registers, &Platform::Native, true, false));
}

#[test]
fn test_expandable_with_assembly()
{
    let frame = Frame {
        package: Some("App.Core.dll".to_string()),
        ..Frame::default()
    };
    // Assembly view exists only on the assembly-capable platform
    assert!(is_expandable(&frame, &Registers::new(), &Platform::CSharp, true, false));
    assert!(!is_expandable(&frame, &Registers::new(), &Platform::Native, true, false));
}

#[test]
fn test_frame_deserializes_from_wire_shape()
{
    let frame: Frame = serde_json::from_value(json!({
        "function": "main",
        "platform": "",
        "instruction_addr": "0x104a2c000",
        "in_app": false,
        "trust": "cfi-scan",
        "symbolicator_status": "unknown_image",
        "context": [[11, "fn main() {"], [12, null]],
        "vars": {"argc": 1}
    }))
    .unwrap();

    // Empty platform string parses to absent
    assert_eq!(frame.platform, None);
    assert_eq!(frame.trust, Some(FrameTrust::CfiScan));
    assert_eq!(frame.symbolicator_status, Some(SymbolicatorStatus::UnknownImage));
    assert_eq!(frame.context.len(), 2);
    assert_eq!(frame.context[0].lineno(), 11);
    assert_eq!(frame.context[1].text(), "");
    assert!(frame.has_context_vars());
}
