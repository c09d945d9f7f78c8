//! Tests for platform resolution and layout selection

use tracelens_core::layout::FrameLayout;
use tracelens_core::types::Platform;

#[test]
fn test_from_name_known_platforms()
{
    assert_eq!(Platform::from_name("native"), Platform::Native);
    assert_eq!(Platform::from_name("cocoa"), Platform::Cocoa);
    assert_eq!(Platform::from_name("objc"), Platform::ObjC);
    assert_eq!(Platform::from_name("csharp"), Platform::CSharp);
    assert_eq!(Platform::from_name("python"), Platform::Python);
}

#[test]
fn test_from_name_unknown_platform()
{
    let platform = Platform::from_name("brainfuck");
    assert_eq!(platform, Platform::Other("brainfuck".to_string()));
    assert_eq!(platform.name(), "brainfuck");
}

#[test]
fn test_parse_empty_is_absent()
{
    assert_eq!(Platform::parse(""), None);
    assert_eq!(Platform::parse("ruby"), Some(Platform::Ruby));
}

#[test]
fn test_resolve_prefers_frame_platform()
{
    let resolved = Platform::resolve(Some(&Platform::Cocoa), &Platform::Python);
    assert_eq!(resolved, Platform::Cocoa);
}

#[test]
fn test_resolve_falls_back_to_trace_platform()
{
    let resolved = Platform::resolve(None, &Platform::Native);
    assert_eq!(resolved, Platform::Native);
}

#[test]
fn test_resolve_is_referentially_stable()
{
    let frame_platform = Some(Platform::ObjC);
    let first = Platform::resolve(frame_platform.as_ref(), &Platform::Java);
    let second = Platform::resolve(frame_platform.as_ref(), &Platform::Java);
    assert_eq!(first, second);
    assert_eq!(FrameLayout::select(&first), FrameLayout::select(&second));
}

#[test]
fn test_layout_native_family()
{
    assert_eq!(FrameLayout::select(&Platform::Native), FrameLayout::Native);
    assert_eq!(FrameLayout::select(&Platform::Cocoa), FrameLayout::Native);
    assert_eq!(FrameLayout::select(&Platform::ObjC), FrameLayout::Native);
}

#[test]
fn test_layout_everything_else_is_generic()
{
    assert_eq!(FrameLayout::select(&Platform::CSharp), FrameLayout::Generic);
    assert_eq!(FrameLayout::select(&Platform::Python), FrameLayout::Generic);
    assert_eq!(
        FrameLayout::select(&Platform::Other("haskell".to_string())),
        FrameLayout::Generic
    );
}

#[test]
fn test_frame_without_platform_in_native_trace_selects_native_layout()
{
    // Scenario: frame carries no platform, trace platform is native
    let resolved = Platform::resolve(None, &Platform::Native);
    assert_eq!(FrameLayout::select(&resolved), FrameLayout::Native);
}

#[test]
fn test_display_round_trips_wire_name()
{
    for name in ["native", "cocoa", "objc", "csharp", "javascript", "weird-vm"] {
        assert_eq!(Platform::from_name(name).to_string(), name);
    }
}
