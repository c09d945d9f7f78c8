//! Tests for trace loading, image matching, and repeat collapsing

use std::io::Write;

use tracelens_core::error::TraceError;
use tracelens_core::symbol::{display_function, trim_package};
use tracelens_core::trace::{collapse_repeats, Trace};
use tracelens_core::types::{Frame, Platform};

fn write_temp(contents: &str) -> std::path::PathBuf
{
    let mut path = std::env::temp_dir();
    path.push(format!(
        "tracelens-test-{}-{}.json",
        std::process::id(),
        contents.len()
    ));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_load_minimal_trace()
{
    let path = write_temp(
        r#"{
            "platform": "cocoa",
            "frames": [
                {"function": "main", "in_app": true}
            ]
        }"#,
    );
    let trace = Trace::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(trace.platform, Platform::Cocoa);
    assert!(trace.is_only_frame());
    assert!(trace.registers.is_empty());
    assert!(trace.images.is_empty());
}

#[test]
fn test_load_rejects_empty_frame_list()
{
    let path = write_temp(r#"{"platform": "python", "frames": []}"#);
    let err = Trace::from_json_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, TraceError::InvalidTrace(_)));
}

#[test]
fn test_load_rejects_malformed_payload()
{
    let path = write_temp("{not json");
    let err = Trace::from_json_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, TraceError::Parse(_)));
}

#[test]
fn test_image_for_frame()
{
    let path = write_temp(
        r#"{
            "platform": "native",
            "frames": [
                {"instruction_addr": "0x1500", "in_app": false},
                {"in_app": true}
            ],
            "images": [
                {"image_addr": "0x1000", "image_size": 4096, "debug_status": "found"},
                {"image_addr": "0x9000", "image_size": 4096}
            ]
        }"#,
    );
    let trace = Trace::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let matched = trace.image_for_frame(&trace.frames[0]);
    assert_eq!(matched.unwrap().image_addr.as_deref(), Some("0x1000"));

    // A frame without an address matches no image
    assert!(trace.image_for_frame(&trace.frames[1]).is_none());
}

fn named_frame(function: &str, addr: &str) -> Frame
{
    Frame {
        function: Some(function.to_string()),
        instruction_addr: Some(addr.to_string()),
        ..Frame::default()
    }
}

#[test]
fn test_collapse_repeats_counts_hidden_frames()
{
    let frames = vec![
        named_frame("recurse", "0x10"),
        named_frame("recurse", "0x10"),
        named_frame("recurse", "0x10"),
        named_frame("recurse", "0x10"),
        named_frame("main", "0x20"),
    ];

    let collapsed = collapse_repeats(frames);
    assert_eq!(collapsed.len(), 2);
    assert_eq!(collapsed[0].1, 3);
    assert_eq!(collapsed[1].1, 0);
}

#[test]
fn test_collapse_repeats_is_consecutive_only()
{
    let frames = vec![
        named_frame("a", "0x10"),
        named_frame("b", "0x20"),
        named_frame("a", "0x10"),
    ];

    let collapsed = collapse_repeats(frames);
    assert_eq!(collapsed.len(), 3);
    assert!(collapsed.iter().all(|(_, n)| *n == 0));
}

#[test]
fn test_trim_package_unix_paths()
{
    assert_eq!(trim_package("/usr/lib/libfoo.dylib"), "libfoo");
    assert_eq!(trim_package("/usr/lib/libbar.so"), "libbar");
    assert_eq!(trim_package("/opt/app/"), "app");
    assert_eq!(trim_package("plain"), "plain");
}

#[test]
fn test_trim_package_windows_paths()
{
    assert_eq!(trim_package("C:\\Windows\\System32\\ntdll.dll"), "ntdll");
    assert_eq!(trim_package("\\\\share\\bin\\app.exe"), "app");
}

#[test]
fn test_display_function_prefers_trimmed_name()
{
    let name = display_function(Some("poll"), Some("_ZN4core4poll17h1f2e3d4c5b6a7f8eE"), false);
    assert_eq!(name.as_deref(), Some("poll"));
}

#[test]
fn test_display_function_demangles_raw_fallback()
{
    let name = display_function(None, Some("_ZN4core4poll17h1f2e3d4c5b6a7f8eE"), false);
    // Alternate form drops the trailing hash
    assert_eq!(name.as_deref(), Some("core::poll"));
}

#[test]
fn test_display_function_complete_keeps_hash()
{
    let name = display_function(Some("poll"), Some("_ZN4core4poll17h1f2e3d4c5b6a7f8eE"), true);
    assert_eq!(name.as_deref(), Some("core::poll::h1f2e3d4c5b6a7f8e"));
}

#[test]
fn test_display_function_nothing_known()
{
    assert_eq!(display_function(None, None, false), None);
    assert_eq!(display_function(None, None, true), None);
}
