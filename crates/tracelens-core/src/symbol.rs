//! Symbol and package display helpers.

use rustc_demangle::demangle;

/// Preferred function name for a frame's symbol block.
///
/// With `complete` set the fully-qualified name is shown: the raw function
/// name run through the demangler (hash suffix and all), falling back to the
/// trimmed name. Otherwise the trimmed name wins, with an alternate-form
/// demangle of the raw name as fallback when symbolication produced nothing
/// shorter.
pub fn display_function(
    function: Option<&str>,
    raw_function: Option<&str>,
    complete: bool,
) -> Option<String>
{
    if complete {
        if let Some(raw) = raw_function {
            return Some(demangle(raw).to_string());
        }
        return function.map(str::to_owned);
    }

    match function {
        Some(name) => Some(name.to_owned()),
        None => raw_function.map(|raw| format!("{:#}", demangle(raw))),
    }
}

/// Trim a package path down to the module name shown in the native package
/// column.
///
/// Splits on backslashes for Windows-style paths (`C:\...` or UNC) and on
/// slashes otherwise, takes the last non-empty component, and strips a known
/// shared-library extension.
pub fn trim_package(package: &str) -> String
{
    let bytes = package.as_bytes();
    let windows = package.starts_with("\\\\")
        || (bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\');
    let separator = if windows { '\\' } else { '/' };

    let filename = package
        .split(separator)
        .rev()
        .find(|piece| !piece.is_empty())
        .unwrap_or(package);

    for extension in [".dylib", ".so", ".a", ".dll", ".exe"] {
        if let Some(stem) = filename.strip_suffix(extension) {
            return stem.to_string();
        }
    }

    filename.to_string()
}
