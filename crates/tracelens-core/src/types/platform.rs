//! Platform identification for frames and traces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Platform associated with a frame or an enclosing stack trace.
///
/// Only a handful of platforms change how a frame is presented: the native
/// family (`native`, `cocoa`, `objc`) selects the low-level row layout, and
/// `csharp` is the one platform with an inline-assembly view. Every other
/// platform name flows through unchanged via [`Platform::Other`] so a mixed
/// trace never loses information.
///
/// ## Example
///
/// ```rust
/// use tracelens_core::types::Platform;
///
/// let cocoa = Platform::from_name("cocoa");
/// assert!(cocoa.is_native());
///
/// // Frames may override the ambient trace platform.
/// let resolved = Platform::resolve(None, &Platform::Native);
/// assert_eq!(resolved, Platform::Native);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform
{
    /// Unmanaged native code (C/C++/Rust frames).
    Native,
    /// Apple Cocoa runtime.
    Cocoa,
    /// Objective-C.
    ObjC,
    /// .NET / C#; the one platform with an inline-assembly view.
    CSharp,
    /// Python.
    Python,
    /// Java / JVM.
    Java,
    /// Browser JavaScript.
    JavaScript,
    /// Node.js.
    Node,
    /// Ruby.
    Ruby,
    /// PHP.
    Php,
    /// Go.
    Go,
    /// Any platform the viewer has no special handling for.
    Other(String),
}

impl Platform
{
    /// Parse a wire platform name. Total: unrecognized names land in
    /// [`Platform::Other`].
    pub fn from_name(name: &str) -> Self
    {
        match name {
            "native" => Platform::Native,
            "cocoa" => Platform::Cocoa,
            "objc" => Platform::ObjC,
            "csharp" => Platform::CSharp,
            "python" => Platform::Python,
            "java" => Platform::Java,
            "javascript" => Platform::JavaScript,
            "node" => Platform::Node,
            "ruby" => Platform::Ruby,
            "php" => Platform::Php,
            "go" => Platform::Go,
            other => Platform::Other(other.to_string()),
        }
    }

    /// Parse an optional wire platform name.
    ///
    /// The empty string counts as absent: a frame carrying `platform: ""`
    /// must fall back to the trace platform rather than resolve to a bogus
    /// empty platform.
    pub fn parse(name: &str) -> Option<Self>
    {
        if name.is_empty() {
            None
        } else {
            Some(Self::from_name(name))
        }
    }

    /// Resolve the effective platform for a frame.
    ///
    /// The frame's own platform wins when present; otherwise the ambient
    /// platform of the enclosing trace applies. Individual frames in a
    /// mixed-language trace (a native frame inside a managed-runtime trace,
    /// say) override the ambient platform this way.
    pub fn resolve(frame_platform: Option<&Platform>, trace_platform: &Platform) -> Platform
    {
        frame_platform.unwrap_or(trace_platform).clone()
    }

    /// Wire name of the platform.
    pub fn name(&self) -> &str
    {
        match self {
            Platform::Native => "native",
            Platform::Cocoa => "cocoa",
            Platform::ObjC => "objc",
            Platform::CSharp => "csharp",
            Platform::Python => "python",
            Platform::Java => "java",
            Platform::JavaScript => "javascript",
            Platform::Node => "node",
            Platform::Ruby => "ruby",
            Platform::Php => "php",
            Platform::Go => "go",
            Platform::Other(name) => name,
        }
    }

    /// Platforms rendered with the low-level native row layout.
    pub fn is_native(&self) -> bool
    {
        matches!(self, Platform::Native | Platform::Cocoa | Platform::ObjC)
    }

    /// The single platform whose frames can expand an inline-assembly view.
    pub fn supports_assembly(&self) -> bool
    {
        matches!(self, Platform::CSharp)
    }
}

impl FromStr for Platform
{
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for Platform
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.name())
    }
}

impl<'de> Deserialize<'de> for Platform
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Platform::from_name(&name))
    }
}

/// Deserialize an optional platform field, treating the empty string as
/// absent (see [`Platform::parse`]).
pub(crate) fn de_optional<'de, D>(deserializer: D) -> Result<Option<Platform>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Platform::parse))
}
