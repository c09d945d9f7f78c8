//! Stack-trace frame descriptor and neighbor-relation predicates.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::platform::{self, Platform};

/// Unwinding confidence for how a frame's address was determined.
///
/// Frames recovered by scanning the stack for plausible return addresses are
/// far less reliable than frames restored from call-frame information, so
/// the address display carries a caution marker for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameTrust
{
    /// Frame taken directly from the crash context (the crashing frame).
    Context,
    /// Frame produced by a pre-walked stack delivered with the event.
    Prewalked,
    /// Restored from call-frame information. Precise.
    Cfi,
    /// Restored by following frame pointers.
    Fp,
    /// Found by heuristic stack scanning.
    Scan,
    /// Found by stack scanning seeded from a CFI-restored frame.
    #[serde(rename = "cfi-scan")]
    CfiScan,
    /// Unwinder did not report how the frame was found.
    Unknown,
}

impl FrameTrust
{
    /// Returns `true` when the frame came out of heuristic stack scanning.
    pub const fn is_scanned(self) -> bool
    {
        matches!(self, FrameTrust::Scan | FrameTrust::CfiScan)
    }
}

/// Per-frame outcome reported by the upstream symbolicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolicatorStatus
{
    /// Address fully resolved to a symbol.
    Symbolicated,
    /// The image was found but carried no symbol for the address.
    MissingSymbol,
    /// No loaded image covers the instruction address.
    UnknownImage,
    /// Debug files for the image could not be found.
    Missing,
    /// Debug files were found but could not be parsed.
    Malformed,
}

/// One line of source context, as the `[lineno, text]` wire tuple.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContextLine(pub i64, pub Option<String>);

impl ContextLine
{
    /// Line number within the source file.
    pub fn lineno(&self) -> i64
    {
        self.0
    }

    /// Source text; upstream may deliver `null` for unreadable lines.
    pub fn text(&self) -> &str
    {
        self.1.as_deref().unwrap_or("")
    }
}

/// One entry of a stack trace, as produced by upstream parsing and
/// symbolication.
///
/// Immutable input: the viewer classifies and renders frames but never
/// writes them. All fields are optional on the wire except `in_app`; absent
/// fields fall back to defined behavior in the predicates below rather than
/// failing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Frame
{
    /// Trimmed function name, if symbolication produced one.
    pub function: Option<String>,
    /// Raw (possibly mangled) function name from the object file.
    pub raw_function: Option<String>,
    /// Module / namespace the function lives in.
    pub module: Option<String>,
    /// Source file name.
    pub filename: Option<String>,
    /// Absolute path of the source file.
    pub abs_path: Option<String>,
    /// Path of the binary (shared object, dylib, assembly) the frame ran in.
    pub package: Option<String>,
    /// Source line.
    pub lineno: Option<u32>,
    /// Source column.
    pub colno: Option<u32>,
    /// Frame-level platform override; empty wire strings parse to `None`.
    #[serde(deserialize_with = "platform::de_optional")]
    pub platform: Option<Platform>,
    /// Instruction address as an exact string. Never normalized; relation
    /// predicates compare it character for character.
    pub instruction_addr: Option<String>,
    /// Outcome reported by the symbolicator for this frame.
    pub symbolicator_status: Option<SymbolicatorStatus>,
    /// Whether the frame belongs to application code (vs. framework/library).
    pub in_app: bool,
    /// Unwinding confidence.
    pub trust: Option<FrameTrust>,
    /// Source context lines around the frame's own line.
    pub context: Vec<ContextLine>,
    /// Local variables captured at this frame.
    pub vars: BTreeMap<String, Value>,
    /// Upstream diagnostics (failed symbolication and the like). Surfaced as
    /// a passive tag only; never blocks expansion or layout selection.
    pub errors: Option<Vec<Value>>,
}

impl Frame
{
    /// Effective platform: the frame's own platform, falling back to the
    /// platform of the enclosing trace.
    pub fn resolved_platform(&self, trace_platform: &Platform) -> Platform
    {
        Platform::resolve(self.platform.as_ref(), trace_platform)
    }

    /// Whether any source context lines are available.
    pub fn has_context_source(&self) -> bool
    {
        !self.context.is_empty()
    }

    /// Whether any local variables were captured.
    pub fn has_context_vars(&self) -> bool
    {
        !self.vars.is_empty()
    }

    /// Whether an inline-assembly view is available: the resolved platform
    /// must be the assembly-capable one and the frame must name its package.
    pub fn has_assembly(&self, resolved_platform: &Platform) -> bool
    {
        resolved_platform.supports_assembly() && self.package.is_some()
    }

    /// Detect a compiler-inlined frame.
    ///
    /// An inline frame shares its instruction address with the caller frame
    /// that precedes it; rendering it with the full "distinct frame"
    /// affordances would be misleading. Requires the previous frame to exist,
    /// both frames to resolve to the same platform, and the address strings
    /// to match exactly.
    pub fn is_inline_frame(&self, prev_frame: Option<&Frame>, trace_platform: &Platform) -> bool
    {
        let Some(prev) = prev_frame else {
            return false;
        };

        self.resolved_platform(trace_platform) == prev.resolved_platform(trace_platform)
            && self.instruction_addr == prev.instruction_addr
    }

    /// Detect the transition point where the trace crosses from
    /// framework/library code into application code.
    ///
    /// True exactly when this frame is not in-app and the next (deeper) frame
    /// is. Drives the "Called from:" hint on collapsed rows.
    pub fn leads_to_app(&self, next_frame: Option<&Frame>) -> bool
    {
        !self.in_app && next_frame.is_some_and(|next| next.in_app)
    }

    /// Whether heuristic stack scanning produced this frame's address.
    pub fn is_found_by_stack_scanning(&self) -> bool
    {
        self.trust.is_some_and(FrameTrust::is_scanned)
    }

    /// Whether the package link should fire the focus-image interaction.
    ///
    /// Pointless when the symbolicator never matched the address to a loaded
    /// image, or reported nothing at all.
    pub fn should_link_to_image(&self) -> bool
    {
        self.symbolicator_status
            .is_some_and(|status| status != SymbolicatorStatus::UnknownImage)
    }
}
