//! Binary image descriptors and load-status classification.

use serde::Deserialize;

/// Status reported for one aspect (debug files, unwind info) of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus
{
    /// The required files were found and used.
    Found,
    /// The image was not needed for processing the trace.
    Unused,
    /// The required files could not be found.
    Missing,
    /// The files were found but could not be parsed.
    Malformed,
    /// Downloading the files failed.
    FetchingFailed,
    /// Processing the files timed out.
    Timeout,
    /// Any other failure.
    Other,
}

impl ImageStatus
{
    /// Precedence weight used by [`ImageStatus::combine`]: absent or unused
    /// signals rank lowest, `found` in the middle, every error-class status
    /// highest.
    const fn weight(status: Option<Self>) -> u8
    {
        match status {
            None | Some(ImageStatus::Unused) => 0,
            Some(ImageStatus::Found) => 1,
            Some(_) => 2,
        }
    }

    /// Combine an image's debug and unwind status into one signal.
    ///
    /// The higher-weight side wins, so any error-class status overrides
    /// `found`, and `found` overrides `unused`. When both sides are absent
    /// the image counts as unused.
    pub fn combine(debug_status: Option<Self>, unwind_status: Option<Self>) -> Self
    {
        let combined = if Self::weight(unwind_status) > Self::weight(debug_status) {
            unwind_status
        } else {
            debug_status
        };
        combined.unwrap_or(ImageStatus::Unused)
    }
}

/// A module loaded in the crashed process, as reported by upstream
/// symbolication. At most one image backs any given frame; the caller
/// matches frames to images by instruction address.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BinaryImage
{
    /// Path of the image on the crashed system.
    pub code_file: Option<String>,
    /// Base load address, as an address string.
    pub image_addr: Option<String>,
    /// Size of the mapped image in bytes.
    pub image_size: Option<u64>,
    /// Status of the image's debug files.
    pub debug_status: Option<ImageStatus>,
    /// Status of the image's unwind information.
    pub unwind_status: Option<ImageStatus>,
}

impl BinaryImage
{
    /// Whether `addr` falls inside this image's mapped range.
    ///
    /// False when either address fails to parse or the image size is
    /// unknown; a frame without a covering image simply renders without a
    /// load-status marker.
    pub fn contains_address(&self, addr: &str) -> bool
    {
        let (Some(base), Some(size)) = (
            self.image_addr.as_deref().and_then(parse_address),
            self.image_size,
        ) else {
            return false;
        };
        let Some(addr) = parse_address(addr) else {
            return false;
        };

        addr >= base && addr - base < size
    }
}

/// Parse an address string (`0x`-prefixed hex or plain decimal).
pub fn parse_address(addr: &str) -> Option<u64>
{
    if let Some(hex) = addr.strip_prefix("0x").or_else(|| addr.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        addr.parse().ok()
    }
}

/// Three-valued load-status indicator for the image backing a frame.
///
/// Drives the marker next to the package name on native rows; it never
/// blocks rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageStatus
{
    /// No image supplied, or the image was unused.
    Empty,
    /// The image loaded fine.
    Success,
    /// Something about the image's debug or unwind data failed.
    Error,
}

impl PackageStatus
{
    /// Classify the image backing a frame for display.
    ///
    /// Malformed input degrades to [`PackageStatus::Error`] rather than
    /// failing.
    pub fn classify(image: Option<&BinaryImage>) -> Self
    {
        let Some(image) = image else {
            return PackageStatus::Empty;
        };

        match ImageStatus::combine(image.debug_status, image.unwind_status) {
            ImageStatus::Unused => PackageStatus::Empty,
            ImageStatus::Found => PackageStatus::Success,
            _ => PackageStatus::Error,
        }
    }
}
