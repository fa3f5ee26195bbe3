//! Capture time resolution
//!
//! Every media file gets a `CaptureTimestamp` of the form
//! `YYYY-MM-DD HH-MM-SS`, taken from:
//! - an embedded capture date tag (images only, see [`exif`])
//! - otherwise the file system modification time, in local time
//!
//! Tag values are normalized by replacing every `:` with `-`. Colons
//! anywhere in the value are replaced, not only the date/time
//! separators, so an unusual tag yields an unusual (but still usable)
//! name.

pub mod exif;

use crate::config::MediaKind;
use crate::error::Result;
use chrono::{DateTime, Local};
use self::exif::DecoderSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Format used for modification-time fallbacks
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

/// A file's effective date, `YYYY-MM-DD HH-MM-SS`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureTimestamp(String);

impl CaptureTimestamp {
    /// Normalize a raw tag value (`YYYY:MM:DD HH:MM:SS`)
    ///
    /// Returns `None` when the normalized value could not serve as a
    /// year folder plus file name: it must start with a four-digit year,
    /// end in a `-`-separated numeric field, and contain no path
    /// separators.
    pub fn from_tag_value(raw: &str) -> Option<Self> {
        let normalized = raw.replace(':', "-");

        let has_year = normalized.len() >= 4
            && normalized.as_bytes()[..4].iter().all(u8::is_ascii_digit);
        let has_seconds = normalized
            .rsplit_once('-')
            .is_some_and(|(_, secs)| !secs.is_empty() && secs.bytes().all(|b| b.is_ascii_digit()));
        let is_plain_name = !normalized.contains(['/', '\\', '\0']);

        (has_year && has_seconds && is_plain_name).then_some(Self(normalized))
    }

    /// Format a point in time as local wall-clock time
    pub fn from_datetime(datetime: DateTime<Local>) -> Self {
        Self(datetime.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The year folder name: the first four characters
    pub fn year(&self) -> &str {
        &self.0[..4]
    }

    /// Split into everything before the last `-` and the seconds field
    pub fn split_seconds(&self) -> (&str, &str) {
        self.0.rsplit_once('-').unwrap_or(("", &self.0))
    }
}

impl fmt::Display for CaptureTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the resolved timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// Read from embedded metadata by the named decoder
    Metadata(&'static str),
    /// From file system modification time
    FileSystem,
}

/// Result of timestamp resolution
#[derive(Debug, Clone)]
pub struct ResolvedTime {
    pub timestamp: CaptureTimestamp,
    pub source: TimeSource,
}

/// Resolve the capture timestamp of a media file
///
/// Metadata failures are never surfaced; the only error is failing to
/// read the modification time for the fallback.
pub fn resolve_date(path: &Path, kind: MediaKind, decoders: &DecoderSet) -> Result<ResolvedTime> {
    if kind == MediaKind::Image {
        match decoders.try_read_capture_tag(path) {
            Some((decoder, raw)) => match CaptureTimestamp::from_tag_value(&raw) {
                Some(timestamp) => {
                    debug!(?path, decoder, %timestamp, "Resolved time from metadata");
                    return Ok(ResolvedTime {
                        timestamp,
                        source: TimeSource::Metadata(decoder),
                    });
                }
                None => warn!(?path, decoder, %raw, "Ignoring unusable date tag"),
            },
            None => debug!(?path, "No capture date tag, using modification time"),
        }
    }

    Ok(ResolvedTime {
        timestamp: modified_timestamp(path)?,
        source: TimeSource::FileSystem,
    })
}

/// Last-modified time of `path`, formatted in local time
pub fn modified_timestamp(path: &Path) -> Result<CaptureTimestamp> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(CaptureTimestamp::from_datetime(modified.into()))
}
