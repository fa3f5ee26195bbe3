//! Collision-free destination names
//!
//! A destination is `<dir>/<timestamp>.<ext>`. When that name is taken,
//! the seconds field is bumped by one and re-padded to two digits until
//! a free name turns up. Seconds do not roll over into minutes, so a
//! long run of collisions yields names like `... 14-22-75.jpg`; the
//! name only has to be unique.

use crate::error::{Error, Result};
use crate::time::CaptureTimestamp;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Find the first destination path under `directory` that is not taken
pub fn resolve_path(
    directory: &Path,
    timestamp: &CaptureTimestamp,
    extension: &str,
) -> Result<PathBuf> {
    let (prefix, seconds) = timestamp.split_seconds();

    let mut candidate = directory.join(file_name(prefix, seconds, extension));
    if !is_taken(&candidate) {
        return Ok(candidate);
    }

    let mut n: u64 = seconds.parse().map_err(|_| Error::MalformedTimestamp {
        value: timestamp.to_string(),
    })?;

    while is_taken(&candidate) {
        debug!(?candidate, "Destination taken, bumping seconds");
        n += 1;
        candidate = directory.join(file_name(prefix, &format!("{n:02}"), extension));
    }

    Ok(candidate)
}

fn file_name(prefix: &str, seconds: &str, extension: &str) -> String {
    if prefix.is_empty() {
        format!("{seconds}.{extension}")
    } else {
        format!("{prefix}-{seconds}.{extension}")
    }
}

/// Anything at the path counts, including a dangling symlink
fn is_taken(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
