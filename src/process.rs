//! Year-folder organizer
//!
//! Handles the core pipeline for one directory:
//! - Listing media files directly inside it (no recursion)
//! - Resolving each file's capture timestamp
//! - Creating the `YYYY` folder on demand
//! - Moving the file to a collision-free `<timestamp>.<ext>` name

use crate::collision::resolve_path;
use crate::config::{Config, MediaKind};
use crate::error::{Error, Result};
use crate::time::exif::DecoderSet;
use crate::time::{ResolvedTime, resolve_date};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span};
use walkdir::WalkDir;

/// A file that was moved into its year folder
#[derive(Debug, Clone)]
pub struct MovedFile {
    /// Where the file was
    pub source: PathBuf,
    /// Where it is now
    pub destination: PathBuf,
    /// The timestamp it was named after
    pub time: ResolvedTime,
}

/// Outcome of one organizer pass
#[derive(Debug, Clone, Default)]
pub struct OrganizeReport {
    pub moved: Vec<MovedFile>,
}

impl OrganizeReport {
    /// Number of files moved
    pub fn count(&self) -> usize {
        self.moved.len()
    }
}

/// Files media into year folders of the directory they sit in
#[derive(Debug)]
pub struct Organizer {
    config: Config,
    decoders: DecoderSet,
}

impl Organizer {
    /// Create an organizer with the given extension sets and decoders
    pub fn new(config: Config, decoders: DecoderSet) -> Self {
        Self { config, decoders }
    }

    /// Organize `dir` and return how many files were moved
    pub fn organize(&self, dir: &Path) -> Result<usize> {
        Ok(self.run(dir)?.count())
    }

    /// Organize `dir`, reporting every move
    ///
    /// The first file system failure aborts the pass; files moved
    /// before it stay where they were moved to.
    pub fn run(&self, dir: &Path) -> Result<OrganizeReport> {
        let _span = span!(Level::INFO, "organize", ?dir).entered();

        if !dir.is_dir() {
            return Err(Error::InvalidInputPath {
                path: dir.to_path_buf(),
            });
        }

        let files = self.collect_files(dir)?;
        info!(count = files.len(), "Found media files");

        let mut report = OrganizeReport::default();
        for (source, kind) in files {
            report.moved.push(self.organize_file(dir, source, kind)?);
        }

        info!(moved = report.count(), "Organizing complete");
        Ok(report)
    }

    /// List media files directly inside `dir`, in file name order
    fn collect_files(&self, dir: &Path) -> Result<Vec<(PathBuf, MediaKind)>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();

            // Follows symlinks, so a link to a folder is skipped too
            if path.is_dir() {
                debug!(?path, "Skipping directory");
                continue;
            }

            let kind = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(|ext| self.config.media_kind(ext));

            match kind {
                Some(kind) => files.push((path.to_path_buf(), kind)),
                None => debug!(?path, "Skipping non-media file"),
            }
        }

        Ok(files)
    }

    fn organize_file(&self, dir: &Path, source: PathBuf, kind: MediaKind) -> Result<MovedFile> {
        let _file_span = span!(Level::DEBUG, "organize_file", ?source).entered();

        let time = resolve_date(&source, kind, &self.decoders)?;

        let year_dir = dir.join(time.timestamp.year());
        fs::create_dir_all(&year_dir)?;

        // Keep the extension exactly as it was spelled
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let destination = resolve_path(&year_dir, &time.timestamp, extension)?;

        move_file(&source, &destination)?;

        info!(
            source = ?source,
            destination = ?destination,
            time_source = ?time.source,
            timestamp = %time.timestamp,
            "Moved file"
        );

        Ok(MovedFile {
            source,
            destination,
            time,
        })
    }
}

impl Default for Organizer {
    fn default() -> Self {
        Self::new(Config::default(), DecoderSet::standard())
    }
}

/// Move a file, falling back to copy + delete across devices
fn move_file(source: &Path, dest: &Path) -> Result<()> {
    if let Err(e) = fs::rename(source, dest) {
        debug!(?source, ?dest, error = %e, "Rename failed, copying instead");
        fs::copy(source, dest)?;

        // Preserve modification time
        if let Ok(metadata) = fs::metadata(source)
            && let Ok(mtime) = metadata.modified()
        {
            let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
        }

        fs::remove_file(source)?;
    }

    Ok(())
}
