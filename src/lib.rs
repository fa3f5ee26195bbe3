//! Year Sorter - file photos and videos into year folders
//!
//! This library moves the media files found directly inside a directory
//! into `YYYY` subfolders, renaming each one to its capture time:
//! - EXIF capture date for images, when present
//! - File system modification time otherwise
//! - Collision-free names by bumping the seconds field

pub mod cli;
pub mod collision;
pub mod config;
pub mod error;
pub mod process;
pub mod time;

pub use cli::Cli;
pub use collision::resolve_path;
pub use config::{Config, ConfigError, MediaKind};
pub use error::{Error, Result};
pub use process::{MovedFile, OrganizeReport, Organizer};
pub use time::exif::{CaptureTagDecoder, DecoderSet, ExifContainerDecoder};
pub use time::{CaptureTimestamp, ResolvedTime, TimeSource, resolve_date};
