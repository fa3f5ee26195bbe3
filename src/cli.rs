//! CLI argument parsing with clap

use crate::config::{Config, ConfigError};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Year Sorter - file photos and videos into year folders
///
/// Moves every photo and video directly inside PATH into a PATH/YYYY
/// folder and renames it to its capture time, `YYYY-MM-DD HH-MM-SS.ext`.
/// The capture time comes from EXIF data when an image has it, and from
/// the file's modification time otherwise.
#[derive(Parser, Debug)]
#[command(name = "year-sorter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory whose media files should be organized
    pub path: PathBuf,

    /// Path to configuration file (TOML format)
    ///
    /// Overrides the image and video extension lists.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the log file as JSON
    #[arg(long, requires = "log_file")]
    pub json_log: bool,
}

impl Cli {
    /// Load the config file if one was given, defaults otherwise
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        match self.config {
            Some(ref path) => Config::load_from_file(path),
            None => Ok(Config::default()),
        }
    }
}
