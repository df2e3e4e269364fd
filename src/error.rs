//! Error types for moodlog

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for moodlog application
#[derive(Debug, Error)]
pub enum MoodlogError {
    #[error("Not a moodlog directory: {0}")]
    NotJournalDirectory(PathBuf),

    #[error("Invalid time reference: {0}")]
    InvalidTimeReference(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Note error in {path}: {message}")]
    Note { path: PathBuf, message: String },

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MoodlogError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MoodlogError::NotJournalDirectory(_) => 2,
            MoodlogError::InvalidTimeReference(_) => 3,
            MoodlogError::InvalidDateRange { .. } => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MoodlogError::NotJournalDirectory(path) => {
                format!(
                    "Not a moodlog directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'moodlog init' in this directory to create a new journal\n\
                    • Navigate to an existing moodlog directory\n\
                    • Set MOODLOG_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            MoodlogError::InvalidTimeReference(ref_str) => {
                format!(
                    "Invalid time reference: '{}'\n\n\
                    Valid time references:\n\
                    • today, yesterday\n\
                    • monday, tuesday, ..., sunday (most recent)\n\
                    • last monday, last friday, etc.\n\
                    • 3 days ago, 1 day ago\n\
                    • Specific dates: YYYY-MM-DD or DD-MM-YYYY\n\n\
                    Examples:\n\
                    moodlog stats --from '30 days ago'\n\
                    moodlog missed --from 2025-01-01 --to 2025-01-31",
                    ref_str
                )
            }
            MoodlogError::InvalidDateRange { start, end } => {
                format!(
                    "Invalid date range: {} is after {}\n\n\
                    Suggestions:\n\
                    • Swap the --from and --to values\n\
                    • Omit --to to end the range today",
                    start, end
                )
            }
            MoodlogError::Config(msg) => {
                if msg.contains("default mood") {
                    format!(
                        "{}\n\n\
                        The default mood must be one of the [[moods]] entries\n\
                        in .moodlog/config.toml",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MoodlogError
pub type Result<T> = std::result::Result<T, MoodlogError>;
