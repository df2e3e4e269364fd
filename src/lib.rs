//! moodlog - journal streaks and analytics
//!
//! Reads a directory of daily markdown notes and reports writing streaks,
//! missed days, consistency, mood distribution, tag usage and word-count
//! trends.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::MoodlogError;
