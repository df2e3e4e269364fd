//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, RangeArgs, TodayArg};
pub use output::{format_analytics, format_consistency, format_missed_days, format_streak};
