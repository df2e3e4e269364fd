//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moodlog")]
#[command(about = "Journal streaks, moods and writing analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log debug details to stderr (MOODLOG_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Reference date shared by every reporting command
#[derive(Args, Debug, Clone, Default)]
pub struct TodayArg {
    /// Treat this date as today (default: the local date)
    #[arg(long, value_name = "TIME_REF")]
    pub today: Option<String>,
}

/// Optional range bounds, as time references
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Range start (e.g., 2025-01-01, '30 days ago', last monday)
    #[arg(long, value_name = "TIME_REF")]
    pub from: Option<String>,

    /// Range end, inclusive (default: today)
    #[arg(long, value_name = "TIME_REF")]
    pub to: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show current and longest streak with recently missed days
    Streak {
        #[command(flatten)]
        today: TodayArg,
    },

    /// List days without an entry (default: the trailing missed-days window)
    Missed {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        today: TodayArg,
    },

    /// Percentage of days with an entry (default: the trailing missed-days window)
    Consistency {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        today: TodayArg,
    },

    /// Mood, tag and word-count analytics (default: all entries up to today)
    Stats {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        today: TodayArg,

        /// Number of most-used tags to show (default: from config)
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_stats_with_range() {
        let cli = Cli::parse_from([
            "moodlog", "stats", "--from", "30 days ago", "--today", "2025-01-31", "--top", "3",
        ]);
        match cli.command {
            Commands::Stats { range, today, top } => {
                assert_eq!(range.from.as_deref(), Some("30 days ago"));
                assert!(range.to.is_none());
                assert_eq!(today.today.as_deref(), Some("2025-01-31"));
                assert_eq!(top, Some(3));
            }
            other => panic!("Expected stats command, got {:?}", other),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["moodlog", "streak", "-v"]);
        assert!(cli.verbose);
    }
}
