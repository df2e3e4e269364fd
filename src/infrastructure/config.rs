//! Configuration management

use crate::domain::analytics::{DEFAULT_TOP_TAGS, DEFAULT_TREND_WINDOW};
use crate::domain::streak::DEFAULT_MISSED_DAYS_WINDOW;
use crate::domain::{AnalyticsAggregator, Mood, MoodCategory, StreakCalculator};
use crate::error::{MoodlogError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the marker directory holding the journal configuration
pub const CONFIG_DIR: &str = ".moodlog";

const CONFIG_FILE: &str = "config.toml";

/// Upper bound for the analytics window settings, roughly a century of days
pub const MAX_WINDOW: u32 = 36_600;

// Tables must serialize after plain values, so `analytics` and `moods` stay last
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    /// Mood assigned to notes without a recognised `mood:` line
    #[serde(default = "default_mood_name")]
    pub default_mood: String,
    /// Tags that ship with the journal, reported with system origin
    #[serde(default = "default_system_tags")]
    pub system_tags: Vec<String>,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
    #[serde(default = "default_moods")]
    pub moods: Vec<Mood>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Moving-average window, counted in entries rather than days
    pub trend_window: usize,
    pub missed_days_window: u32,
    pub top_tags: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        AnalyticsSettings {
            trend_window: DEFAULT_TREND_WINDOW,
            missed_days_window: DEFAULT_MISSED_DAYS_WINDOW,
            top_tags: DEFAULT_TOP_TAGS,
        }
    }
}

fn default_mood_name() -> String {
    "okay".to_string()
}

fn default_system_tags() -> Vec<String> {
    ["family", "friends", "gratitude", "health", "travel", "work"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

fn default_moods() -> Vec<Mood> {
    use MoodCategory::*;
    [
        ("excited", Positive),
        ("happy", Positive),
        ("grateful", Positive),
        ("calm", Positive),
        ("okay", Neutral),
        ("tired", Neutral),
        ("bored", Neutral),
        ("anxious", Negative),
        ("sad", Negative),
        ("angry", Negative),
    ]
    .into_iter()
    .enumerate()
    .map(|(rank, (name, category))| Mood::new(name, category, rank as u32 + 1))
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            created: Utc::now(),
            default_mood: default_mood_name(),
            system_tags: default_system_tags(),
            analytics: AnalyticsSettings::default(),
            moods: default_moods(),
        }
    }

    /// Load config from .moodlog/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MoodlogError::NotJournalDirectory(path.to_path_buf())
            } else {
                MoodlogError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .moodlog/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let config_dir = path.join(CONFIG_DIR);

        if !config_dir.exists() {
            fs::create_dir(&config_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(config_dir.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.moods.is_empty() {
            return Err(MoodlogError::Config(
                "Mood catalog is empty: add at least one [[moods]] entry".to_string(),
            ));
        }
        if self.find_mood(&self.default_mood).is_none() {
            return Err(MoodlogError::Config(format!(
                "Unknown default mood: '{}'",
                self.default_mood
            )));
        }
        if self.analytics.trend_window == 0 || self.analytics.missed_days_window == 0 {
            return Err(MoodlogError::Config(
                "analytics.trend_window and analytics.missed_days_window must be at least 1"
                    .to_string(),
            ));
        }
        if self.analytics.trend_window > MAX_WINDOW as usize
            || self.analytics.missed_days_window > MAX_WINDOW
        {
            return Err(MoodlogError::Config(format!(
                "analytics.trend_window and analytics.missed_days_window must not exceed {}",
                MAX_WINDOW
            )));
        }
        Ok(())
    }

    /// Look up a mood by name, ignoring case
    pub fn find_mood(&self, name: &str) -> Option<&Mood> {
        self.moods
            .iter()
            .find(|mood| mood.name.eq_ignore_ascii_case(name))
    }

    pub fn streak_calculator(&self) -> StreakCalculator {
        StreakCalculator::new(self.analytics.missed_days_window)
    }

    pub fn aggregator(&self) -> AnalyticsAggregator {
        AnalyticsAggregator::new(self.analytics.trend_window, self.analytics.top_tags)
    }
}
