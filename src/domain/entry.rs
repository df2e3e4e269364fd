//! Journal entries and their mood/tag reference data

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a mood used for distribution analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Positive,
    Neutral,
    Negative,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 3] = [
        MoodCategory::Positive,
        MoodCategory::Neutral,
        MoodCategory::Negative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MoodCategory::Positive => "Positive",
            MoodCategory::Neutral => "Neutral",
            MoodCategory::Negative => "Negative",
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(MoodCategory::Positive),
            "neutral" => Ok(MoodCategory::Neutral),
            "negative" => Ok(MoodCategory::Negative),
            _ => Err(format!(
                "Invalid mood category: '{}'. Valid categories are: positive, neutral, negative",
                s
            )),
        }
    }
}

/// A mood from the catalog. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub name: String,
    pub category: MoodCategory,
    /// Display order, lower ranks first
    #[serde(default)]
    pub rank: u32,
}

impl Mood {
    pub fn new(name: impl Into<String>, category: MoodCategory, rank: u32) -> Self {
        Mood {
            name: name.into(),
            category,
            rank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(pub u32);

/// Whether a tag ships with the application or was introduced by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOrigin {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub origin: TagOrigin,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>, origin: TagOrigin) -> Self {
        Tag {
            id,
            name: name.into(),
            origin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u32);

/// One journal record, keyed by its calendar date.
///
/// Entries are snapshots: the engine never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub word_count: usize,
    pub primary_mood: Mood,
    /// At most two
    pub secondary_moods: Vec<Mood>,
    pub tags: Vec<TagId>,
    pub category: String,
}

impl Entry {
    /// Maximum number of secondary moods an entry carries
    pub const MAX_SECONDARY_MOODS: usize = 2;

    pub fn new(id: EntryId, date: NaiveDate, word_count: usize, primary_mood: Mood) -> Self {
        Entry {
            id,
            date,
            word_count,
            primary_mood,
            secondary_moods: Vec::new(),
            tags: Vec::new(),
            category: "general".to_string(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_secondary_moods(mut self, mut moods: Vec<Mood>) -> Self {
        moods.truncate(Self::MAX_SECONDARY_MOODS);
        self.secondary_moods = moods;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}
