//! Mood, tag and word-count aggregation over a snapshot of entries

use crate::domain::entry::{Entry, MoodCategory, Tag, TagId, TagOrigin};
use crate::domain::streak::StreakResult;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Trailing moving-average window, counted in entries
pub const DEFAULT_TREND_WINDOW: usize = 7;

/// Number of tags reported in the most-used list
pub const DEFAULT_TOP_TAGS: usize = 10;

/// Label for tag ids missing from the catalog
pub const UNKNOWN_TAG: &str = "Unknown";

/// Entry count and rounded percentage for one mood category
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryShare {
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoodDistribution {
    pub positive: CategoryShare,
    pub neutral: CategoryShare,
    pub negative: CategoryShare,
}

impl MoodDistribution {
    pub fn share(&self, category: MoodCategory) -> CategoryShare {
        match category {
            MoodCategory::Positive => self.positive,
            MoodCategory::Neutral => self.neutral,
            MoodCategory::Negative => self.negative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodFrequency {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagUsage {
    pub tag_id: TagId,
    pub name: String,
    /// `None` when the tag is absent from the catalog
    pub origin: Option<TagOrigin>,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub word_count: usize,
    pub moving_average: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsResult {
    pub mood_distribution: MoodDistribution,
    pub most_frequent_mood: Option<MoodFrequency>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub missed_days: Vec<NaiveDate>,
    /// Percentages relative to all tag usages
    pub most_used_tags: Vec<TagUsage>,
    /// Percentages relative to the number of entries
    pub tag_breakdown: Vec<TagUsage>,
    pub word_count_trend: Vec<TrendPoint>,
    pub average_word_count: f64,
    pub total_entries: usize,
    pub distinct_days: usize,
}

/// Builds an [`AnalyticsResult`] from entries, the tag catalog and the
/// streak figures for the same range.
///
/// The word-count moving average spans the last `trend_window` *entries*,
/// not calendar days. With sparse journaling a window of 7 can cover weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsAggregator {
    trend_window: usize,
    top_tags: usize,
}

impl Default for AnalyticsAggregator {
    fn default() -> Self {
        AnalyticsAggregator::new(DEFAULT_TREND_WINDOW, DEFAULT_TOP_TAGS)
    }
}

impl AnalyticsAggregator {
    pub fn new(trend_window: usize, top_tags: usize) -> Self {
        AnalyticsAggregator {
            trend_window: trend_window.max(1),
            top_tags,
        }
    }

    pub fn aggregate(
        &self,
        entries: &[Entry],
        catalog: &[Tag],
        streak: &StreakResult,
    ) -> AnalyticsResult {
        if entries.is_empty() {
            return AnalyticsResult::default();
        }

        let total = entries.len();
        let tag_counts = count_tags(entries);
        let total_tag_uses: usize = tag_counts.values().sum();
        let usages = resolve_tags(&tag_counts, catalog);

        let most_used_tags = usages
            .iter()
            .take(self.top_tags)
            .map(|usage| with_percentage(usage, total_tag_uses))
            .collect();
        let tag_breakdown = usages
            .iter()
            .map(|usage| with_percentage(usage, total))
            .collect();

        let total_words: usize = entries.iter().map(|e| e.word_count).sum();
        let distinct_days = entries
            .iter()
            .map(|e| e.date)
            .collect::<BTreeSet<_>>()
            .len();

        AnalyticsResult {
            mood_distribution: mood_distribution(entries),
            most_frequent_mood: most_frequent_mood(entries),
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            missed_days: streak.missed_days.clone(),
            most_used_tags,
            tag_breakdown,
            word_count_trend: self.word_count_trend(entries),
            average_word_count: round1(ratio(total_words, total)),
            total_entries: total,
            distinct_days,
        }
    }

    /// One point per entry, in date order
    pub fn word_count_trend(&self, entries: &[Entry]) -> Vec<TrendPoint> {
        let mut sorted: Vec<&Entry> = entries.iter().collect();
        sorted.sort_by_key(|e| (e.date, e.id));

        let counts: Vec<usize> = sorted.iter().map(|e| e.word_count).collect();
        sorted
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let window = &counts[(i + 1).saturating_sub(self.trend_window)..=i];
                let sum: usize = window.iter().sum();
                TrendPoint {
                    date: entry.date,
                    word_count: entry.word_count,
                    moving_average: round1(ratio(sum, window.len())),
                }
            })
            .collect()
    }
}

/// Primary moods only; secondary moods never enter the distribution
fn mood_distribution(entries: &[Entry]) -> MoodDistribution {
    let total = entries.len();
    let counts = entries.iter().fold(HashMap::new(), |mut acc, entry| {
        *acc.entry(entry.primary_mood.category).or_insert(0usize) += 1;
        acc
    });
    let share = |category: MoodCategory| {
        let count = counts.get(&category).copied().unwrap_or(0);
        CategoryShare {
            count,
            percentage: round1(ratio(count, total) * 100.0),
        }
    };

    MoodDistribution {
        positive: share(MoodCategory::Positive),
        neutral: share(MoodCategory::Neutral),
        negative: share(MoodCategory::Negative),
    }
}

/// Highest primary-mood count; ties go to the alphabetically first name
fn most_frequent_mood(entries: &[Entry]) -> Option<MoodFrequency> {
    let counts = entries.iter().fold(BTreeMap::new(), |mut acc, entry| {
        *acc.entry(entry.primary_mood.name.as_str()).or_insert(0usize) += 1;
        acc
    });

    // BTreeMap iterates names ascending, so the first maximum wins
    counts
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (name, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((name, count)),
        })
        .map(|(name, count)| MoodFrequency {
            name: name.to_string(),
            count,
        })
}

fn count_tags(entries: &[Entry]) -> BTreeMap<TagId, usize> {
    entries.iter().fold(BTreeMap::new(), |mut acc, entry| {
        let distinct: BTreeSet<TagId> = entry.tags.iter().copied().collect();
        for tag in distinct {
            *acc.entry(tag).or_insert(0) += 1;
        }
        acc
    })
}

/// Usages ordered by count descending, then name, with percentages unset
fn resolve_tags(counts: &BTreeMap<TagId, usize>, catalog: &[Tag]) -> Vec<TagUsage> {
    let by_id: HashMap<TagId, &Tag> = catalog.iter().map(|tag| (tag.id, tag)).collect();

    let mut usages: Vec<TagUsage> = counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(id, count)| {
            let tag = by_id.get(id);
            TagUsage {
                tag_id: *id,
                name: tag.map_or_else(|| UNKNOWN_TAG.to_string(), |t| t.name.clone()),
                origin: tag.map(|t| t.origin),
                count: *count,
                percentage: 0.0,
            }
        })
        .collect();

    usages.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.tag_id.cmp(&b.tag_id))
    });
    usages
}

fn with_percentage(usage: &TagUsage, denominator: usize) -> TagUsage {
    TagUsage {
        percentage: round1(ratio(usage.count, denominator) * 100.0),
        ..usage.clone()
    }
}

/// `part / whole`, or zero for an empty whole
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
