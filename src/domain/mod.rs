//! Domain layer - Business logic and domain models

pub mod analytics;
pub mod entry;
pub mod note;
pub mod streak;
pub mod time_ref;

pub use analytics::{AnalyticsAggregator, AnalyticsResult, MoodDistribution, TagUsage, TrendPoint};
pub use entry::{Entry, EntryId, Mood, MoodCategory, Tag, TagId, TagOrigin};
pub use note::{NoteParser, ParsedNote};
pub use streak::{StreakCalculator, StreakResult};
pub use time_ref::TimeReference;
