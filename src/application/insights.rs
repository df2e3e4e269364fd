//! Streak and analytics use cases for the presentation layer

use crate::domain::{AnalyticsAggregator, AnalyticsResult, StreakCalculator, StreakResult};
use crate::infrastructure::{Config, DataAccess};
use chrono::NaiveDate;
use tracing::debug;

/// Start of an analytics range when the caller gives none (1970-01-01)
pub fn range_start_sentinel() -> NaiveDate {
    NaiveDate::default()
}

/// Service exposing streak, consistency and analytics figures over a
/// [`DataAccess`] snapshot. Every operation is anchored at an explicit
/// `today`.
pub struct InsightsService<D> {
    data: D,
    streaks: StreakCalculator,
    aggregator: AnalyticsAggregator,
}

impl<D: DataAccess> InsightsService<D> {
    /// Create a service with default window sizes
    pub fn new(data: D) -> Self {
        InsightsService {
            data,
            streaks: StreakCalculator::default(),
            aggregator: AnalyticsAggregator::default(),
        }
    }

    /// Create a service using the analytics settings of `config`
    pub fn from_config(data: D, config: &Config) -> Self {
        InsightsService {
            data,
            streaks: config.streak_calculator(),
            aggregator: config.aggregator(),
        }
    }

    pub fn streak_calculator(&self) -> &StreakCalculator {
        &self.streaks
    }

    pub fn streak_data(&self, today: NaiveDate) -> StreakResult {
        let result = self.streaks.streak_data(self.data.all_entry_dates(), today);
        debug!(
            %today,
            current = result.current_streak,
            longest = result.longest_streak,
            "streak computed"
        );
        result
    }

    pub fn missed_days_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Vec<NaiveDate> {
        self.streaks
            .missed_days_in_range(self.data.all_entry_dates(), start, end, today)
    }

    pub fn consistency_percentage(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> f64 {
        self.streaks
            .consistency_percentage(self.data.all_entry_dates(), start, end, today)
    }

    /// Analytics over `[start, end]`, defaulting to everything up to `today`.
    ///
    /// Streak figures and missed days are computed from the entries inside
    /// the range.
    pub fn analytics(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> AnalyticsResult {
        let start = start.unwrap_or_else(range_start_sentinel);
        let end = end.unwrap_or(today);

        let entries = self.data.entries_in_range(start, end);
        let streak = self.streaks.streak_data_in_range(
            entries.iter().map(|e| e.date),
            start,
            end,
            today,
        );
        debug!(%start, %end, entries = entries.len(), "aggregating analytics");

        self.aggregator
            .aggregate(&entries, &self.data.all_tags(), &streak)
    }
}
