//! Streak and consistency computation over entry dates

use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

/// Length of the trailing window used for the default missed-days list
pub const DEFAULT_MISSED_DAYS_WINDOW: u32 = 30;

/// Consistency figures derived from a set of entry dates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakResult {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Ascending
    pub missed_days: Vec<NaiveDate>,
    pub last_entry_date: Option<NaiveDate>,
}

/// Computes streaks, missed days and consistency.
///
/// Every operation takes the reference `today` explicitly. Input dates may
/// arrive in any order; duplicates count as a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCalculator {
    missed_days_window: u32,
}

impl Default for StreakCalculator {
    fn default() -> Self {
        StreakCalculator::new(DEFAULT_MISSED_DAYS_WINDOW)
    }
}

impl StreakCalculator {
    pub fn new(missed_days_window: u32) -> Self {
        StreakCalculator {
            missed_days_window: missed_days_window.max(1),
        }
    }

    pub fn missed_days_window(&self) -> u32 {
        self.missed_days_window
    }

    /// First day of the trailing missed-days window ending at `today`,
    /// saturating at the earliest representable date
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.missed_days_window) - 1))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Current streak, longest streak, trailing-window missed days and the
    /// most recent entry date.
    ///
    /// Days before the first entry are not counted as missed.
    pub fn streak_data<I>(&self, dates: I, today: NaiveDate) -> StreakResult
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let days: BTreeSet<NaiveDate> = dates.into_iter().collect();
        let (Some(&first), Some(&last)) = (days.first(), days.last()) else {
            return StreakResult::default();
        };
        let window_start = self.window_start(today).max(first);

        StreakResult {
            current_streak: current_streak(&days, today),
            longest_streak: longest_run(days.iter()),
            missed_days: missed_between(&days, window_start, today, today),
            last_entry_date: Some(last),
        }
    }

    /// Streak figures for the dates inside `[start, end]`.
    ///
    /// Missed days cover the range itself rather than the trailing window,
    /// starting no earlier than the first entry in the range.
    pub fn streak_data_in_range<I>(
        &self,
        dates: I,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> StreakResult
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let days: BTreeSet<NaiveDate> = dates
            .into_iter()
            .filter(|day| (start..=end).contains(day))
            .collect();
        let (Some(&first), Some(&last)) = (days.first(), days.last()) else {
            return StreakResult::default();
        };

        StreakResult {
            current_streak: current_streak(&days, today),
            longest_streak: longest_run(days.iter()),
            missed_days: missed_between(&days, start.max(first), end, today),
            last_entry_date: Some(last),
        }
    }

    /// Days in `[start, end]` strictly before `today` that have no entry
    pub fn missed_days_in_range<I>(
        &self,
        dates: I,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Vec<NaiveDate>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let days: BTreeSet<NaiveDate> = dates.into_iter().collect();
        missed_between(&days, start, end, today)
    }

    /// Share of days in `[start, end]` that have an entry, as a percentage.
    ///
    /// Days after `today` are excluded from the denominator, which is never
    /// less than one day.
    pub fn consistency_percentage<I>(
        &self,
        dates: I,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> f64
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let days: BTreeSet<NaiveDate> = dates.into_iter().collect();
        let effective_end = end.min(today);
        if effective_end < start {
            return 0.0;
        }

        let range_len = (effective_end - start).num_days() + 1;
        let written = days.range(start..=effective_end).count();
        written as f64 / range_len.max(1) as f64 * 100.0
    }
}

/// Chain of consecutive days ending at the latest entry on or before `today`
fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(&last) = days.range(..=today).next_back() else {
        return 0;
    };
    // A single empty day (today still unwritten) keeps the chain alive
    if (today - last).num_days() > 1 {
        return 0;
    }

    let mut streak = 0;
    let mut expected = Some(last);
    while let Some(day) = expected.filter(|d| days.contains(d)) {
        streak += 1;
        expected = day.pred_opt();
    }
    streak
}

/// Longest run of consecutive days in an ascending sequence
fn longest_run<'a, I>(sorted: I) -> u32
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    let mut iter = sorted.into_iter();
    let Some(mut previous) = iter.next() else {
        return 0;
    };

    let mut run = 1;
    let mut longest = 1;
    for date in iter {
        match (*date - *previous).num_days() {
            0 => continue,
            1 => {
                run += 1;
                longest = longest.max(run);
            }
            _ => run = 1,
        }
        previous = date;
    }
    longest
}

fn missed_between(
    days: &BTreeSet<NaiveDate>,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let Some(yesterday) = today.pred_opt() else {
        return Vec::new();
    };
    let last_candidate = end.min(yesterday);

    start
        .iter_days()
        .take_while(|day| *day <= last_candidate)
        .filter(|day| !days.contains(day))
        .collect()
}
