//! Output formatting utilities

use crate::domain::{AnalyticsResult, MoodCategory, StreakResult, TagUsage};
use chrono::NaiveDate;

fn days(n: impl Into<u64>) -> String {
    let n = n.into();
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

/// Format streak figures for display
pub fn format_streak(result: &StreakResult, window: u32) -> String {
    let mut output = String::new();
    output.push_str(&format!("Current streak: {}\n", days(result.current_streak)));
    output.push_str(&format!("Longest streak: {}\n", days(result.longest_streak)));
    match result.last_entry_date {
        Some(date) => output.push_str(&format!("Last entry:     {}\n", date)),
        None => output.push_str("Last entry:     none\n"),
    }
    output.push_str(&format!(
        "Missed in the last {}: {}\n",
        days(window),
        result.missed_days.len()
    ));
    output
}

/// Format a list of missed days for display
pub fn format_missed_days(missed: &[NaiveDate]) -> String {
    if missed.is_empty() {
        return "No missed days".to_string();
    }

    let mut output = String::new();
    for date in missed {
        output.push_str(&format!("{}  {}\n", date, date.format("%A")));
    }
    output
}

/// Format a consistency percentage for display
pub fn format_consistency(percentage: f64, start: NaiveDate, end: NaiveDate) -> String {
    format!("Consistency {} to {}: {:.1}%", start, end, percentage)
}

fn format_tags(output: &mut String, title: &str, usages: &[TagUsage]) {
    output.push_str(&format!("\n{}\n", title));
    if usages.is_empty() {
        output.push_str("  No tags found\n");
        return;
    }
    for usage in usages {
        output.push_str(&format!(
            "  #{:<20} {:>4}  {:>5.1}%\n",
            usage.name, usage.count, usage.percentage
        ));
    }
}

/// Format an analytics report for display
pub fn format_analytics(result: &AnalyticsResult) -> String {
    if result.total_entries == 0 {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Entries: {} on {}\n",
        result.total_entries,
        days(result.distinct_days as u64)
    ));
    output.push_str(&format!("Current streak: {}\n", days(result.current_streak)));
    output.push_str(&format!("Longest streak: {}\n", days(result.longest_streak)));
    output.push_str(&format!("Missed days: {}\n", result.missed_days.len()));

    output.push_str("\nMoods\n");
    for category in MoodCategory::ALL {
        let share = result.mood_distribution.share(category);
        output.push_str(&format!(
            "  {:<9} {:>4}  {:>5.1}%\n",
            category.label(),
            share.count,
            share.percentage
        ));
    }
    if let Some(mood) = &result.most_frequent_mood {
        output.push_str(&format!("  Most frequent: {} ({})\n", mood.name, mood.count));
    }

    format_tags(&mut output, "Most used tags (share of tag uses)", &result.most_used_tags);
    format_tags(&mut output, "Tag breakdown (share of entries)", &result.tag_breakdown);

    output.push_str("\nWords\n");
    output.push_str(&format!("  Average per entry: {:.1}\n", result.average_word_count));
    if let Some(last) = result.word_count_trend.last() {
        output.push_str(&format!(
            "  Latest: {} words on {} (moving average {:.1})\n",
            last.word_count, last.date, last.moving_average
        ));
    }

    output
}
