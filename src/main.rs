use chrono::{Local, NaiveDate};
use clap::Parser;
use moodlog::application::{init::init, InsightsService};
use moodlog::cli::{
    format_analytics, format_consistency, format_missed_days, format_streak, Cli, Commands,
    RangeArgs, TodayArg,
};
use moodlog::domain::time_ref::resolve_date;
use moodlog::error::{MoodlogError, Result};
use moodlog::infrastructure::logging::setup_logging;
use moodlog::infrastructure::{Config, FileSystemRepository, JournalRepository, JournalSnapshot};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let config = init(&path)?;
            println!("Initialized moodlog journal at {}", path.display());
            println!(
                "Moods: {}, system tags: {}",
                config.moods.len(),
                config.system_tags.len()
            );
            Ok(())
        }
        Commands::Streak { today } => {
            let today = resolve_today(&today)?;
            let (config, snapshot) = load_journal()?;
            let service = InsightsService::from_config(snapshot, &config);

            let result = service.streak_data(today);
            println!(
                "{}",
                format_streak(&result, config.analytics.missed_days_window).trim_end()
            );
            Ok(())
        }
        Commands::Missed { range, today } => {
            let today = resolve_today(&today)?;
            let (config, snapshot) = load_journal()?;
            let service = InsightsService::from_config(snapshot, &config);

            // Without bounds, report the same window the streak command counts
            let missed = if range.from.is_none() && range.to.is_none() {
                service.streak_data(today).missed_days
            } else {
                let default_start = service.streak_calculator().window_start(today);
                let (start, end) = resolve_range(&range, today)?;
                let (start, end) = checked_range(start.unwrap_or(default_start), end)?;
                service.missed_days_in_range(start, end, today)
            };
            println!("{}", format_missed_days(&missed).trim_end());
            Ok(())
        }
        Commands::Consistency { range, today } => {
            let today = resolve_today(&today)?;
            let (config, snapshot) = load_journal()?;
            let service = InsightsService::from_config(snapshot, &config);

            let default_start = service.streak_calculator().window_start(today);
            let (start, end) = resolve_range(&range, today)?;
            let (start, end) = checked_range(start.unwrap_or(default_start), end)?;

            let percentage = service.consistency_percentage(start, end, today);
            println!("{}", format_consistency(percentage, start, end));
            Ok(())
        }
        Commands::Stats { range, today, top } => {
            let today = resolve_today(&today)?;
            let (mut config, snapshot) = load_journal()?;
            if let Some(n) = top {
                config.analytics.top_tags = n;
            }
            let service = InsightsService::from_config(snapshot, &config);

            let (start, end) = resolve_range(&range, today)?;
            if let Some(start) = start {
                checked_range(start, end)?;
            }

            let result = service.analytics(start, Some(end), today);
            println!("{}", format_analytics(&result).trim_end());
            Ok(())
        }
    }
}

/// Discover the journal and load a snapshot of every note
fn load_journal() -> Result<(Config, JournalSnapshot)> {
    let repo = FileSystemRepository::discover()?;
    let config = repo.load_config()?;
    let snapshot = repo.snapshot(&config)?;
    Ok((config, snapshot))
}

fn resolve_today(arg: &TodayArg) -> Result<NaiveDate> {
    let local = Local::now().date_naive();
    match &arg.today {
        Some(reference) => resolve_date(reference, local),
        None => Ok(local),
    }
}

/// Resolve `--from`/`--to` against `today`; the end defaults to `today`
fn resolve_range(range: &RangeArgs, today: NaiveDate) -> Result<(Option<NaiveDate>, NaiveDate)> {
    let start = range
        .from
        .as_deref()
        .map(|r| resolve_date(r, today))
        .transpose()?;
    let end = match range.to.as_deref() {
        Some(r) => resolve_date(r, today)?,
        None => today,
    };
    Ok((start, end))
}

fn checked_range(start: NaiveDate, end: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    if start > end {
        return Err(MoodlogError::InvalidDateRange { start, end });
    }
    Ok((start, end))
}
