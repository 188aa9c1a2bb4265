use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use moodlog::application::{init::init, ConfigService, EntryStore, ThemeService};
use moodlog::cli::{format_calendar, format_entry, format_entry_list, format_stats, format_trend};
use moodlog::cli::{Cli, Commands};
use moodlog::domain::time_ref::resolve_date;
use moodlog::domain::{CalendarModel, Direction, MoodLevel, Period, StatsAggregator, WeekStart};
use moodlog::error::{MoodlogError, Result};
use moodlog::infrastructure::{FileSystemRepository, JournalRepository};
use std::str::FromStr;

fn main() {
    moodlog::logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Open the discovered journal's entry store, reporting skipped records
fn open_store(repo: FileSystemRepository) -> Result<EntryStore<FileSystemRepository>> {
    let store = EntryStore::open(repo)?;
    for record in store.load_warnings() {
        eprintln!(
            "Warning: skipped corrupt entry '{}': {}",
            record.key, record.reason
        );
    }
    Ok(store)
}

fn run(cli: Cli) -> Result<()> {
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Init { path, week_start }) => {
            let week_start = WeekStart::from_str(&week_start).map_err(MoodlogError::Config)?;
            init(&path, week_start)?;
            println!("Initialized moodlog journal at {}", path.display());
            println!("Week starts on {}", week_start);
            Ok(())
        }
        Some(Commands::Log { mood, date, note }) => {
            let mood = MoodLevel::from_str(&mood)?;
            let date = resolve_date(&date, today)?;
            let mut store = open_store(FileSystemRepository::discover()?)?;
            let entry = store.upsert(date, mood.value(), note)?;
            println!("Saved {}", format_entry(&entry));
            Ok(())
        }
        Some(Commands::Show { date }) => {
            let date = resolve_date(&date, today)?;
            let store = open_store(FileSystemRepository::discover()?)?;
            match store.get(date) {
                Some(entry) => println!("{}", format_entry(entry)),
                None => println!("No entry for {}", date.format("%Y-%m-%d")),
            }
            Ok(())
        }
        Some(Commands::Delete { date }) => {
            let date = resolve_date(&date, today)?;
            let mut store = open_store(FileSystemRepository::discover()?)?;
            if store.delete(date)? {
                println!("Deleted entry for {}", date.format("%Y-%m-%d"));
            } else {
                println!("No entry for {}", date.format("%Y-%m-%d"));
            }
            Ok(())
        }
        Some(Commands::List { from, to }) => {
            let from = match from {
                Some(r) => resolve_date(&r, today)?,
                None => NaiveDate::MIN,
            };
            let to = match to {
                Some(r) => resolve_date(&r, today)?,
                None => NaiveDate::MAX,
            };
            let store = open_store(FileSystemRepository::discover()?)?;
            let entries = store.list_in_range(from, to)?;
            println!("{}", format_entry_list(&entries).trim_end());
            Ok(())
        }
        Some(Commands::Calendar {
            year,
            month,
            prev,
            next,
            select,
        }) => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let mut model = CalendarModel::new(
                year.unwrap_or(today.year()),
                month.unwrap_or(today.month()),
                config.week_start,
            )?;
            for _ in 0..prev {
                model.navigate(Direction::Previous)?;
            }
            for _ in 0..next {
                model.navigate(Direction::Next)?;
            }
            if let Some(day) = select {
                model.select_day(day)?;
            }

            let store = open_store(repo)?;
            let view = model.current_grid(&store)?;
            print!("{}", format_calendar(&view, &model.weekday_headers()));
            if let Some(entry) = model.selected_date().and_then(|d| store.get(d)) {
                println!();
                println!("{}", format_entry(entry));
            }
            Ok(())
        }
        Some(Commands::Stats {
            period,
            date,
            buckets,
        }) => {
            let period = Period::from_str(&period).map_err(MoodlogError::Config)?;
            let reference = resolve_date(&date, today)?;
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let store = open_store(repo)?;

            let stats = StatsAggregator::new(&store, config.week_start);
            let summary = stats.summarize(period, reference)?;
            let bucket_count = buckets.unwrap_or(summary.window.len_days() as usize);
            let trend = stats.trend_series(period, reference, bucket_count)?;

            print!("{}", format_stats(&summary));
            print!("{}", format_trend(&trend));
            Ok(())
        }
        Some(Commands::Theme { id }) => {
            let mut service = ThemeService::load(FileSystemRepository::discover()?)?;
            match id {
                Some(id) => {
                    let theme = service.set_theme(&id)?;
                    println!("Theme set to {}", theme);
                }
                None => println!("{}", service.active()),
            }
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                let config = service.list()?;
                println!("week_start = {}", config.week_start);
                println!("theme = {}", config.theme);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: moodlog config [--list | <key> [<value>]]");
                println!("Valid keys: week_start, theme, created");
                Ok(())
            }
        }
        None => {
            println!("moodlog - Personal mood journal");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
