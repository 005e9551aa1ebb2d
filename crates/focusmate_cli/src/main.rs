//! FocusMate command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto `focusmate_core` store, stats and feedback calls.
//! - Host the presentation collaborators: list rows, text chart, file
//!   import/export, confirmation prompts and the countdown display.

mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use focusmate_core::config::resolve_db_path;
use focusmate_core::db::{open_db, open_db_in_memory};
use focusmate_core::feedback::{THINKING_DELAY_ANALYZE, THINKING_DELAY_CANNED};
use focusmate_core::stats::{daily_series, CHART_WINDOW_DAYS, MAX_SERIES_DAYS};
use focusmate_core::timer::{DEFAULT_FOCUS_MINUTES, TIMER_FINISHED_MESSAGE};
use focusmate_core::{
    analyze_progress, canned_response, default_log_level, init_logging, Clock, EntryStore,
    FixedClock, FocusTimer, KeyValueRepository, SqliteKeyValueRepository, StoreConfig, StoreError,
    SystemClock, TimerTick,
};
use log::info;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const IN_MEMORY_DB: &str = ":memory:";
const DEFAULT_EXPORT_FILE: &str = "focusmate-data.json";

#[derive(Parser, Debug)]
#[command(name = "focusmate", version, about = "Track focus sessions and review study progress")]
struct Cli {
    /// SQLite database path (`:memory:` for a throwaway session);
    /// falls back to FOCUSMATE_DB_PATH, then the platform data directory
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "FOCUSMATE_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "FOCUSMATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Treat this YYYY-MM-DD date as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Do not seed demonstration entries into an empty store
    #[arg(long, global = true)]
    no_demo: bool,

    /// Skip the assistant's thinking pauses
    #[arg(long, global = true)]
    quick: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a focus session
    Add(AddArgs),
    /// Change minutes and/or remarks of a session
    Edit(EditArgs),
    /// Delete a session
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Show the most recent sessions
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show total minutes and session count
    Stats,
    /// Draw minutes per day for the recent window
    Chart {
        #[arg(
            long,
            default_value_t = CHART_WINDOW_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=MAX_SERIES_DAYS as i64)
        )]
        days: u32,
    },
    /// Ask the study assistant a question
    Ask { question: Vec<String> },
    /// Analyze the last 30 days of sessions
    Analyze,
    /// Write all sessions to a JSON file
    Export {
        #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
        out: PathBuf,
    },
    /// Merge sessions from a JSON file in front of existing ones
    Import { file: PathBuf },
    /// Run a focus countdown
    Timer {
        #[arg(long, default_value_t = DEFAULT_FOCUS_MINUTES)]
        minutes: u32,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long, short, default_value = "")]
    subject: String,
    /// Minutes focused (e.g. 25)
    #[arg(long, short, default_value = "")]
    minutes: String,
    #[arg(long, short, default_value = "")]
    remarks: String,
    /// Session date, YYYY-MM-DD; defaults to today
    #[arg(long, short)]
    date: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    id: String,
    #[arg(long, short)]
    minutes: Option<String>,
    #[arg(long, short)]
    remarks: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    if let Command::Timer { minutes } = cli.command {
        run_timer(minutes)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = StoreConfig {
        seed_demo: !cli.no_demo,
        ..StoreConfig::default()
    };

    let path = resolve_db_path(cli.db.as_deref());
    let conn = if path.as_os_str() == IN_MEMORY_DB {
        open_db_in_memory()?
    } else {
        open_db(&path).with_context(|| format!("cannot open {}", path.display()))?
    };
    let repo = SqliteKeyValueRepository::new(&conn);

    match cli.today {
        Some(today) => dispatch(repo, FixedClock(today), config, cli.command, cli.quick),
        None => dispatch(repo, SystemClock, config, cli.command, cli.quick),
    }
}

fn dispatch<R: KeyValueRepository, C: Clock>(
    repo: R,
    clock: C,
    config: StoreConfig,
    command: Command,
    quick: bool,
) -> Result<ExitCode> {
    let mut store = EntryStore::open(repo, clock, config)?;
    let today = store.clock().today();

    let outcome = match command {
        Command::Add(args) => store
            .add(&args.subject, &args.minutes, &args.remarks, args.date.as_deref())
            .map(|entry| println!("{}", render::entry_row(&entry))),
        Command::Edit(args) => store
            .edit(&args.id, args.minutes.as_deref(), args.remarks.as_deref())
            .map(|entry| println!("{}", render::entry_row(&entry))),
        Command::Delete { id, yes } => {
            if !yes && !confirm("Delete this entry?")? {
                return Ok(ExitCode::SUCCESS);
            }
            store.remove(&id).and_then(|removed| {
                if removed {
                    println!("Deleted {id}");
                    Ok(())
                } else {
                    Err(StoreError::NotFound(id))
                }
            })
        }
        Command::List { limit } => {
            let rows = match limit {
                Some(limit) => store.recent(limit),
                None => store.list_view(),
            };
            for entry in rows {
                println!("{}", render::entry_row(entry));
            }
            Ok(())
        }
        Command::Stats => {
            for line in render::summary_lines(&store.summary()) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Chart { days } => {
            let series = daily_series(store.entries(), days, today);
            println!("Minutes focused");
            println!("{}", render::bar_chart(&series));
            Ok(())
        }
        Command::Ask { question } => {
            let question = question.join(" ");
            if !question.trim().is_empty() {
                think(quick, "Thinking...", THINKING_DELAY_CANNED);
            }
            println!("{}", canned_response(&question));
            Ok(())
        }
        Command::Analyze => {
            think(quick, "Analyzing recent sessions...", THINKING_DELAY_ANALYZE);
            println!("{}", analyze_progress(store.entries(), today));
            Ok(())
        }
        Command::Export { out } => {
            let payload = store.export_json()?;
            std::fs::write(&out, payload)
                .with_context(|| format!("cannot write {}", out.display()))?;
            println!("Exported {} entries to {}", store.entries().len(), out.display());
            Ok(())
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            match store.import_json(&raw) {
                Ok(count) => {
                    info!("event=cli_import module=cli status=ok entries={count}");
                    println!("Imported!");
                    Ok(())
                }
                Err(StoreError::Validation(_)) => {
                    eprintln!("Invalid file");
                    return Ok(ExitCode::FAILURE);
                }
                Err(err) => Err(err),
            }
        }
        Command::Timer { .. } => Ok(()),
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err @ (StoreError::Validation(_) | StoreError::NotFound(_))) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn think(quick: bool, status: &str, delay: Duration) {
    if quick {
        return;
    }
    println!("{status}");
    std::thread::sleep(delay);
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn run_timer(minutes: u32) -> Result<()> {
    let mut timer = FocusTimer::from_minutes(minutes);
    let mut stdout = std::io::stdout();
    while let TimerTick::Running { label } = timer.tick() {
        write!(stdout, "\r{label:>6}")?;
        stdout.flush()?;
        if !timer.is_finished() {
            std::thread::sleep(Duration::from_secs(1));
        }
    }
    writeln!(stdout)?;
    println!("{TIMER_FINISHED_MESSAGE}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn chart_days_outside_supported_range_is_rejected() {
        assert!(Cli::try_parse_from(["focusmate", "chart", "--days", "90"]).is_ok());
        assert!(Cli::try_parse_from(["focusmate", "chart", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["focusmate", "chart", "--days", "100000000"]).is_err());
    }

    #[test]
    fn db_flag_is_left_to_config_resolution() {
        std::env::set_var("FOCUSMATE_DB_PATH", "/tmp/focusmate-from-env.sqlite3");
        let cli = Cli::try_parse_from(["focusmate", "stats"]).unwrap();
        assert!(cli.db.is_none());

        let resolved = focusmate_core::resolve_db_path(cli.db.as_deref());
        assert_eq!(
            resolved,
            std::path::PathBuf::from("/tmp/focusmate-from-env.sqlite3")
        );
        std::env::remove_var("FOCUSMATE_DB_PATH");
    }
}
