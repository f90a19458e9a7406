use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};

use evalue::ledger::{self, LedgerState};
use evalue::output;
use evalue::scoring::FeedbackEntry;

const EXIT_SUCCESS: i32 = 0;
const EXIT_COMMAND: i32 = 1;
const EXIT_LEDGER: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new event
    AddEvent {
        name: String,
        /// Number of attendees (must be positive)
        #[arg(long)]
        attendance: i64,
        /// Total revenue (must be non-negative)
        #[arg(long)]
        revenue: f64,
    },
    /// Delete an event with its feedback, score and label
    DeleteEvent { name: String },
    /// List every event with its feedback count, newest first
    ListEvents,
    /// Show an event's details and feedback progress
    ShowEvent { name: String },
    /// Add one feedback entry to an event
    AddFeedback {
        event: String,
        #[arg(long)]
        text: String,
        /// Optional rating from 1 to 5
        #[arg(long)]
        rating: Option<u8>,
        /// Respondent id; each respondent can submit once per event
        #[arg(long)]
        respondent: Option<String>,
    },
    /// Add feedback from a JSON array of {"text", "rating", "respondent_id"}
    ImportFeedback { event: String, path: PathBuf },
    /// List the feedback collected for an event
    ListFeedback { event: String },
    /// Compute (or recompute) the value score for an event
    Score { event: String },
    /// Show the stored score for an event
    Show { event: String },
    /// Record an admin value label (0-100) and retrain once enough exist
    Calibrate { event: String, label: f64 },
    /// Show whether the rubric or a learned model is in use
    Status,
    /// List scored events, newest first
    History,
    /// Add a demo event with 30 feedback entries
    SeedDemo,
}

#[derive(Parser, Debug)]
#[command(name = "evalue")]
#[command(about = "Event value scoring with feedback calibration", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/evalue/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.as_ref().map(PathBuf::from);
    let config = match evalue::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = evalue::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let level = if cli.verbose { "debug" } else { config.log_level() };
    if let Err(e) = evalue::telemetry::init(level) {
        eprintln!("Logging setup failed: {}", e);
        std::process::exit(EXIT_CONFIG);
    }

    let ledger_path = match evalue::config::ledger_path(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let mut state = match ledger::load_ledger(&ledger_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Ledger error: {:#}", e);
            std::process::exit(EXIT_LEDGER);
        }
    };

    let use_colors = output::should_use_colors(config.color);
    let changed = match run(&cli, &mut state, use_colors) {
        Ok(changed) => changed,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_COMMAND);
        }
    };

    if changed {
        if let Err(e) = ledger::save_ledger(&ledger_path, &state) {
            eprintln!("Ledger error: {:#}", e);
            std::process::exit(EXIT_LEDGER);
        }
        tracing::debug!(path = %ledger_path.display(), "ledger saved");
    }

    std::process::exit(EXIT_SUCCESS);
}

fn read_feedback_file(path: &Path) -> Result<Vec<FeedbackEntry>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open feedback file at {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse feedback file at {}", path.display()))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

/// Run one command against the ledger. Returns true if the ledger changed.
fn run(cli: &Cli, state: &mut LedgerState, use_colors: bool) -> Result<bool> {
    let now = Utc::now();

    match &cli.command {
        Commands::AddEvent {
            name,
            attendance,
            revenue,
        } => {
            let event = state.add_event(name, *attendance, *revenue, now)?;
            println!("Added event '{}'", event.name);
            Ok(true)
        }
        Commands::DeleteEvent { name } => {
            if !state.remove_event(name) {
                anyhow::bail!("Event '{}' not found", name);
            }
            println!("Deleted event '{}'", name);
            Ok(true)
        }
        Commands::ListEvents => {
            let events = state.list_events();
            if cli.json {
                print_json(&events)?;
            } else {
                println!("{}", output::format_event_list(&events, use_colors));
            }
            Ok(false)
        }
        Commands::ShowEvent { name } => {
            let summary = state.event(name)?.summary();
            if cli.json {
                print_json(&summary)?;
            } else {
                println!("{}", output::format_event_detail(&summary));
            }
            Ok(false)
        }
        Commands::AddFeedback {
            event,
            text,
            rating,
            respondent,
        } => {
            let mut entry = FeedbackEntry::new(text.as_str(), *rating);
            if let Some(respondent) = respondent {
                entry = entry.with_respondent(respondent.as_str());
            }
            let progress = state.add_feedback(event, entry)?;
            if cli.json {
                print_json(&progress)?;
            } else {
                println!(
                    "Feedback added ({} total, {} remaining before scoring)",
                    progress.total, progress.remaining
                );
            }
            Ok(true)
        }
        Commands::ImportFeedback { event, path } => {
            let entries = read_feedback_file(path)?;
            state.event(event)?;
            let mut imported = 0;
            for (i, entry) in entries.into_iter().enumerate() {
                state
                    .add_feedback(event, entry)
                    .with_context(|| format!("Entry {} rejected", i + 1))?;
                imported += 1;
            }
            let remaining = state.event(event)?.remaining_feedback();
            println!(
                "Imported {} feedback entries ({} remaining before scoring)",
                imported, remaining
            );
            Ok(true)
        }
        Commands::ListFeedback { event } => {
            let feedback = &state.event(event)?.feedback;
            if cli.json {
                print_json(feedback)?;
            } else {
                println!("{}", output::format_feedback_list(feedback));
            }
            Ok(false)
        }
        Commands::Score { event } => {
            let score = state.compute_score(event, now)?;
            if cli.json {
                print_json(score)?;
            } else {
                println!("{}", output::format_event_score(event, score, use_colors));
            }
            Ok(true)
        }
        Commands::Show { event } => {
            let record = state.event(event)?;
            let score = record
                .score
                .as_ref()
                .with_context(|| format!("Score not computed yet for '{}'", event))?;
            if cli.json {
                print_json(score)?;
            } else {
                println!(
                    "{}",
                    output::format_event_score(event, &score.score, use_colors)
                );
            }
            Ok(false)
        }
        Commands::Calibrate { event, label } => {
            let outcome = state.calibrate(event, *label, now)?;
            if cli.json {
                print_json(&outcome)?;
            } else {
                println!("{}", output::format_calibration(&outcome));
            }
            Ok(true)
        }
        Commands::Status => {
            let status = state.status();
            if cli.json {
                print_json(&status)?;
            } else {
                println!("{}", output::format_status(&status));
            }
            Ok(false)
        }
        Commands::History => {
            let scored = state.history();
            if cli.json {
                let rows: Vec<_> = scored
                    .iter()
                    .filter_map(|event| {
                        let score = &event.score.as_ref()?.score;
                        Some(json!({
                            "name": event.name,
                            "attendance": event.attendance,
                            "revenue": event.revenue,
                            "revenue_score": output::round_score(score.revenue_score),
                            "feedback_score": output::round_score(score.feedback_score),
                            "value_score": output::round_score(score.value_score),
                            "created_at": event.created_at,
                        }))
                    })
                    .collect();
                print_json(&rows)?;
            } else {
                println!("{}", output::format_history_table(&scored, use_colors));
            }
            Ok(false)
        }
        Commands::SeedDemo => {
            let created = ledger::seed_demo(state, now)?;
            if created {
                println!("Demo event '{}' created with 30 feedback entries", ledger::DEMO_EVENT);
            } else {
                println!("Demo event '{}' already exists", ledger::DEMO_EVENT);
            }
            Ok(created)
        }
    }
}
