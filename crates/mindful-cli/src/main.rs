use anyhow::Result;
use clap::{Parser, Subcommand};
use mindful_core::record::MeditationKind;
use mindful_core::therapy::SessionType;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mindful")]
#[command(about = "Mindful CLI - local wellness tracking with a personal dashboard", long_about = None)]
struct Cli {
    /// Config directory (defaults to $MINDFUL_HOME or the platform config dir)
    #[arg(long, global = true, env = "MINDFUL_HOME")]
    home: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a mood check-in (e.g. "Very Happy", "Sad")
    Mood {
        label: String,
        /// Ask the coach for a supportive action afterwards
        #[arg(long)]
        suggest: bool,
    },
    /// Log a completed meditation
    Meditate {
        #[arg(long)]
        seconds: u32,
        #[arg(long, default_value = "Mindful Breathing")]
        kind: MeditationKind,
    },
    /// Log a health sample
    Health {
        #[arg(long)]
        heart_rate: u32,
        #[arg(long)]
        steps: u64,
    },
    /// Log a screen event
    Event {
        screen: String,
        #[arg(long)]
        action: Option<String>,
    },
    /// Manage journal entries
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },
    /// Manage therapy sessions
    Therapy {
        #[command(subcommand)]
        action: TherapyAction,
    },
    /// Show the dashboard for the last seven days
    Dashboard {
        /// Print the full view as JSON
        #[arg(long)]
        json: bool,
        /// Live pedometer reading; replaces today's stored steps
        #[arg(long)]
        live_steps: Option<u64>,
    },
    /// Ask the wellness coach
    Coach { message: String },
}

#[derive(Subcommand)]
enum JournalAction {
    /// Write a new entry, or overwrite one with --id
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        id: Option<String>,
        /// Mood label, e.g. "Happy"
        #[arg(long)]
        mood: Option<String>,
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// List entries, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry by id
    Delete { id: String },
}

#[derive(Subcommand)]
enum TherapyAction {
    /// List sessions
    List {
        /// Include cancelled sessions
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Book a session
    Book {
        #[arg(long)]
        therapist: String,
        /// Local start time, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        at: String,
        #[arg(long = "type", default_value = "Video Call")]
        session_type: SessionType,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark an upcoming session completed
    Complete { id: String },
    /// Cancel an upcoming session
    Cancel { id: String },
    /// Delete a session
    Delete { id: String },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let directive = if verbose { "mindful=debug" } else { "mindful=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let ctx = commands::AppContext::load(cli.home.as_deref()).await?;

    match cli.command {
        Commands::Mood { label, suggest } => commands::record::mood(&ctx, &label, suggest).await?,
        Commands::Meditate { seconds, kind } => commands::record::meditate(&ctx, seconds, kind).await,
        Commands::Health { heart_rate, steps } => {
            commands::record::health(&ctx, heart_rate, steps).await
        }
        Commands::Event { screen, action } => {
            commands::record::event(&ctx, &screen, action.as_deref()).await
        }
        Commands::Journal { action } => match action {
            JournalAction::Add {
                title,
                content,
                id,
                mood,
                categories,
            } => commands::journal::add(&ctx, id, title, content, mood, categories).await?,
            JournalAction::List { json } => commands::journal::list(&ctx, json).await?,
            JournalAction::Delete { id } => commands::journal::delete(&ctx, &id).await?,
        },
        Commands::Therapy { action } => match action {
            TherapyAction::List { all, json } => commands::therapy::list(&ctx, all, json).await?,
            TherapyAction::Book {
                therapist,
                at,
                session_type,
                specialty,
                notes,
            } => {
                commands::therapy::book(&ctx, therapist, &at, session_type, specialty, notes).await?
            }
            TherapyAction::Complete { id } => commands::therapy::complete(&ctx, &id).await?,
            TherapyAction::Cancel { id } => commands::therapy::cancel(&ctx, &id).await?,
            TherapyAction::Delete { id } => commands::therapy::delete(&ctx, &id).await?,
        },
        Commands::Dashboard { json, live_steps } => {
            commands::dashboard::show(&ctx, json, live_steps).await?
        }
        Commands::Coach { message } => commands::coach::ask(&ctx, &message).await?,
    }

    Ok(())
}
