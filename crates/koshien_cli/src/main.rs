//! Koshien Chronicle CLI
//!
//! Runs the narrative pipeline over JSON files on disk: render a
//! play-by-play transcript, extract highlights, or assemble the full
//! match context from a tournament file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use koshien_core::{MatchRecord, TeamDirectory, Tournament};

#[derive(Parser)]
#[command(name = "koshien_cli")]
#[command(about = "Reconstruct narratives from high-school baseball box scores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the play-by-play transcript for one match record
    PlayByPlay {
        /// Input match record JSON file
        #[arg(long)]
        r#in: PathBuf,
    },

    /// Extract highlights from one match record
    Highlights {
        /// Input match record JSON file
        #[arg(long)]
        r#in: PathBuf,

        /// Winning team name (defaults to the record's winner field)
        #[arg(long)]
        winner: Option<String>,
    },

    /// Assemble the full match context from a tournament file
    Context {
        /// Input tournament JSON file
        #[arg(long)]
        r#in: PathBuf,

        /// Match id, e.g. "A-R2-M3" or "F-R1-M1"
        #[arg(long)]
        match_id: String,

        /// Winning team name
        #[arg(long)]
        winner: String,

        /// Team profile JSON file (defaults to the built-in directory)
        #[arg(long)]
        teams: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::PlayByPlay { r#in } => {
            let record = read_record(&r#in)?;
            println!("{}", koshien_core::play_by_play_text(&record));
        }

        Commands::Highlights { r#in, winner } => {
            let record = read_record(&r#in)?;
            let winner = winner
                .or_else(|| record.winner.clone())
                .context("no --winner given and the record has no winner field")?;
            let report = koshien_core::extract_highlights(&record, &winner);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Context {
            r#in,
            match_id,
            winner,
            teams,
        } => {
            let text = fs::read_to_string(&r#in)
                .with_context(|| format!("reading {}", r#in.display()))?;
            let tournament: Tournament = serde_json::from_str(&text)
                .with_context(|| format!("parsing tournament from {}", r#in.display()))?;

            let directory = match teams {
                Some(path) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    let profiles = serde_json::from_str(&text)
                        .with_context(|| format!("parsing team profiles from {}", path.display()))?;
                    TeamDirectory::from_profiles(profiles)
                }
                None => TeamDirectory::builtin().clone(),
            };

            let context =
                koshien_core::build_match_context(&match_id, &winner, &tournament, &directory)?;
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
    }

    Ok(())
}

fn read_record(path: &PathBuf) -> Result<MatchRecord> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing match record from {}", path.display()))
}
