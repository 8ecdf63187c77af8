//! Main Entrypoint for the Konjugator Trainer
//!
//! This binary is responsible for:
//! 1. Parsing CLI arguments and loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Loading the verb table (the one failure that aborts startup).
//! 4. Constructing the progress store and console surface.
//! 5. Running the menu loop until the user exits.

use anyhow::Context;
use clap::Parser;
use konjugator_core::conjugation::ConjugationTable;
use konjugator_core::store::ProgressStore;
use konjugator_service::{config::Config, console::Stdio, data, menu};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "konjugator")]
#[command(about = "Interactive German verb conjugation trainer")]
struct Args {
    /// Path to the verb table (a JSON array of conjugation rows)
    #[arg(short, long, default_value = "data/verbs.json")]
    data: PathBuf,

    /// Path of the resumable training progress record
    #[arg(long, default_value = "training_progress.json")]
    progress: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Parse Arguments and Load Configuration ---
    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();

    // --- 3. Load the Verb Table ---
    let rows = data::load_verb_rows(&args.data)?;
    let table = ConjugationTable::build(rows);
    info!(
        verbs = table.verbs().len(),
        data = %args.data.display(),
        "verb table loaded"
    );

    // --- 4. Construct the Progress Store and Console Surface ---
    let store = ProgressStore::new(args.progress);
    let mut io = Stdio;

    // --- 5. Run the Menu Loop ---
    menu::run(&mut io, &table, &store, &config).await
}
