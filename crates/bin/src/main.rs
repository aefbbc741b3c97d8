//! Gridiron CLI binary.
//!
//! One subcommand per pipeline stage, run in order: `fetch`,
//! `build-features`, `train`, `predict`. Stages communicate only through
//! the files under `data/`; each run rewrites its outputs in full.

use clap::{Parser, Subcommand};
use gridiron_data::cfbd::{CfbdClient, SweepReport, sweep_elo, sweep_games, sweep_lines};
use gridiron_data::store;
use gridiron_features::build_features;
use gridiron_model::artifact::{load_model, save_model};
use gridiron_model::{predict_matchups, print_summary, train, write_predictions};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process;
use std::time::Duration;

/// First season of the sweep (the last ten full seasons).
const FIRST_SEASON: i32 = 2014;

/// Last season of the sweep, inclusive.
const LAST_SEASON: i32 = 2023;

/// Unified feature table written by `build-features`.
const FEATURES_FILE: &str = "data/processed/games_master.csv";

/// Persisted model artifact, overwritten on each `train`.
const MODEL_FILE: &str = "data/models/score_diff_model.json";

/// User-provided table of upcoming matchups.
const MATCHUPS_FILE: &str = "data/input/matchups.csv";

/// Augmented prediction table written by `predict`.
const PREDICTIONS_FILE: &str = "data/output/predictions.csv";

#[derive(Parser)]
#[command(name = "gridiron")]
#[command(about = "College football score-margin pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download raw games, Elo ratings, and betting lines from CFBD
    Fetch,

    /// Join and clean the raw tables into the unified feature file
    BuildFeatures,

    /// Fit the score-differential model on the feature file
    Train,

    /// Apply the persisted model to upcoming matchups
    Predict,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch => fetch_data().await?,
        Commands::BuildFeatures => build_feature_file()?,
        Commands::Train => train_model()?,
        Commands::Predict => predict_matchup_file()?,
    }

    Ok(())
}

fn season_progress_bar(pages: u64) -> ProgressBar {
    let pb = ProgressBar::new(pages);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn report_sweep(name: &str, report: &SweepReport) {
    if report.pages_skipped > 0 {
        println!(
            "  ✓ {}: {} rows ({} of {} pages skipped)",
            name,
            report.frame.height(),
            report.pages_skipped,
            report.pages_fetched + report.pages_skipped
        );
    } else {
        println!("  ✓ {}: {} rows", name, report.frame.height());
    }
}

async fn fetch_data() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== CFBD raw data download ===");
    println!(
        "Seasons: {}-{} | Output: {}/",
        FIRST_SEASON,
        LAST_SEASON,
        store::RAW_DIR
    );

    let client = CfbdClient::from_env()?;
    let seasons = FIRST_SEASON..=LAST_SEASON;
    let pages_per_endpoint = seasons.clone().count() as u64;

    let pb = season_progress_bar(pages_per_endpoint * 3);

    pb.set_message("Fetching /games...");
    let mut games = sweep_games(&client, seasons.clone(), Some(&pb)).await?;
    store::write_csv(&mut games.frame, &store::raw_path(store::GAMES_FILE))?;

    pb.set_message("Fetching /ratings/elo...");
    let mut elo = sweep_elo(&client, seasons.clone(), Some(&pb)).await?;
    store::write_csv(&mut elo.frame, &store::raw_path(store::ELO_FILE))?;

    pb.set_message("Fetching /lines...");
    let mut lines = sweep_lines(&client, seasons, Some(&pb)).await?;
    store::write_csv(&mut lines.frame, &store::raw_path(store::LINES_FILE))?;

    pb.finish_with_message("Download complete");

    report_sweep(store::GAMES_FILE, &games);
    report_sweep(store::ELO_FILE, &elo);
    report_sweep(store::LINES_FILE, &lines);

    Ok(())
}

fn build_feature_file() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Feature build ===");

    print!("Loading raw tables...");
    let games = store::read_csv(&store::raw_path(store::GAMES_FILE))?;
    let elo = store::read_csv(&store::raw_path(store::ELO_FILE))?;
    println!(" ✓ ({} games, {} ratings)", games.height(), elo.height());

    print!("Joining and cleaning...");
    let mut features = build_features(&games, &elo)?;
    println!(" ✓");

    store::write_csv(&mut features, Path::new(FEATURES_FILE))?;
    println!("Saved {}", FEATURES_FILE);
    println!(
        "Rows: {} | Columns: {}",
        features.height(),
        features.width()
    );

    Ok(())
}

fn train_model() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Model training ===");

    print!("Loading {}...", FEATURES_FILE);
    let features = store::read_csv(Path::new(FEATURES_FILE))?;
    println!(" ✓ ({} rows)", features.height());

    print!("Fitting gradient-boosted regressor...");
    let model = train(&features)?;
    println!(" ✓ ({} trees)", model.num_trees());

    save_model(&model, Path::new(MODEL_FILE))?;
    println!("Saved {}", MODEL_FILE);

    Ok(())
}

fn predict_matchup_file() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Prediction ===");

    print!("Loading model and matchups...");
    let model = load_model(Path::new(MODEL_FILE))?;
    let matchups = store::read_csv(Path::new(MATCHUPS_FILE))?;
    println!(" ✓ ({} matchups)", matchups.height());

    let predictions = predict_matchups(&model, &matchups)?;

    println!();
    print_summary(&predictions);
    println!();

    write_predictions(&predictions, Path::new(PREDICTIONS_FILE))?;
    println!("Predictions saved to {}", PREDICTIONS_FILE);

    Ok(())
}
