use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use legend_score::config::{self, Config};
use legend_score::output;
use legend_score::pipeline::{self, PipelineOptions};
use legend_score::player::{self, LoadedPlayers};
use legend_score::scoring::ScoringModel;
use legend_score::selection::{self, SelectionRules, SnapshotManifest};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_OUTPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every eligible player against their position peers
    Score {
        /// Player CSV files or glob patterns (rows are concatenated)
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Where to write the legend score table
        #[arg(short, long, default_value = "legend_scores.csv")]
        output: PathBuf,

        /// Minimum career games to be eligible (default: 16, 0 keeps everyone)
        #[arg(long)]
        min_games: Option<u32>,

        /// Smallest position group that gets scored (default: 3)
        #[arg(long)]
        min_position_players: Option<usize>,

        /// Show what would be processed without writing output
        #[arg(long)]
        dry_run: bool,

        /// Print the score breakdown for one player
        #[arg(long, value_name = "PLAYER_ID")]
        explain: Option<String>,
    },
    /// Build a position-quota candidate snapshot
    Select {
        /// Player CSV files or glob patterns (rows are concatenated)
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Snapshot directory (defaults to data/snapshots/YYYY-MM-DD)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Process only the first N players
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Show what would be done without writing the snapshot
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "legend-score")]
#[command(about = "Position-relative legend scores for football players", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/legend-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    legend_score::logging::init_logging(cli.verbose);
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = cli.command {
        let path = match config_path.map_or_else(config::get_config_path, Ok) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let code = match cli.command {
        Commands::Score {
            input,
            output,
            min_games,
            min_position_players,
            dry_run,
            explain,
        } => run_score(
            &config,
            &input,
            output,
            min_games,
            min_position_players,
            dry_run,
            explain.as_deref(),
        ),
        Commands::Select {
            input,
            output_dir,
            batch_size,
            dry_run,
        } => run_select(&config, &input, output_dir, batch_size, dry_run),
        Commands::Init { .. } => EXIT_SUCCESS,
    };

    std::process::exit(code);
}

fn load_inputs(patterns: &[String]) -> Result<LoadedPlayers, player::LoadError> {
    let paths = player::resolve_inputs(patterns)?;
    player::load_players(&paths)
}

fn run_score(
    config: &Config,
    input: &[String],
    output_path: PathBuf,
    min_games: Option<u32>,
    min_position_players: Option<usize>,
    dry_run: bool,
    explain: Option<&str>,
) -> i32 {
    let start_time = Instant::now();

    let loaded = match load_inputs(input) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Input error: {}", e);
            return EXIT_INPUT;
        }
    };
    let total = loaded.players.len();
    if loaded.skipped_rows > 0 {
        warn!("Skipped {} unreadable input rows", loaded.skipped_rows);
    }

    let min_games = min_games.unwrap_or_else(|| config.min_games());
    let players = pipeline::filter_eligible(loaded.players, min_games);
    info!(
        "Eligible players (>= {} games): {} of {}",
        min_games,
        players.len(),
        total
    );

    let options = PipelineOptions {
        min_position_players: min_position_players
            .unwrap_or_else(|| config.min_position_players())
            .max(1),
    };
    let use_colors = output::should_use_colors();

    if dry_run {
        let plan = pipeline::plan_groups(&players, &options);
        println!("{}", output::format_dry_run(&plan, players.len(), use_colors));
        println!("[DRY RUN] Would write legend scores to {}", output_path.display());
        return EXIT_SUCCESS;
    }

    let model = config
        .scoring
        .as_ref()
        .map(ScoringModel::from_config)
        .unwrap_or_default();
    debug!(
        "Scoring with {} weight tables, fallback {}",
        model.tables().len(),
        model.fallback_position()
    );

    let outcome = pipeline::process_players(&players, &options, &model);

    if let Some(id) = explain {
        match outcome.find(id) {
            Some(scored) => println!("{}\n", output::format_explain(scored, use_colors)),
            None => warn!("No scored player with id {}", id),
        }
    }

    if outcome.is_empty() {
        error!("No legend scores calculated!");
        return EXIT_INPUT;
    }

    let written = match output::write_legend_csv(&output_path, outcome.rows()) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Output error: {:#}", e);
            return EXIT_OUTPUT;
        }
    };
    info!("Saved {} legend scores to {}", written, output_path.display());

    println!("{}", output::format_leaders(&outcome, use_colors));
    println!();
    println!(
        "{}",
        output::format_summary(&outcome, start_time.elapsed(), use_colors)
    );
    if let Some(note) = output::format_skipped_rows(loaded.skipped_rows) {
        println!("{}", note);
    }

    EXIT_SUCCESS
}

fn run_select(
    config: &Config,
    input: &[String],
    output_dir: Option<PathBuf>,
    batch_size: Option<usize>,
    dry_run: bool,
) -> i32 {
    let start_time = Instant::now();

    let loaded = match load_inputs(input) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Input error: {}", e);
            return EXIT_INPUT;
        }
    };
    let skipped_rows = loaded.skipped_rows;
    if skipped_rows > 0 {
        warn!("Skipped {} unreadable input rows", skipped_rows);
    }
    let mut players = loaded.players;
    info!("Combined dataset: {} total players", players.len());

    if let Some(n) = batch_size {
        if n < players.len() {
            info!("Using first {} players", n);
            players.truncate(n);
        }
    }

    let rules = config
        .selection
        .as_ref()
        .map(SelectionRules::from_config)
        .unwrap_or_default();
    let selection = selection::select_candidates(players, &rules);

    let today = chrono::Local::now().date_naive();
    let dir = output_dir.unwrap_or_else(|| selection::default_snapshot_dir(today));
    let use_colors = output::should_use_colors();
    println!("{}", output::format_selection(&selection, use_colors));
    if let Some(note) = output::format_skipped_rows(skipped_rows) {
        println!("{}", note);
    }

    if dry_run {
        println!(
            "[DRY RUN] Would save {} players to {}",
            selection.candidates.len(),
            dir.join(selection::PLAYERS_FILE).display()
        );
        return EXIT_SUCCESS;
    }

    let manifest = SnapshotManifest::new(today, &selection, &rules, &loaded.sources);
    if let Err(e) = selection::write_snapshot(&dir, &selection, &manifest) {
        eprintln!("Output error: {:#}", anyhow::Error::from(e));
        return EXIT_OUTPUT;
    }

    println!(
        "Snapshot saved to {} in {}",
        dir.display(),
        output::format_elapsed(start_time.elapsed())
    );
    EXIT_SUCCESS
}
