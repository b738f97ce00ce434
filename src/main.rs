//! # Delve Main Entry Point
//!
//! Parses the command line, sets up logging and either prints generated
//! dungeons as text or opens the macroquad window and runs the game.

use clap::Parser;
use delve::{Dungeon, DelveResult, GameConfig, GameSession, InputHandler, SceneManager};
use log::{error, info};
use macroquad::window::Conf;
use std::path::PathBuf;

const WINDOW_WIDTH: i32 = 1280;
const WINDOW_HEIGHT: i32 = 800;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A real-time dungeon crawler with procedurally generated levels")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dungeon width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Dungeon height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// JSON file with generation and progression settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print generated dungeons as text instead of opening a window
    #[arg(long)]
    ascii: bool,

    /// Number of consecutive levels to print with --ascii
    #[arg(long, default_value_t = 1)]
    levels: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> DelveResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Delve v{}", delve::VERSION);
    let config = build_config(&args)?;

    if args.ascii {
        return print_levels(&config, args.levels);
    }

    macroquad::Window::from_config(window_conf(), async move {
        if let Err(e) = run_game(config).await {
            error!("Game loop failed: {}", e);
        }
    });
    Ok(())
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Delve".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        ..Default::default()
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_timestamp(None)
            .init();
    }
}

/// Merges the config file (if any) with command line overrides.
fn build_config(args: &Args) -> DelveResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::from_json_file(path)?
        }
        None => GameConfig::default(),
    };

    config.generation.seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    });
    if let Some(width) = args.width {
        config.generation.width = width;
    }
    if let Some(height) = args.height {
        config.generation.height = height;
    }

    config.validate()?;
    info!(
        "Using seed {} on a {}x{} grid",
        config.generation.seed, config.generation.width, config.generation.height
    );
    Ok(config)
}

/// Generates and prints `levels` dungeons from one generator.
fn print_levels(config: &GameConfig, levels: u32) -> DelveResult<()> {
    let mut dungeon = Dungeon::new(config.generation.clone())?;
    for level in 1..=levels.max(1) {
        dungeon.generate()?;
        dungeon.validate_layout()?;
        println!(
            "Level {}: {} rooms, {} treasures",
            level,
            dungeon.room_count(),
            dungeon.treasures_placed()
        );
        println!("{}", dungeon.render_ascii());
    }
    Ok(())
}

/// Runs the windowed game until the player quits from the menu.
async fn run_game(config: GameConfig) -> DelveResult<()> {
    #[cfg(feature = "dev-tools")]
    let _span = tracing::info_span!("game", seed = config.generation.seed).entered();

    let session = GameSession::new(config)?;
    let mut scenes = SceneManager::new(session, InputHandler::new());
    scenes.run().await?;
    info!("Game loop ended");
    Ok(())
}
