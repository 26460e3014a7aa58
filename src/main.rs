//! Main entry point for the table-league CLI
//!
//! A thin shell over the league manager: it loads configuration and the
//! persisted league state, executes one command, and writes the state
//! back for mutating commands.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use table_league::config::AppConfig;
use table_league::league::{LeagueManager, LeagueSnapshot};
use table_league::types::Mode;
use tracing::info;

/// Table League - skill ratings and standings for solo and team matches
#[derive(Parser)]
#[command(
    name = "table-league",
    version,
    about = "Skill rating and standings tracker for solo and team table matches",
    long_about = "Table League tracks per-player skill beliefs for 1v1 and 2v2 matches, \
                 updates them after every recorded game with a TrueSkill-family Bayesian \
                 update, and prints standings and recent results. League state is kept in \
                 a JSON file between invocations."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// League state file override
    #[arg(short, long, value_name = "FILE", help = "Override league state file path")]
    state: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without running a command")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Solo,
    Team,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Solo => Mode::Solo,
            ModeArg::Team => Mode::Team,
        }
    }
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeArg::Solo => write!(f, "solo"),
            ModeArg::Team => write!(f, "team"),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Register a new player
    AddPlayer {
        /// Display name, unique across the league
        name: String,
    },

    /// Record a 1v1 game
    Solo {
        blue: String,
        red: String,
        blue_score: u32,
        red_score: u32,
        /// The losing side went under
        #[arg(long)]
        went_under: bool,
    },

    /// Record a 2v2 game
    Team {
        #[arg(long, num_args = 2, value_names = ["PLAYER1", "PLAYER2"])]
        blue: Vec<String>,
        #[arg(long, num_args = 2, value_names = ["PLAYER1", "PLAYER2"])]
        red: Vec<String>,
        blue_score: u32,
        red_score: u32,
        /// The losing side went under
        #[arg(long)]
        went_under: bool,
    },

    /// Print the standings for a mode
    Standings {
        #[arg(long, value_enum, default_value_t = ModeArg::Solo)]
        mode: ModeArg,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Print recent games for a mode
    Recent {
        #[arg(long, value_enum, default_value_t = ModeArg::Solo)]
        mode: ModeArg,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// List every registered player
    Players,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(state) = &args.state {
        config.service.state_path = state.clone();
    }

    Ok(config)
}

/// Load the league from the state file, or start fresh if it is absent
fn load_league(config: &AppConfig) -> Result<LeagueManager> {
    let path = &config.service.state_path;
    if path.exists() {
        info!("Loading league state from {}", path.display());
        LeagueSnapshot::load(path)?.restore(&config.rating)
    } else {
        info!("No league state at {}, starting fresh", path.display());
        LeagueManager::new(&config.rating)
    }
}

fn save_league(league: &LeagueManager, path: &Path) -> Result<()> {
    LeagueSnapshot::capture(league)?.save(path)?;
    info!("League state written to {}", path.display());
    Ok(())
}

fn team_pair(league: &LeagueManager, names: &[String]) -> Result<[table_league::PlayerId; 2]> {
    Ok([
        league.player_by_name(&names[0])?.id,
        league.player_by_name(&names[1])?.id,
    ])
}

fn run_command(league: &LeagueManager, command: Command) -> Result<bool> {
    match command {
        Command::AddPlayer { name } => {
            let player = league.register_player(&name)?;
            println!("Registered {} ({})", player.name, player.id);
            Ok(true)
        }
        Command::Solo {
            blue,
            red,
            blue_score,
            red_score,
            went_under,
        } => {
            let blue = league.player_by_name(&blue)?;
            let red = league.player_by_name(&red)?;
            league.record_solo_game(blue.id, red.id, blue_score, red_score, went_under)?;
            println!(
                "Recorded: {} {} - {} {}{}",
                blue.name,
                blue_score,
                red_score,
                red.name,
                if went_under { " (went under)" } else { "" }
            );
            Ok(true)
        }
        Command::Team {
            blue,
            red,
            blue_score,
            red_score,
            went_under,
        } => {
            let blue_ids = team_pair(league, &blue)?;
            let red_ids = team_pair(league, &red)?;
            league.record_team_game(blue_ids, red_ids, blue_score, red_score, went_under)?;
            println!(
                "Recorded: {}/{} {} - {} {}/{}{}",
                blue[0],
                blue[1],
                blue_score,
                red_score,
                red[0],
                red[1],
                if went_under { " (went under)" } else { "" }
            );
            Ok(true)
        }
        Command::Standings { mode, limit } => {
            let mode = Mode::from(mode);
            println!("{} standings", mode);
            for (rank, entry) in league.standings(mode, limit)?.iter().enumerate() {
                println!(
                    "{:>3}. {:<20} {:>7.1} ±{:.1}",
                    rank + 1,
                    entry.player.name,
                    entry.rating.mu,
                    entry.rating.sigma
                );
            }
            Ok(false)
        }
        Command::Recent { mode, limit } => match Mode::from(mode) {
            Mode::Solo => {
                for game in league.recent_solo_games(limit)? {
                    println!(
                        "{} | {} {} - {} {}{}",
                        game.created_at.format("%Y-%m-%d %H:%M"),
                        game.blue,
                        game.blue_score,
                        game.red_score,
                        game.red,
                        if game.went_under { " (went under)" } else { "" }
                    );
                }
                Ok(false)
            }
            Mode::Team => {
                for game in league.recent_team_games(limit)? {
                    println!(
                        "{} | {}/{} {} - {} {}/{}{}",
                        game.created_at.format("%Y-%m-%d %H:%M"),
                        game.blue[0],
                        game.blue[1],
                        game.blue_score,
                        game.red_score,
                        game.red[0],
                        game.red[1],
                        if game.went_under { " (went under)" } else { "" }
                    );
                }
                Ok(false)
            }
        },
        Command::Players => {
            for player in league.players()? {
                println!("{}", player.name);
            }
            Ok(false)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        return Ok(());
    }

    let Some(command) = args.command else {
        eprintln!("No command given; try --help");
        std::process::exit(2);
    };

    let league = load_league(&config)?;
    let mutated = run_command(&league, command)?;

    if mutated {
        save_league(&league, &config.service.state_path)?;
    }

    Ok(())
}
