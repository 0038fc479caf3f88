//! discball headless runner
//!
//! Plays bot-versus-bot matches without rendering and logs a summary of
//! each one.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use discball::bots::{Bot, ChaseBot, ConstantActionBot, GoalkeeperBot, RandomBot, collect_actions};
use discball::stadium::load_stadium_named;
use discball::{Action, ConfigError, Game, GameConfig, Score, Team};

/// Bot driving one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BotKind {
    /// Never touches the keys
    Idle,
    /// Always runs forward holding kick
    Runner,
    /// Random keys
    Random,
    /// Chases and kicks the ball
    Chase,
    /// Guards its own goal
    Goalkeeper,
}

impl BotKind {
    fn build(self, team: Team, seed: u64) -> Box<dyn Bot> {
        match self {
            BotKind::Idle => Box::new(ConstantActionBot::new(Action::IDLE, false)),
            BotKind::Runner => Box::new(ConstantActionBot::new(Action::new(1, 0, true), team == Team::Blue)),
            BotKind::Random => Box::new(RandomBot::new(seed)),
            BotKind::Chase => Box::new(ChaseBot::new()),
            BotKind::Goalkeeper => Box::new(GoalkeeperBot::new(seed)),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Built-in map name or path to a map file
    #[arg(short, long)]
    map: Option<String>,
    /// Goals needed to win (0 = none)
    #[arg(long)]
    score_limit: Option<u32>,
    /// Match length in minutes (0 = none)
    #[arg(long)]
    time_limit: Option<u32>,
    /// Red team bots, comma separated
    #[arg(long, value_enum, value_delimiter = ',', default_value = "chase")]
    red: Vec<BotKind>,
    /// Blue team bots, comma separated
    #[arg(long, value_enum, value_delimiter = ',', default_value = "goalkeeper")]
    blue: Vec<BotKind>,
    /// Number of matches to play
    #[arg(short = 'n', long, default_value = "1")]
    matches: u32,
    /// Seed for bots that use randomness
    #[arg(short, long, default_value = "0")]
    seed: u64,
    /// Save an action recording of every match
    #[arg(short, long)]
    record: bool,
    /// Give up on a match after this many ticks
    #[arg(long, default_value = "36000")]
    max_ticks: u64,
}

/// Config file (or defaults) with the command-line overrides applied
fn resolve_config(args: &Args) -> Result<GameConfig, ConfigError> {
    let mut config = GameConfig::load_or_default(args.config.as_deref())?;
    if let Some(map) = &args.map {
        config.stadium = map.clone();
    }
    if let Some(limit) = args.score_limit {
        config.score_limit = limit;
    }
    if let Some(limit) = args.time_limit {
        config.time_limit_minutes = limit;
    }
    config.enable_recorder |= args.record;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    // Log filter comes from the config; report its source after init
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level)).init();
    log::info!("discball starting...");
    match &args.config {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::info!("Using default config"),
    }

    let stadium = load_stadium_named(&config.stadium)?;
    let score = Score::new(config.time_limit_minutes, config.score_limit);
    let mut game = Game::new(stadium, score);
    let mut bots: Vec<Box<dyn Bot>> = Vec::new();
    for (team, kinds) in [(Team::Red, &args.red), (Team::Blue, &args.blue)] {
        for (i, kind) in kinds.iter().enumerate() {
            game.add_player(format!("{}{}", team.as_str().to_lowercase(), i), team);
            bots.push(kind.build(team, args.seed.wrapping_add(bots.len() as u64)));
        }
    }
    if config.enable_recorder {
        game.enable_recorder(&config.recording_folder);
    }

    game.start();
    for round in 1..=args.matches {
        let mut ticks = 0u64;
        loop {
            let actions = collect_actions(&mut bots, &game);
            ticks += 1;
            if game.step(&actions) {
                break;
            }
            if ticks >= args.max_ticks {
                log::warn!("Match {round} cut off after {ticks} ticks");
                break;
            }
        }

        let score = game.score();
        log::info!(
            "Match {round}: {} at {} ({} ticks), winner {}",
            score.score_string(),
            score.time_string(),
            score.total_ticks,
            score.winner().as_str()
        );
        for player in game.players() {
            log::debug!(
                "  {} ({}): {} touches, {} kicks",
                player.name,
                player.team.as_str(),
                player.stats.touches,
                player.stats.kicks
            );
        }

        let saved = if round == args.matches {
            game.stop(config.enable_recorder)?
        } else {
            game.reset(config.enable_recorder)?
        };
        if let Some(path) = saved {
            log::info!("Recording saved to {}", path.display());
        }
    }

    Ok(())
}
