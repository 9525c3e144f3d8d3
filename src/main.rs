//! Demo driver: deals a game and plays it with the hint engine.

use anyhow::{Context, Error};
use log::info;
use pico_args::Arguments;

use klondike_engine::display::render_table;
use klondike_engine::hint::{Suggestion, suggest};
use klondike_engine::moves::Move;
use klondike_engine::{Engine, EngineConfig, GameStatus};

const HELP: &str = "\
Deal a game of Klondike (draw 3) and autoplay it

USAGE:
  klondike_engine [OPTIONS]

OPTIONS:
  --seed       N           Seed for the shuffle          [default: random]
  --code       DEALCODE    Replay a deal by its code
  --max-moves  N           Stop after this many moves    [default: 500]
  --config     FILE        Engine config as JSON

FLAGS:
  --show                   Print the table after every move
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                 Log filter (e.g. info, klondike_engine=debug)
";

struct Args {
    seed: Option<u64>,
    code: Option<String>,
    max_moves: u32,
    config: Option<String>,
    show: bool,
}

fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        seed: pargs.opt_value_from_str("--seed").context("--seed must be a number")?,
        code: pargs.opt_value_from_str("--code").context("invalid --code")?,
        max_moves: pargs
            .opt_value_from_str("--max-moves")
            .context("--max-moves must be a number")?
            .unwrap_or(500),
        config: pargs.opt_value_from_str("--config").context("invalid --config")?,
        show: pargs.contains("--show"),
    };

    env_logger::builder().format_target(false).init();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file {path}"))?;
            EngineConfig::from_json(&json).with_context(|| format!("bad config in {path}"))?
        }
        None => EngineConfig::default(),
    };

    let mut builder = Engine::builder().config(config);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(code) = &args.code {
        builder = builder.deal_code(code.clone());
    }
    let mut engine = builder.build().context("could not start the game")?;

    if let Some(code) = engine.deal_code() {
        println!("Deal code: {code}");
    }
    println!("{}", render_table(engine.table()));

    while engine.status() == GameStatus::Playing && engine.move_count() < args.max_moves {
        let mv = match suggest(engine.table()) {
            Suggestion::Play { mv, .. } => mv,
            Suggestion::Draw if !engine.table().stock().is_empty() => Move::Draw,
            Suggestion::Draw => Move::Recycle,
            Suggestion::NoMove => {
                info!("nothing left to play or draw");
                break;
            }
        };
        let description = mv.describe(engine.table());
        if !engine.play(mv) {
            info!("could not play {description}; stopping");
            break;
        }
        if args.show {
            println!("{description}");
            println!("{}", render_table(engine.table()));
        }
    }

    println!("{}", render_table(engine.table()));
    println!("{} after {} moves", engine.status_text(), engine.move_count());
    let stats = engine.stats();
    info!(
        "games played {}, won {}, stuck {}",
        stats.games_played, stats.games_won, stats.games_stuck
    );

    Ok(())
}
