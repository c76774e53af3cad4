use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use unohub::bots::label_for_spec;
use unohub::{
    Bot, Game, Mode, Opponent, RulesConfig, Seat, TurnPhase, create_bot_from_spec, load_rules,
    render_state,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser)]
#[command(name = "simulate", about = "Play UNO rounds between bots or against a human")]
struct Cli {
    /// Rule variant: classic, flip, mercy or fkk
    #[arg(long, default_value = "classic", env = "UNOHUB_MODE")]
    mode: Mode,

    /// Number of rounds to play
    #[arg(long, default_value_t = 1, env = "UNOHUB_GAMES")]
    games: usize,

    /// Seed for shuffling; round `n` uses `seed + n`
    #[arg(long, default_value_t = DEFAULT_SEED, env = "UNOHUB_SEED")]
    seed: u64,

    /// Seat P1: human[:name], easy|normal|random|hard[:seed]
    #[arg(long, default_value = "human", env = "UNOHUB_P1")]
    p1: String,

    /// Seat P2, same syntax as --p1
    #[arg(long, default_value = "normal", env = "UNOHUB_P2")]
    p2: String,

    /// Path to a rules TOML file
    #[arg(long, env = "UNOHUB_RULES")]
    rules: Option<PathBuf>,

    /// Show the table and chosen actions each turn
    #[arg(long)]
    visualize: bool,

    /// Stop a round after this many decisions
    #[arg(long, env = "UNOHUB_MAX_TURNS")]
    max_turns: Option<usize>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let rules = match &cli.rules {
        Some(path) => load_rules(path)?,
        None => RulesConfig::default(),
    };

    let mut bots: Vec<Box<dyn Bot>> = vec![
        create_bot_from_spec(&cli.p1, 0, cli.seed)?,
        create_bot_from_spec(&cli.p2, 1, cli.seed)?,
    ];
    let labels = [label_for_spec(&cli.p1), label_for_spec(&cli.p2)];

    tracing::info!(
        mode = %cli.mode,
        games = cli.games,
        p1 = %labels[0],
        p2 = %labels[1],
        "starting simulation"
    );

    let mut wins = [0usize; 2];
    let mut unfinished = 0usize;
    for round in 0..cli.games {
        let mut game = Game::builder(cli.mode)
            .with_seed(cli.seed.wrapping_add(round as u64))
            .with_opponent(Opponent::Local)
            .with_rules(rules.clone())
            .build()?;
        match play_round(&mut game, &mut bots, &cli)? {
            Some(winner) => wins[winner.index()] += 1,
            None => unfinished += 1,
        }
        game.check_conservation()?;
    }

    println!("Mode: {}", cli.mode);
    for seat in Seat::ALL {
        println!("{seat} ({}): {} win(s)", labels[seat.index()], wins[seat.index()]);
    }
    if unfinished > 0 {
        println!("Unfinished rounds: {unfinished}");
    }
    Ok(())
}

fn play_round(
    game: &mut Game,
    bots: &mut [Box<dyn Bot>],
    cli: &Cli,
) -> Result<Option<Seat>, Box<dyn Error>> {
    let mut turns = 0usize;
    loop {
        let seat = match game.phase() {
            TurnPhase::AwaitingPlay(seat) | TurnPhase::ChoosingColor(seat) => seat,
            TurnPhase::RoundEnded => break,
        };
        if let Some(limit) = cli.max_turns {
            if turns >= limit {
                println!("Max turn limit {limit} reached. Stopping round.");
                return Ok(None);
            }
        }
        if cli.visualize {
            let view = game.state_view(seat);
            println!("{}", render_state(&view));
        }
        let outcome = game.step_with(seat, bots[seat.index()].as_mut())?;
        if cli.visualize {
            if let Some(event) = game.history().next() {
                println!("{seat}: {event:?} ({outcome:?})\n");
            }
        }
        turns += 1;
    }

    if let Some(winner) = game.winner() {
        if cli.visualize {
            let view = game.state_view(winner);
            println!("{}", render_state(&view));
        }
        println!("Round finished after {turns} decisions. Winner: {winner}.");
    }
    Ok(game.winner())
}

