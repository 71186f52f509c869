use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use pull_2048::engine::{Direction, GameState};
use pull_2048::session::Session;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug, Parser)]
#[command(name = "pull-2048", version, about = "Play 2048 in the terminal")]
struct Args {
    /// Seed for tile spawns (defaults to OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Play uniformly random moves instead of reading commands from stdin
    #[arg(long)]
    autoplay: bool,

    /// Stop after this many accepted moves
    #[arg(long, value_name = "N")]
    max_moves: Option<u32>,

    /// Print the final state as JSON on exit
    #[arg(long)]
    json: bool,

    /// Only print the final summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(&mut rng);
    info!("new game (seed {:?})", args.seed);

    if args.autoplay {
        autoplay(&mut session, &mut rng, &args);
    } else {
        interactive(&mut session, &mut rng, &args)?;
    }

    let state = session.state();
    println!(
        "Moves: {} | score: {} | highest tile: {}",
        session.moves(),
        state.score,
        state.board.highest_tile().unwrap_or(0)
    );
    if args.json {
        let json = serde_json::to_string(state).context("failed to serialize final state")?;
        println!("{json}");
    }
    Ok(())
}

fn reached_limit(session: &Session, args: &Args) -> bool {
    args.max_moves.is_some_and(|limit| session.moves() >= limit)
}

fn autoplay(session: &mut Session, rng: &mut StdRng, args: &Args) {
    if !args.quiet {
        print_state(session.state());
    }
    while !session.lost() && !reached_limit(session, args) {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        if session.apply(direction, rng) && !args.quiet {
            println!("> {direction}");
            print_state(session.state());
        }
    }
    if session.lost() && !args.quiet {
        println!("You Lost");
    }
}

fn interactive(session: &mut Session, rng: &mut StdRng, args: &Args) -> anyhow::Result<()> {
    println!("Commands: up/down/left/right (or wasd, hjkl), r = restart, q = quit");
    print_state(session.state());

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command from stdin")?;
        let command = line.trim();
        match command {
            "" => continue,
            "q" | "quit" => break,
            "r" | "restart" => session.restart(rng),
            _ => match command.parse::<Direction>() {
                Ok(direction) => {
                    if !session.apply(direction, rng) {
                        println!("Invalid Move");
                    }
                }
                Err(e) => {
                    debug!("bad command: {e}");
                    println!("{e}");
                    continue;
                }
            },
        }
        print_state(session.state());
        if session.lost() {
            println!("You Lost (r = restart, q = quit)");
        }
        if reached_limit(session, args) {
            break;
        }
    }
    Ok(())
}

fn print_state(state: &GameState) {
    println!("{state}");
}
