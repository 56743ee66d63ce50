use battleship::{
    best_strike_line, init_logging, AiPlayer, Difficulty, GameSession, Player, SessionStore,
    Side, Skeleton,
};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve JSON requests on stdin, one per line; replies go to stdout.
    Repl {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Watch the computer play the human side of one game.
    Autoplay {
        #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Round on which the human side spends its air strike.
        #[arg(long)]
        air_strike_turn: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Repl { seed } => {
            let store = match seed {
                Some(s) => SessionStore::with_seed(s),
                None => SessionStore::new(),
            };
            let skeleton = Skeleton::new(store);
            skeleton
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
        }
        Commands::Autoplay {
            difficulty,
            seed,
            air_strike_turn,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let session_seed: u64 = rng.random();
            autoplay(difficulty, session_seed, &mut rng, air_strike_turn)?;
        }
    }
    Ok(())
}

fn autoplay(
    difficulty: Difficulty,
    session_seed: u64,
    rng: &mut SmallRng,
    air_strike_turn: Option<usize>,
) -> anyhow::Result<()> {
    let mut session = GameSession::with_seed("autoplay", difficulty, session_seed)?;
    let mut human = AiPlayer::new(Difficulty::Hard);
    let fleet = human.place_ships(rng)?;
    session.place_fleet(&fleet)?;
    session.start_play()?;

    let mut round = 0;
    while !session.is_over() {
        round += 1;
        let history = session.opponent_board().shot_history();
        let strike = (air_strike_turn == Some(round))
            .then(|| best_strike_line(&history))
            .flatten();
        if let Some(line) = strike {
            let turn = session.fire_air_strike(line)?;
            println!(
                "round {round}: air strike on {line}: {} hits, {} sunk",
                turn.strike.hit_count(),
                turn.strike.sunk.len()
            );
            human.handle_air_strike(&turn.strike, &session.opponent_board().shot_history());
            continue;
        }
        let target = human
            .select_target(rng, &history)
            .ok_or_else(|| anyhow::anyhow!("no cell left to shoot"))?;
        let turn = session.fire_shot(target)?;
        let outcome = match (&turn.player.sunk, turn.player.hit) {
            (Some(sunk), _) => format!("sank the {}", sunk.kind),
            (None, true) => "hit".to_string(),
            (None, false) => "miss".to_string(),
        };
        println!("round {round}: fire at {target}: {outcome}");
        human.handle_shot_result(&turn.player, &session.opponent_board().shot_history());
        if let Some(reply) = &turn.ai {
            println!(
                "          computer fires at {}: {}",
                reply.coord,
                if reply.hit { "hit" } else { "miss" }
            );
        }
    }

    println!("\nYour board:\n{:?}", session.player_board());
    println!("Computer board:\n{:?}", session.opponent_board());
    match session.winner() {
        Some(Side::Player) => println!("You win after {round} rounds."),
        Some(Side::Opponent) => println!("The computer wins after {round} rounds."),
        None => {}
    }
    Ok(())
}
