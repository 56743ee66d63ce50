use battleship::{best_strike_line, init_logging, AiPlayer, Difficulty, GameSession, Player, Side};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Play many games with a computer standing in for the human side and
/// print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: u32,
    /// Difficulty of the computer opponent.
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
    /// Difficulty of the stand-in for the human side.
    #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
    player: Difficulty,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Round on which the human side spends its air strike.
    #[arg(long)]
    air_strike_turn: Option<usize>,
}

struct Outcome {
    winner: Side,
    player_shots: usize,
    ai_shots: usize,
}

fn play(args: &Args, game: u32) -> anyhow::Result<Outcome> {
    let seed = args.seed.wrapping_add(u64::from(game).wrapping_mul(2));
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session =
        GameSession::with_seed(format!("sim-{game}"), args.difficulty, seed.wrapping_add(1))?;
    let mut player = AiPlayer::new(args.player);
    let fleet = player.place_ships(&mut rng)?;
    session.place_fleet(&fleet)?;
    session.start_play()?;

    let mut round = 0;
    while !session.is_over() {
        round += 1;
        let history = session.opponent_board().shot_history();
        let strike = (args.air_strike_turn == Some(round))
            .then(|| best_strike_line(&history))
            .flatten();
        if let Some(line) = strike {
            let turn = session.fire_air_strike(line)?;
            player.handle_air_strike(&turn.strike, &session.opponent_board().shot_history());
            continue;
        }
        let target = player
            .select_target(&mut rng, &history)
            .ok_or_else(|| anyhow::anyhow!("game {game}: no cell left to shoot"))?;
        let turn = session.fire_shot(target)?;
        player.handle_shot_result(&turn.player, &session.opponent_board().shot_history());
    }

    let winner = session
        .winner()
        .ok_or_else(|| anyhow::anyhow!("game {game}: finished without a winner"))?;
    Ok(Outcome {
        winner,
        player_shots: session.player_moves().len(),
        ai_shots: session.ai_moves().len(),
    })
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut player_wins = 0u32;
    let mut ai_wins = 0u32;
    let mut player_shots = 0usize;
    let mut ai_shots = 0usize;
    for game in 0..args.games {
        let outcome = play(&args, game)?;
        match outcome.winner {
            Side::Player => player_wins += 1,
            Side::Opponent => ai_wins += 1,
        }
        player_shots += outcome.player_shots;
        ai_shots += outcome.ai_shots;
    }

    let games = f64::from(args.games.max(1));
    let result = json!({
        "games": args.games,
        "difficulty": args.difficulty,
        "player_difficulty": args.player,
        "seed": args.seed,
        "player_wins": player_wins,
        "ai_wins": ai_wins,
        "avg_player_shots": player_shots as f64 / games,
        "avg_ai_shots": ai_shots as f64 / games,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
