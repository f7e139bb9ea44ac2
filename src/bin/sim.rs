//! Plays a full match against the built-in bot, with a second `BotStrategy`
//! standing in for the human seat, and prints a JSON summary.

use anyhow::{anyhow, Context};
use battleship_match::{
    init_logging, BotStrategy, MatchConfig, MemoryStore, Mode, PlacementMode, Seat, Session,
    TurnPolicy,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible matches (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Round wins needed to take the match.
    #[arg(long, default_value_t = 3)]
    rounds_to_win: u32,
    /// Let a hit earn another shot instead of passing the turn.
    #[arg(long)]
    hit_goes_again: bool,
}

const MATCH_ID: &str = "sim";

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let config = MatchConfig {
        mode: Mode::VsBot,
        placement: PlacementMode::Random,
        turn_policy: if cli.hit_goes_again {
            TurnPolicy::HitGoesAgain
        } else {
            TurnPolicy::Alternate
        },
    };

    let mut store = MemoryStore::new();
    let session = Session::new(config, cli.rounds_to_win, &mut rng).map_err(|e| anyhow!(e))?;
    store.save(MATCH_ID, &session)?;

    let mut rounds = Vec::new();
    loop {
        let mut session = store
            .load(MATCH_ID)?
            .context("session disappeared from the store")?;
        let mut player = BotStrategy::new();
        let mut shots = 0usize;

        while !session.game().is_round_over() {
            let game = session.game_mut();
            let coord = player
                .select_target(game.board(Seat::Second), &mut rng)
                .context("no open cells left on an unfinished board")?;
            let report = game
                .attack(Seat::First, coord, &mut rng)
                .map_err(|e| anyhow!(e))?;
            player.record_outcome(coord, report.outcome, game.board(Seat::Second));
            shots += 1 + report.bot_moves.len();
        }

        let winner = session.record_round().context("finished round has no winner")?;
        rounds.push(json!({
            "winner": winner.index(),
            "shots": shots,
            "score": [session.wins(Seat::First), session.wins(Seat::Second)],
        }));
        store.save(MATCH_ID, &session)?;

        if let Some(champion) = session.match_winner() {
            let result = json!({
                "rounds": rounds,
                "winner": champion.index(),
                "rounds_to_win": session.rounds_to_win(),
            });
            println!("{}", serde_json::to_string(&result)?);
            return Ok(());
        }
        session.next_round(&mut rng).map_err(|e| anyhow!(e))?;
        store.save(MATCH_ID, &session)?;
    }
}
