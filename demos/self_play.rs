//! Plays one full game of Ultimate Tic-Tac-Toe, both sides driven by the
//! flat Monte Carlo search. Run with `RUST_LOG=debug` for per-turn stats.

use std::time::Instant;

use uttt_mc::board::{Coord, GameState, GridResult, Player};
use uttt_mc::playout::resolve_moveless;
use uttt_mc::search::{FlatMonteCarlo, budget_for_turn};

fn main() {
    env_logger::init();

    let mut state = GameState::new();
    let mut last: Option<Coord> = None;
    let mut search = FlatMonteCarlo::builder().build();

    let mut turn: u32 = 0;
    loop {
        if state.winner() != GridResult::Open {
            break;
        }
        if state.legal_moves(last).is_empty() {
            break;
        }

        // A tenth of the real per-turn budget keeps the demo snappy.
        let deadline = Instant::now() + budget_for_turn(turn) / 10;
        let mover = state.next_player();
        let chosen = search.choose_move(&state, last, deadline);
        println!("turn {turn}: {mover:?} plays {chosen}");

        state = state.apply(chosen);
        last = Some(chosen);
        turn += 1;
    }

    let result = if state.winner() != GridResult::Open {
        state.winner()
    } else {
        resolve_moveless(&state)
    };

    println!("\n{state}");
    match result {
        GridResult::Won(Player::One) => println!("X wins"),
        GridResult::Won(Player::Two) => println!("O wins"),
        _ => println!("draw"),
    }
}
