//! Uniform-random playouts from an arbitrary position to a terminal result.

use rand::Rng;

use crate::board::{Coord, GameState, GridResult, Player};

/// Plays uniformly random legal moves from `state` until the game ends and
/// returns the terminal result (never [`GridResult::Open`]).
///
/// The caller's state is untouched: the loop clones it once into a scratch
/// copy and mutates that per ply. Every ply claims a cell, so the loop runs
/// at most 81 iterations. A position with no legal move left and no meta
/// line is settled by [`resolve_moveless`].
pub fn play_until_end<R: Rng>(state: &GameState, last: Option<Coord>, rng: &mut R) -> GridResult {
    let mut scratch = state.clone();
    let mut last = last;
    while scratch.winner() == GridResult::Open {
        let moves = scratch.legal_moves(last);
        if moves.is_empty() {
            return resolve_moveless(&scratch);
        }
        let picked = moves[rng.random_range(0..moves.len())];
        scratch.apply_in_place(picked);
        last = Some(picked);
    }
    scratch.winner()
}

/// Settles a position in which no legal move remains but no meta line exists:
/// whoever owns strictly more sub-grids wins, otherwise the game is drawn.
/// Drawn sub-grids count for neither player.
///
/// # Panics
///
/// Panics if any sub-grid is still marked open. With no move left every open
/// sub-grid must be full, and a full sub-grid is always resolved by
/// [`GameState::apply`], so an open entry here means the meta bookkeeping is
/// internally inconsistent.
pub fn resolve_moveless(state: &GameState) -> GridResult {
    let mut owned_by_one = 0;
    let mut owned_by_two = 0;
    for grid_row in 0..3 {
        for grid_col in 0..3 {
            match state.meta[grid_row][grid_col] {
                GridResult::Won(Player::One) => owned_by_one += 1,
                GridResult::Won(Player::Two) => owned_by_two += 1,
                GridResult::Draw => {}
                GridResult::Open => panic!(
                    "no legal move left but sub-grid ({grid_row}, {grid_col}) is still open:\n{state}"
                ),
            }
        }
    }

    if owned_by_one > owned_by_two {
        GridResult::Won(Player::One)
    } else if owned_by_two > owned_by_one {
        GridResult::Won(Player::Two)
    } else {
        GridResult::Draw
    }
}
