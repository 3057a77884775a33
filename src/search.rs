//! Time-bounded flat Monte Carlo evaluation of the legal root moves.
//!
//! Each candidate move is scored by playing many uniformly random games to
//! completion from the position it leads to. No tree is grown: the search is
//! one ply deep and the playout statistics alone rank the candidates.

use std::time::{Duration, Instant};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Coord, GameState, GridResult};
use crate::playout::play_until_end;

/// How many playouts run between two clock reads. Polling the clock this
/// rarely keeps its overhead negligible, at the cost of overshooting the
/// deadline by up to one interval's worth of playouts.
pub const DEADLINE_CHECK_INTERVAL: u32 = 500;

/// Weight of the win rate relative to the draw rate in a candidate's score.
/// Large enough that any nonzero win rate outranks any draw rate.
pub const WIN_WEIGHT: f64 = 1000.0;

/// Returns the simulation budget for the given turn (0-based).
///
/// 90% of a 1 second allowance on the first two turns, which absorb one-time
/// startup cost, then 90% of 100 ms in steady state. The margin keeps the
/// overshoot of the deadline poll safely inside the hard external turn limit.
pub fn budget_for_turn(turn: u32) -> Duration {
    let base_ms: u64 = if turn < 2 { 1000 } else { 100 };
    Duration::from_millis(base_ms * 90 / 100)
}

/// Playout statistics and score of one candidate root move.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMove {
    pub coord: Coord,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    /// `wins/games * WIN_WEIGHT + draws/games`, or `f64::NEG_INFINITY` for a
    /// candidate the deadline cut off before its first playout. Never NaN.
    pub score: f64,
}

/// Flat Monte Carlo search over the legal moves of a position.
///
/// The random source is injected so that fixed seeds reproduce identical
/// searches; production callers default to an OS-seeded [`StdRng`].
pub struct FlatMonteCarlo<R: Rng = StdRng> {
    rng: R,
}

impl FlatMonteCarlo<StdRng> {
    /// Returns a builder with an OS-seeded random source.
    pub fn builder() -> FlatMonteCarloBuilder<StdRng> {
        FlatMonteCarloBuilder {
            rng: StdRng::from_os_rng(),
        }
    }
}

/// A builder for [`FlatMonteCarlo`], mainly there to swap in a seeded
/// random source.
pub struct FlatMonteCarloBuilder<R: Rng> {
    rng: R,
}

impl<R: Rng> FlatMonteCarloBuilder<R> {
    /// Sets the random source driving the playouts.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> FlatMonteCarloBuilder<R2> {
        FlatMonteCarloBuilder { rng }
    }

    pub fn build(self) -> FlatMonteCarlo<R> {
        FlatMonteCarlo { rng: self.rng }
    }
}

impl<R: Rng> FlatMonteCarlo<R> {
    /// Picks the best move, simulating until `deadline`.
    ///
    /// Candidates are visited round-robin, one playout per visit, so the
    /// sample counts stay even; the clock is read once per
    /// [`DEADLINE_CHECK_INTERVAL`] playouts. If the deadline expires before a
    /// candidate's first playout, that candidate is never preferred over a
    /// sampled one.
    ///
    /// # Panics
    ///
    /// Panics if the position has no legal move; callers must not ask for a
    /// move in a finished position.
    pub fn choose_move(&mut self, state: &GameState, last: Option<Coord>, deadline: Instant) -> Coord {
        let started = Instant::now();
        let ranked = self.rank_until(state, last, |played| {
            played % DEADLINE_CHECK_INTERVAL != 0 || Instant::now() < deadline
        });
        let total: u32 = ranked.iter().map(|candidate| candidate.games).sum();
        debug!(
            "ran {} playouts in {:?}, best {} (score {:.3})",
            total,
            started.elapsed(),
            ranked[0].coord,
            ranked[0].score,
        );
        ranked[0].coord
    }

    /// Like [`FlatMonteCarlo::choose_move`] but runs exactly `playouts`
    /// playouts instead of racing a clock. Deterministic under a seeded
    /// random source, which is what the tests and the demo rely on.
    pub fn choose_move_n(&mut self, state: &GameState, last: Option<Coord>, playouts: u32) -> Coord {
        self.rank_moves(state, last, playouts)[0].coord
    }

    /// Scores every legal move with exactly `playouts` playouts spread
    /// round-robin, returning the candidates sorted by descending score.
    /// The sort is stable, so equally scored candidates keep their
    /// generation order and the first one is the deterministic pick.
    pub fn rank_moves(
        &mut self,
        state: &GameState,
        last: Option<Coord>,
        playouts: u32,
    ) -> Vec<ScoredMove> {
        self.rank_until(state, last, |played| played < playouts)
    }

    fn rank_until(
        &mut self,
        state: &GameState,
        last: Option<Coord>,
        mut keep_going: impl FnMut(u32) -> bool,
    ) -> Vec<ScoredMove> {
        let actions = state.legal_moves(last);
        assert!(!actions.is_empty(), "no legal move to search from:\n{state}");
        let root_player = state.next_player();

        let mut tallies = vec![(0u32, 0u32, 0u32); actions.len()];
        let mut played: u32 = 0;
        while keep_going(played) {
            let index = played as usize % actions.len();
            let action = actions[index];
            let child = state.apply(action);
            let result = play_until_end(&child, Some(action), &mut self.rng);

            let (games, wins, draws) = &mut tallies[index];
            *games += 1;
            if result == GridResult::Won(root_player) {
                *wins += 1;
            } else if result == GridResult::Draw {
                *draws += 1;
            }
            played += 1;
        }

        let mut scored: Vec<ScoredMove> = actions
            .into_iter()
            .zip(tallies)
            .map(|(coord, (games, wins, draws))| ScoredMove {
                coord,
                games,
                wins,
                draws,
                score: score(games, wins, draws),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }
}

fn score(games: u32, wins: u32, draws: u32) -> f64 {
    if games == 0 {
        return f64::NEG_INFINITY;
    }
    let games = games as f64;
    wins as f64 / games * WIN_WEIGHT + draws as f64 / games
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::board::{Coord, GameState, GridResult, Player};
    use crate::search::{FlatMonteCarlo, budget_for_turn};

    fn seeded(seed: u64) -> FlatMonteCarlo<StdRng> {
        FlatMonteCarlo::builder()
            .with_rng(StdRng::seed_from_u64(seed))
            .build()
    }

    #[test]
    fn chosen_move_is_always_legal() {
        // arrange
        let state = GameState::new().apply(Coord::new(4, 4));
        let last = Some(Coord::new(4, 4));

        // act
        let chosen = seeded(3).choose_move_n(&state, last, 200);

        // assert
        assert!(state.legal_moves(last).contains(&chosen));
    }

    #[test]
    fn round_robin_spreads_playouts_evenly() {
        // arrange
        let state = GameState::new().apply(Coord::new(4, 4));
        let last = Some(Coord::new(4, 4));
        let candidates = state.legal_moves(last).len() as u32;

        // act
        let ranked = seeded(4).rank_moves(&state, last, candidates * 3);

        // assert
        assert_eq!(ranked.len(), candidates as usize);
        for candidate in &ranked {
            assert_eq!(candidate.games, 3);
        }
    }

    #[test]
    fn unsampled_candidates_fall_back_to_generation_order() {
        // arrange
        let state = GameState::new();

        // act: zero playouts, every candidate unsampled
        let chosen = seeded(5).choose_move_n(&state, None, 0);

        // assert: stable tie-break picks the first enumerated move
        assert_eq!(chosen, Coord::new(0, 0));
    }

    #[test]
    fn expired_deadline_still_returns_a_legal_move() {
        let state = GameState::new();
        let chosen = seeded(6).choose_move(&state, None, Instant::now());
        assert_eq!(chosen, Coord::new(0, 0));
    }

    #[test]
    fn immediate_win_is_preferred() {
        // arrange: One owns the top meta row except sub-grid (0, 2), where
        // the column through (0, 8) and (1, 8) needs one more cell. Two
        // threatens the bottom row of that sub-grid, so hesitating loses
        // games. The forced target of the last move is sub-grid (0, 2).
        let mut state = GameState::new();
        for col in 0..6 {
            state.set_next_player(Player::One);
            state.apply_in_place(Coord::new(0, col));
        }
        assert_eq!(state.meta[0][0], GridResult::Won(Player::One));
        assert_eq!(state.meta[0][1], GridResult::Won(Player::One));
        for (player, row, col) in [
            (Player::One, 0, 8),
            (Player::One, 1, 8),
            (Player::Two, 2, 6),
            (Player::Two, 2, 7),
        ] {
            state.set_next_player(player);
            state.apply_in_place(Coord::new(row, col));
        }
        state.set_next_player(Player::One);
        let last = Some(Coord::new(3, 5));

        // act
        let mut search = seeded(7);
        let ranked = search.rank_moves(&state, last, 500);

        // assert: (2, 8) wins on the spot, so its win rate is exactly 1
        assert_eq!(ranked[0].coord, Coord::new(2, 8));
        assert_eq!(ranked[0].wins, ranked[0].games);
        let replay = state.apply(Coord::new(2, 8));
        assert_eq!(replay.winner(), GridResult::Won(Player::One));
    }

    #[test]
    fn early_turns_get_the_larger_budget() {
        assert_eq!(budget_for_turn(0), Duration::from_millis(900));
        assert_eq!(budget_for_turn(1), Duration::from_millis(900));
        assert_eq!(budget_for_turn(2), Duration::from_millis(90));
        assert_eq!(budget_for_turn(40), Duration::from_millis(90));
    }
}
