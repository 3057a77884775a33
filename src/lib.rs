//! A small flat Monte Carlo engine for Ultimate Tic-Tac-Toe.
//!
//! The engine scores every legal move of a position by playing many uniformly
//! random games to completion and picks the move with the best win statistics,
//! all within a per-turn wall-clock budget. There is no deeper tree search:
//! one ply of candidates, random playouts below.
//!
//! The rules quirks of Ultimate Tic-Tac-Toe live in [`board`]: a move decides
//! which sub-grid the opponent must answer in, a resolved target sub-grid
//! frees the whole board, and a board that fills up without a meta line goes
//! to whoever owns more sub-grids.
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use uttt_mc::board::{Coord, GameState};
//! use uttt_mc::search::FlatMonteCarlo;
//!
//! // Fold the opponent's opening move into a fresh game.
//! let state = GameState::new().apply(Coord::new(4, 4));
//! let last = Some(Coord::new(4, 4));
//!
//! // A seeded search replays identically; production code keeps the
//! // OS-seeded default and passes a deadline to `choose_move` instead.
//! let mut search = FlatMonteCarlo::builder()
//!     .with_rng(StdRng::seed_from_u64(42))
//!     .build();
//! let chosen = search.choose_move_n(&state, last, 2_000);
//!
//! assert!(state.legal_moves(last).contains(&chosen));
//! ```

/// The game model: players, coordinates, the 9x9 state and its transitions.
pub mod board;
/// Boundary errors for externally reported players and coordinates.
pub mod error;
/// The shared 3x3 line-winner routine used at both board scales.
pub mod lines;
/// Random playouts to termination, including the moveless tie-break.
pub mod playout;
/// The time-bounded flat Monte Carlo search.
pub mod search;
