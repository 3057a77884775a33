use thiserror::Error;

/// Errors produced while folding externally reported turn data into the engine.
///
/// These only occur at the boundary with the turn protocol; inside the crate the
/// `Player` and `Coord` types make the corresponding states unrepresentable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A player identity outside {1, 2} was reported.
    #[error("unknown player id {0}, expected 1 or 2")]
    UnknownPlayer(i32),

    /// A coordinate line did not have the `"row col"` shape, or was out of range.
    #[error("malformed coordinate {0:?}, expected \"row col\" with both in 0..=8")]
    InvalidCoord(String),
}
