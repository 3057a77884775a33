//! Line detection shared by the 9x9 cell grid and the 3x3 meta grid.

use crate::board::{GridResult, Player};

/// Anything that can sit in a 3x3 grid and be owned by a player.
///
/// Implemented for raw cells (`Option<Player>`) and for resolved sub-grids
/// (`GridResult`), so the one [`line_winner`] routine decides both a sub-grid
/// and the whole game. A drawn sub-grid has no owner and never contributes to
/// a meta line.
pub trait LineCell: Copy {
    fn owner(self) -> Option<Player>;
}

impl LineCell for Option<Player> {
    fn owner(self) -> Option<Player> {
        self
    }
}

impl LineCell for GridResult {
    fn owner(self) -> Option<Player> {
        match self {
            GridResult::Won(player) => Some(player),
            GridResult::Open | GridResult::Draw => None,
        }
    }
}

/// Returns the player owning a full line (row, column or diagonal) of the
/// given 3x3 grid, or `None` if no line is owned.
pub fn line_winner<C: LineCell>(grid: &[[C; 3]; 3]) -> Option<Player> {
    for i in 0..3 {
        if let Some(player) = same_owner(grid[i][0], grid[i][1], grid[i][2]) {
            return Some(player);
        }
        if let Some(player) = same_owner(grid[0][i], grid[1][i], grid[2][i]) {
            return Some(player);
        }
    }
    if let Some(player) = same_owner(grid[0][0], grid[1][1], grid[2][2]) {
        return Some(player);
    }
    same_owner(grid[0][2], grid[1][1], grid[2][0])
}

fn same_owner<C: LineCell>(a: C, b: C, c: C) -> Option<Player> {
    match (a.owner(), b.owner(), c.owner()) {
        (Some(x), Some(y), Some(z)) if x == y && y == z => Some(x),
        _ => None,
    }
}
