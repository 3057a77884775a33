use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::lines::line_winner;

/// One of the two players.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the opposing player.
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl TryFrom<i32> for Player {
    type Error = ParseError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(ParseError::UnknownPlayer(other)),
        }
    }
}

/// The resolved status of a 3x3 grid, at either scale.
///
/// The same type describes one of the nine sub-grids (stored in
/// [`GameState`]'s meta grid) and the overall game. `Open` means play in that
/// grid can still continue.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GridResult {
    Open,
    Won(Player),
    Draw,
}

/// A board position, `row` and `col` both in `0..=8`.
///
/// The containing sub-grid is `(row / 3, col / 3)`; the sub-grid the opponent
/// is sent to by this move is `(row % 3, col % 3)`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub fn new(row: u8, col: u8) -> Coord {
        debug_assert!(row < 9 && col < 9);
        Coord { row, col }
    }

    /// The sub-grid containing this position, as `(grid_row, grid_col)`.
    pub(crate) fn sub_grid(self) -> (usize, usize) {
        (self.row as usize / 3, self.col as usize / 3)
    }

    /// The sub-grid this move sends the opponent to, as `(grid_row, grid_col)`.
    pub(crate) fn forced_sub_grid(self) -> (usize, usize) {
        (self.row as usize % 3, self.col as usize % 3)
    }

    /// Parses an opponent move as reported by the turn protocol.
    ///
    /// `"-1 -1"` is the protocol's "no move yet" report on the very first turn
    /// and maps to `None`; anything else must be a valid `"row col"` pair.
    pub fn parse_reported(line: &str) -> Result<Option<Coord>, ParseError> {
        let mut parts = line.split_whitespace();
        let bad = || ParseError::InvalidCoord(line.to_string());
        let row: i32 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        let col: i32 = parts.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
        if parts.next().is_some() {
            return Err(bad());
        }
        if row == -1 && col == -1 {
            return Ok(None);
        }
        if !(0..9).contains(&row) || !(0..9).contains(&col) {
            return Err(bad());
        }
        Ok(Some(Coord::new(row as u8, col as u8)))
    }
}

impl FromStr for Coord {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Coord::parse_reported(line)?.ok_or_else(|| ParseError::InvalidCoord(line.to_string()))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// The full game position: the 9x9 cell grid, the 3x3 meta grid of resolved
/// sub-grids, the player to move, and the overall result.
///
/// A cell, once claimed, is never cleared; meta entries and the winner only
/// ever move from `Open` to a terminal value. All game-over detection except
/// the moveless tie-break (see [`crate::playout::resolve_moveless`]) happens
/// inside [`GameState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) cells: [[Option<Player>; 9]; 9],
    pub(crate) meta: [[GridResult; 3]; 3],
    pub(crate) next_player: Player,
    pub(crate) winner: GridResult,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl GameState {
    /// Creates an empty board with [`Player::One`] to move.
    pub fn new() -> GameState {
        GameState {
            cells: [[None; 9]; 9],
            meta: [[GridResult::Open; 3]; 3],
            next_player: Player::One,
            winner: GridResult::Open,
        }
    }

    /// The player whose move [`GameState::apply`] will record next.
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    /// Overrides the player to move. Only needed when reconstructing a
    /// position; normal play alternates through [`GameState::apply`].
    pub fn set_next_player(&mut self, player: Player) {
        self.next_player = player;
    }

    /// The overall result; `Open` while the game is still in progress.
    pub fn winner(&self) -> GridResult {
        self.winner
    }

    /// Applies a move for the player to move, returning the successor state.
    ///
    /// This is the canonical transition: it claims the cell, flips the player
    /// to move, resolves the containing sub-grid (won, drawn when full, or
    /// still open) and re-checks the meta grid for an overall winner. The
    /// winner stays `Open` when the board runs out of moves without a meta
    /// line; that case is resolved by the playout loop, which is the only
    /// place that knows no legal move remains.
    pub fn apply(&self, mv: Coord) -> GameState {
        let mut next = self.clone();
        next.apply_in_place(mv);
        next
    }

    /// In-place variant of [`GameState::apply`], used by the playout inner
    /// loop to avoid a clone per ply. Produces the same result as `apply`.
    pub(crate) fn apply_in_place(&mut self, mv: Coord) {
        let (row, col) = (mv.row as usize, mv.col as usize);
        debug_assert!(self.cells[row][col].is_none(), "cell {mv} already claimed");

        let mover = self.next_player;
        self.cells[row][col] = Some(mover);
        self.next_player = mover.other();

        let (grid_row, grid_col) = mv.sub_grid();
        let sub = self.sub_grid_cells(grid_row, grid_col);
        match line_winner(&sub) {
            Some(owner) => {
                self.meta[grid_row][grid_col] = GridResult::Won(owner);
                if let Some(overall) = line_winner(&self.meta) {
                    self.winner = GridResult::Won(overall);
                }
            }
            None => {
                // A full sub-grid without a line is drawn. A drawn sub-grid
                // can never complete a meta line, so no meta re-check here.
                if sub.iter().flatten().all(|cell| cell.is_some()) {
                    self.meta[grid_row][grid_col] = GridResult::Draw;
                }
            }
        }
    }

    /// All legal moves given the opponent's last move.
    ///
    /// `None` (no prior move), or a last move whose target sub-grid is already
    /// resolved, opens up every empty cell of every still-open sub-grid.
    /// Otherwise only the targeted sub-grid is playable. An empty result is a
    /// valid terminal signal, not an error. Moves are enumerated in row-major
    /// order over sub-grids and cells; the search's tie-break relies on this
    /// order being stable.
    pub fn legal_moves(&self, last: Option<Coord>) -> Vec<Coord> {
        let mut moves = Vec::with_capacity(81);
        if let Some(last) = last {
            let (grid_row, grid_col) = last.forced_sub_grid();
            if self.meta[grid_row][grid_col] == GridResult::Open {
                self.push_sub_grid_moves(grid_row, grid_col, &mut moves);
                return moves;
            }
        }
        for grid_row in 0..3 {
            for grid_col in 0..3 {
                if self.meta[grid_row][grid_col] == GridResult::Open {
                    self.push_sub_grid_moves(grid_row, grid_col, &mut moves);
                }
            }
        }
        moves
    }

    fn push_sub_grid_moves(&self, grid_row: usize, grid_col: usize, moves: &mut Vec<Coord>) {
        for row in grid_row * 3..grid_row * 3 + 3 {
            for col in grid_col * 3..grid_col * 3 + 3 {
                if self.cells[row][col].is_none() {
                    moves.push(Coord::new(row as u8, col as u8));
                }
            }
        }
    }

    fn sub_grid_cells(&self, grid_row: usize, grid_col: usize) -> [[Option<Player>; 3]; 3] {
        let mut sub = [[None; 3]; 3];
        for (i, sub_row) in sub.iter_mut().enumerate() {
            for (j, cell) in sub_row.iter_mut().enumerate() {
                *cell = self.cells[grid_row * 3 + i][grid_col * 3 + j];
            }
        }
        sub
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "---+---+---")?;
            }
            for col in 0..9 {
                if col > 0 && col % 3 == 0 {
                    write!(f, "|")?;
                }
                let glyph = match self.cells[row][col] {
                    None => '.',
                    Some(Player::One) => 'X',
                    Some(Player::Two) => 'O',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
