use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Exponent, Score, Turn, SIZE};

/// Largest exponent a validated state may hold. One more merge still fits a `u64` value.
pub const MAX_EXPONENT: Exponent = 62;

const CELL_WIDTH: usize = 8;

/// A numbered tile. Its value is `2^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub exponent: Exponent,
    /// Turn on which this tile was spawned or last produced by a merge.
    pub created_on_turn: Turn,
}

impl Tile {
    #[inline]
    pub fn new(exponent: Exponent, created_on_turn: Turn) -> Self {
        Tile { exponent, created_on_turn }
    }

    /// The displayed value, e.g. 2, 4, 8, ...
    #[inline]
    pub fn value(self) -> u64 {
        1u64.checked_shl(u32::from(self.exponent)).unwrap_or(u64::MAX)
    }

    /// True if the tile appeared on `turn`; the presentation layer emphasizes these.
    #[inline]
    pub fn is_new(self, turn: Turn) -> bool {
        self.created_on_turn == turn
    }
}

/// Malformed state handed in from outside the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("board has {rows} rows, expected {}", SIZE)]
    RowCount { rows: usize },
    #[error("row {row} has {len} cells, expected {}", SIZE)]
    RowLength { row: usize, len: usize },
    #[error("tile at ({row}, {col}) has exponent 0")]
    ZeroExponent { row: usize, col: usize },
    #[error("tile at ({row}, {col}) has exponent {exponent}, above {}", MAX_EXPONENT)]
    ExponentTooLarge { row: usize, col: usize, exponent: Exponent },
}

/// 4x4 grid of optional tiles, indexed `(row, col)` from the top-left corner.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Option<Tile>>>")]
pub struct Board([[Option<Tile>; SIZE]; SIZE]);

impl Board {
    /// A board with every cell empty.
    pub const EMPTY: Board = Board([[None; SIZE]; SIZE]);

    #[inline]
    pub fn from_rows(rows: [[Option<Tile>; SIZE]; SIZE]) -> Self {
        Board(rows)
    }

    /// Build a board from tile exponents (0 = empty), all created on `turn`.
    ///
    /// ```
    /// use pull_2048::engine::Board;
    /// let b = Board::from_exponents([[1, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2]], 0);
    /// assert_eq!(b.tile_count(), 2);
    /// ```
    pub fn from_exponents(exponents: [[Exponent; SIZE]; SIZE], turn: Turn) -> Self {
        let mut board = Board::EMPTY;
        for (row, line) in exponents.iter().enumerate() {
            for (col, &exponent) in line.iter().enumerate() {
                if exponent != 0 {
                    board.0[row][col] = Some(Tile::new(exponent, turn));
                }
            }
        }
        board
    }

    /// Tile exponents by row, 0 for empty cells.
    pub fn exponents(&self) -> [[Exponent; SIZE]; SIZE] {
        self.0.map(|line| line.map(|cell| cell.map_or(0, |t| t.exponent)))
    }

    #[inline]
    pub fn rows(&self) -> &[[Option<Tile>; SIZE]; SIZE] {
        &self.0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.0[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Option<Tile>) {
        self.0[row][col] = cell;
    }

    /// Every tile with its position, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = ((usize, usize), Tile)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|t| ((row, col), t)))
        })
    }

    /// Empty positions in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.0[row][col].is_none() {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    pub fn count_empty(&self) -> usize {
        SIZE * SIZE - self.tile_count()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.tile_count() == SIZE * SIZE
    }

    /// Sum of all tile values. Pulls never change it.
    pub fn total_value(&self) -> u64 {
        self.tiles().map(|(_, t)| t.value()).sum()
    }

    /// Highest tile value on the board, if any.
    pub fn highest_tile(&self) -> Option<u64> {
        self.tiles().map(|(_, t)| t.value()).max()
    }

    /// Check every tile's exponent is in `1..=MAX_EXPONENT`.
    pub fn validate(&self) -> Result<(), StateError> {
        for ((row, col), tile) in self.tiles() {
            if tile.exponent == 0 {
                return Err(StateError::ZeroExponent { row, col });
            }
            if tile.exponent > MAX_EXPONENT {
                return Err(StateError::ExponentTooLarge { row, col, exponent: tile.exponent });
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<Option<Tile>>>> for Board {
    type Error = StateError;

    fn try_from(rows: Vec<Vec<Option<Tile>>>) -> Result<Self, Self::Error> {
        if rows.len() != SIZE {
            return Err(StateError::RowCount { rows: rows.len() });
        }
        let mut board = Board::EMPTY;
        for (row, line) in rows.into_iter().enumerate() {
            let len = line.len();
            board.0[row] = line
                .try_into()
                .map_err(|_| StateError::RowLength { row, len })?;
        }
        board.validate()?;
        Ok(board)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.exponents())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self, None)
    }
}

/// Everything the presentation layer needs: board, score and turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub score: Score,
    /// Number of spawns so far.
    pub turn: Turn,
}

impl GameState {
    /// The starting state: empty board, no score, turn 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), StateError> {
        self.board.validate()
    }

    /// Whether the tile at `(row, col)` appeared on the current turn.
    pub fn is_new(&self, row: usize, col: usize) -> bool {
        self.board.get(row, col).is_some_and(|t| t.is_new(self.turn))
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {} | Turn: {}", self.score, self.turn)?;
        write_grid(f, &self.board, Some(self.turn))
    }
}

fn write_grid(f: &mut fmt::Formatter<'_>, board: &Board, turn: Option<Turn>) -> fmt::Result {
    let rule = "-".repeat(SIZE * CELL_WIDTH + SIZE - 1);
    for (row, line) in board.rows().iter().enumerate() {
        if row > 0 {
            writeln!(f, "{rule}")?;
        }
        let cells: Vec<String> = line.iter().map(|&cell| format_cell(cell, turn)).collect();
        writeln!(f, "{}", cells.join("|"))?;
    }
    Ok(())
}

// New tiles are bracketed when the current turn is known.
fn format_cell(cell: Option<Tile>, turn: Option<Turn>) -> String {
    match cell {
        None => " ".repeat(CELL_WIDTH),
        Some(tile) => {
            let text = match turn {
                Some(turn) if tile.is_new(turn) => format!("[{}]", tile.value()),
                _ => tile.value().to_string(),
            };
            format!("{text:^width$}", width = CELL_WIDTH)
        }
    }
}
