use super::state::{Board, Tile};
use super::{Direction, Score, Turn, SIZE};

/// Which index of `(line, position)` selects the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    /// Lines are rows, positions are columns.
    Rows,
    /// Lines are columns, positions are rows (transposed access).
    Cols,
}

impl Axis {
    #[inline]
    fn get(self, board: &Board, line: usize, pos: usize) -> Option<Tile> {
        match self {
            Axis::Rows => board.get(line, pos),
            Axis::Cols => board.get(pos, line),
        }
    }

    #[inline]
    fn set(self, board: &mut Board, line: usize, pos: usize, cell: Option<Tile>) {
        match self {
            Axis::Rows => board.set(line, pos, cell),
            Axis::Cols => board.set(pos, line, cell),
        }
    }
}

const ASCENDING: [usize; SIZE] = [0, 1, 2, 3];
const DESCENDING: [usize; SIZE] = [3, 2, 1, 0];

/// Axis and visiting order for a direction. Tiles pile up at `order[0]`.
pub(crate) fn plan(direction: Direction) -> (Axis, &'static [usize; SIZE]) {
    match direction {
        Direction::Left => (Axis::Rows, &ASCENDING),
        Direction::Right => (Axis::Rows, &DESCENDING),
        Direction::Up => (Axis::Cols, &ASCENDING),
        Direction::Down => (Axis::Cols, &DESCENDING),
    }
}

/// Compact and merge every line of `board` along `axis`, visiting positions in
/// `order`. Merge points are added to `score` and merged tiles are stamped with
/// `turn`. Returns whether any tile moved or merged.
///
/// `last_filled` is the output slot (index into `order`) holding the most
/// recently placed tile; `last_locked` is the slot that already absorbed a merge
/// this move. A locked slot cannot merge again, but later tiles still compact
/// into the slot after it.
pub(crate) fn pull(
    board: &mut Board,
    score: &mut Score,
    turn: Turn,
    axis: Axis,
    order: &[usize; SIZE],
) -> bool {
    let mut moved = false;

    for line in 0..SIZE {
        let mut last_filled: Option<usize> = None;
        let mut last_locked: Option<usize> = None;

        for &pos in order {
            let Some(mut tile) = axis.get(board, line, pos) else {
                continue;
            };

            if let Some(filled) = last_filled {
                let target = order[filled];
                let mergeable = axis
                    .get(board, line, target)
                    .is_some_and(|prev| prev.exponent == tile.exponent);
                if mergeable && last_locked != Some(filled) {
                    tile.exponent = tile.exponent.saturating_add(1);
                    tile.created_on_turn = turn;
                    *score = score.saturating_add(tile.value());
                    axis.set(board, line, pos, None);
                    axis.set(board, line, target, Some(tile));
                    last_locked = Some(filled);
                    moved = true;
                    continue;
                }
            }

            let filled = last_filled.map_or(0, |f| f + 1);
            last_filled = Some(filled);
            let target = order[filled];
            axis.set(board, line, pos, None);
            axis.set(board, line, target, Some(tile));
            if target != pos {
                moved = true;
            }
        }
    }

    moved
}
