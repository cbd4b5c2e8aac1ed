use rand::seq::SliceRandom;

use crate::piece::Piece;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 22;

pub const EMPTY: u8 = 0;
pub const GARBAGE_CELL: u8 = 8;
pub const HIGHLIGHT_CELL: u8 = 9;

/// The playing field. Cell codes: 0 empty, 1-7 locked piece colors,
/// 8 garbage/greyed, 9 full-line highlight.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    pub cells: [[u8; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[EMPTY; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Ascending indices of rows with no empty cell.
    pub fn full_lines(&self) -> Vec<usize> {
        let mut lines = Vec::new();
        for (r, row) in self.cells.iter().enumerate() {
            if row.iter().all(|&c| c != EMPTY) {
                lines.push(r);
            }
        }
        lines
    }

    /// Removes a row; everything above shifts down and a fresh empty row
    /// appears at index 0, so the row count never changes.
    pub fn delete_line(&mut self, line: usize) {
        for r in (1..=line).rev() {
            self.cells[r] = self.cells[r - 1];
        }
        self.cells[0] = [EMPTY; BOARD_WIDTH];
    }

    /// Pushes `count` garbage rows in from the bottom, each with a single
    /// hole at a random column. The active piece is lifted off the board
    /// first and re-stamped afterwards so it never gets buried mid-insert.
    pub fn insert_garbage_lines(&mut self, count: u32, piece: &mut Piece) {
        for (r, c) in piece.coordinates() {
            self.cells[r as usize][c as usize] = EMPTY;
        }

        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let mut garbage = [GARBAGE_CELL; BOARD_WIDTH];
            garbage[0] = EMPTY;
            garbage.shuffle(&mut rng);

            for r in 0..BOARD_HEIGHT - 1 {
                self.cells[r] = self.cells[r + 1];
            }
            self.cells[BOARD_HEIGHT - 1] = garbage;
        }

        piece.row = (piece.row - count as i32).max(0);

        for (r, c) in piece.coordinates() {
            self.cells[r as usize][c as usize] = piece.color();
        }
    }

    /// True if any of the first `rows_checked` rows holds a cell that does
    /// not belong to the active piece. Used for the "danger" state; the
    /// active piece is excluded so a freshly spawned piece does not count.
    pub fn first_rows_not_empty(&self, piece: &Piece, rows_checked: usize) -> bool {
        let own = piece.coordinates();
        for r in 0..rows_checked.min(BOARD_HEIGHT) {
            for c in 0..BOARD_WIDTH {
                if self.cells[r][c] != EMPTY && !own.contains(&(r as i32, c as i32)) {
                    return true;
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceKind};

    #[test]
    fn new_board_dimensions() {
        let board = Board::new();
        assert_eq!(board.cells.len(), 22);
        assert_eq!(board.cells[0].len(), 10);
        assert!(board.full_lines().is_empty());
    }

    #[test]
    fn full_lines_ascending() {
        let mut board = Board::new();
        board.cells[10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
        board.cells[13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
        board.cells[16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
        board.cells[20] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];

        assert_eq!(board.full_lines(), vec![10, 13, 16]);
    }

    #[test]
    fn delete_line_shifts_down() {
        let mut board = Board::new();
        board.cells[10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
        board.cells[13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
        board.cells[16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];

        board.delete_line(10);

        assert_eq!(board.cells[10], [0; 10]);
        assert_eq!(board.cells[0], [0; 10]);
        assert_eq!(board.cells.len(), 22);
        assert_eq!(board.full_lines(), vec![13, 16]);
    }

    #[test]
    fn insert_garbage_lines_bottom_rows() {
        let mut board = Board::new();
        let mut piece = Piece::new(PieceKind::I);
        piece.row = 2;
        piece.col = 5;

        board.insert_garbage_lines(3, &mut piece);

        // Nine garbage cells and exactly one hole per inserted row.
        for r in 19..22 {
            let sum: u32 = board.cells[r].iter().map(|&c| u32::from(c)).sum();
            let holes = board.cells[r].iter().filter(|&&c| c == EMPTY).count();
            assert_eq!(sum, 72);
            assert_eq!(holes, 1);
        }

        // The piece got lifted by the insert, clamped at the top edge.
        assert_eq!(piece.row, 0);
        assert_eq!(piece.col, 5);
        assert_eq!(board.cells.len(), 22);
    }

    #[test]
    fn insert_garbage_restamps_piece() {
        let mut board = Board::new();
        let mut piece = Piece::new(PieceKind::T);
        assert!(piece.spawn(&mut board));
        piece.drop_down(&mut board);

        board.insert_garbage_lines(2, &mut piece);

        for (r, c) in piece.coordinates() {
            assert_eq!(board.cells[r as usize][c as usize], piece.color());
        }
    }

    #[test]
    fn first_rows_not_empty_excludes_piece() {
        let mut board = Board::new();
        let mut piece = Piece::new(PieceKind::I);
        assert!(piece.spawn(&mut board));

        // The spawned piece alone must not flag danger.
        assert!(!board.first_rows_not_empty(&piece, 22));

        board.cells[3] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];

        assert!(board.first_rows_not_empty(&piece, 5));
        assert!(!board.first_rows_not_empty(&piece, 3));
    }
}
