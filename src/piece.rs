use crate::board::{Board, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

pub const SPAWN_ROW: i32 = 0;
pub const SPAWN_COL: i32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Cell code stamped on the board, 1..=7 in I, J, L, O, S, Z, T order.
    pub fn color(self) -> u8 {
        self as u8 + 1
    }
}

// Super Rotation System shapes, one 4x4 occupancy grid per rotation state.
const SHAPES: [[[[u8; 4]; 4]; 4]; 7] = [
    // I
    [
        [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
        [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
    ],
    // J
    [
        [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    ],
    // L
    [
        [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
        [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    ],
    // O
    [
        [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    ],
    // S
    [
        [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
        [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    ],
    // Z
    [
        [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    ],
    // T
    [
        [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
        [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
        [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    ],
];

// SRS wall kick candidates as (x, y) pairs, four per transition, on top of
// the implicit leading (0, 0). Indexed by current rotation state and turn
// direction: [rotation * 2 + (0 for CW, 1 for CCW)].
const KICKS_JLSTZ: [[[i32; 2]; 4]; 8] = [
    [[-1, 0], [-1, 1], [0, -2], [-1, -2]], // 0 >> 1
    [[1, 0], [1, 1], [0, -2], [1, -2]],    // 0 >> 3
    [[1, 0], [1, -1], [0, 2], [1, 2]],     // 1 >> 2
    [[1, 0], [1, -1], [0, 2], [1, 2]],     // 1 >> 0
    [[1, 0], [1, 1], [0, -2], [1, -2]],    // 2 >> 3
    [[-1, 0], [-1, 1], [0, -2], [-1, -2]], // 2 >> 1
    [[-1, 0], [-1, -1], [0, 2], [-1, 2]],  // 3 >> 0
    [[-1, 0], [-1, -1], [0, 2], [-1, 2]],  // 3 >> 2
];

const KICKS_I: [[[i32; 2]; 4]; 8] = [
    [[-2, 0], [1, 0], [-2, -1], [1, 2]],  // 0 >> 1
    [[-1, 0], [2, 0], [-1, 2], [2, -1]],  // 0 >> 3
    [[-1, 0], [2, 0], [-1, 2], [2, -1]],  // 1 >> 2
    [[2, 0], [-1, 0], [2, 1], [-1, 2]],   // 1 >> 0
    [[2, 0], [-1, 0], [2, 1], [-1, -2]],  // 2 >> 3
    [[1, 0], [-2, 0], [1, -2], [-2, 1]],  // 2 >> 1
    [[1, 0], [-2, 0], [1, -2], [-2, 1]],  // 3 >> 0
    [[-2, 0], [1, 0], [-2, -1], [1, 2]],  // 3 >> 2
];

fn kick_index(rotation: usize, clockwise: bool) -> usize {
    rotation * 2 + usize::from(!clockwise)
}

/// The active tetromino. Its cells are stamped into the board; movement
/// clears the old cells and stamps the new ones.
#[derive(Clone, Copy)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub row: i32,
    pub col: i32,
}

impl Piece {
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            row: SPAWN_ROW,
            col: SPAWN_COL,
        }
    }

    pub fn reset(&mut self) {
        self.rotation = 0;
        self.row = SPAWN_ROW;
        self.col = SPAWN_COL;
    }

    pub fn color(&self) -> u8 {
        self.kind.color()
    }

    /// Absolute occupied cells, derived from the shape table and offset.
    pub fn coordinates(&self) -> [(i32, i32); 4] {
        let mut cells = [(0, 0); 4];
        let mut n = 0;
        let shape = &SHAPES[self.kind.index()][self.rotation];
        for (i, row) in shape.iter().enumerate() {
            for (j, &occupied) in row.iter().enumerate() {
                if occupied != 0 {
                    cells[n] = (self.row + i as i32, self.col + j as i32);
                    n += 1;
                }
            }
        }
        cells
    }

    /// Resets the piece to its canonical spawn position and stamps it onto
    /// the board. Returns false without touching the board if any target
    /// cell is occupied; that failure is the game-over trigger.
    pub fn spawn(&mut self, board: &mut Board) -> bool {
        self.reset();

        let cells = self.coordinates();
        for &(r, c) in &cells {
            if board.cells[r as usize][c as usize] != EMPTY {
                return false;
            }
        }
        for &(r, c) in &cells {
            board.cells[r as usize][c as usize] = self.color();
        }
        true
    }

    /// The cells the piece would collide with when shifted by (dr, dc),
    /// excluding cells the piece itself occupies.
    fn leading_cells(&self, dr: i32, dc: i32) -> Vec<(i32, i32)> {
        let own = self.coordinates();
        own.iter()
            .map(|&(r, c)| (r + dr, c + dc))
            .filter(|cell| !own.contains(cell))
            .collect()
    }

    fn shift(&mut self, board: &mut Board, dr: i32, dc: i32) -> bool {
        for (r, c) in self.leading_cells(dr, dc) {
            if r < 0 || r >= BOARD_HEIGHT as i32 || c < 0 || c >= BOARD_WIDTH as i32 {
                return false;
            }
            if board.cells[r as usize][c as usize] != EMPTY {
                return false;
            }
        }

        for (r, c) in self.coordinates() {
            board.cells[r as usize][c as usize] = EMPTY;
        }
        self.row += dr;
        self.col += dc;
        for (r, c) in self.coordinates() {
            board.cells[r as usize][c as usize] = self.color();
        }
        true
    }

    pub fn move_left(&mut self, board: &mut Board) -> bool {
        self.shift(board, 0, -1)
    }

    pub fn move_right(&mut self, board: &mut Board) -> bool {
        self.shift(board, 0, 1)
    }

    pub fn move_down(&mut self, board: &mut Board) -> bool {
        self.shift(board, 1, 0)
    }

    /// Drops the piece as far as it goes and returns the number of
    /// `move_down` attempts, the final failing one included. A fresh T
    /// piece on an empty board yields 21, not 20; hard-drop scoring
    /// multiplies this exact count by 2, so the extra probe is part of
    /// the contract.
    pub fn drop_down(&mut self, board: &mut Board) -> u32 {
        let mut fallen = 0;
        loop {
            let moved = self.move_down(board);
            fallen += 1;
            if !moved {
                return fallen;
            }
        }
    }

    /// Ordered wall kick candidates for the current rotation state as
    /// (x, y) pairs, always starting with (0, 0).
    fn wall_kicks(&self, clockwise: bool) -> Vec<[i32; 2]> {
        let mut kicks = vec![[0, 0]];

        if self.kind == PieceKind::O {
            return kicks;
        }

        let table = if self.kind == PieceKind::I {
            &KICKS_I
        } else {
            &KICKS_JLSTZ
        };
        kicks.extend_from_slice(&table[kick_index(self.rotation, clockwise)]);
        kicks
    }

    /// First kick candidate under which the piece fits at `next_rotation`,
    /// or None if the rotation is impossible.
    fn find_wall_kick(
        &self,
        board: &Board,
        next_rotation: usize,
        clockwise: bool,
    ) -> Option<[i32; 2]> {
        let own = self.coordinates();

        for kick in self.wall_kicks(clockwise) {
            let mut test = *self;
            test.rotation = next_rotation;
            // The kick is (x, y) while the offset is (row, col), hence the
            // cross-wise application.
            test.row += kick[1];
            test.col += kick[0];

            let fits = test
                .coordinates()
                .iter()
                .filter(|cell| !own.contains(cell))
                .all(|&(r, c)| {
                    r >= 0
                        && r < BOARD_HEIGHT as i32
                        && c >= 0
                        && c < BOARD_WIDTH as i32
                        && board.cells[r as usize][c as usize] == EMPTY
                });
            if fits {
                return Some(kick);
            }
        }

        None
    }

    /// Rotates with SRS wall kicks. `half_turn` rotates 180 degrees and
    /// uses the clockwise kick family. The O piece never rotates.
    pub fn rotate(&mut self, board: &mut Board, clockwise: bool, half_turn: bool) -> bool {
        if self.kind == PieceKind::O {
            return false;
        }

        let delta = if half_turn {
            2
        } else if clockwise {
            1
        } else {
            3
        };
        let next_rotation = (self.rotation + delta) % 4;

        let kick = match self.find_wall_kick(board, next_rotation, clockwise || half_turn) {
            Some(kick) => kick,
            None => return false,
        };

        for (r, c) in self.coordinates() {
            board.cells[r as usize][c as usize] = EMPTY;
        }
        self.rotation = next_rotation;
        self.row += kick[1];
        self.col += kick[0];
        for (r, c) in self.coordinates() {
            board.cells[r as usize][c as usize] = self.color();
        }
        true
    }

    /// Where the piece would land if hard-dropped right now. Runs the drop
    /// on value copies; neither the real piece nor the board is touched.
    pub fn shadow_coordinates(&self, board: &Board) -> [(i32, i32); 4] {
        let mut ghost = *self;
        let mut scratch = board.clone();
        ghost.drop_down(&mut scratch);
        ghost.coordinates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn spawned(kind: PieceKind) -> (Board, Piece) {
        let mut board = Board::new();
        let mut piece = Piece::new(kind);
        assert!(piece.spawn(&mut board));
        (board, piece)
    }

    #[test]
    fn spawn_stamps_color() {
        let (board, piece) = spawned(PieceKind::T);
        assert_eq!(piece.rotation, 0);
        assert_eq!((piece.row, piece.col), (0, 3));
        for (r, c) in piece.coordinates() {
            assert_eq!(board.cells[r as usize][c as usize], 7);
        }
    }

    #[test]
    fn spawn_fails_on_occupied_cell() {
        let (mut board, _) = spawned(PieceKind::T);
        let mut second = Piece::new(PieceKind::T);
        let snapshot = board.clone();

        assert!(!second.spawn(&mut board));
        // A failed spawn must not mutate the board.
        assert!(board == snapshot);
    }

    #[test]
    fn move_left_until_wall() {
        let (mut board, mut piece) = spawned(PieceKind::T);
        assert!(piece.move_left(&mut board));
        assert!(piece.move_left(&mut board));
        assert!(piece.move_left(&mut board));
        assert_eq!(piece.col, 0);
        assert!(!piece.move_left(&mut board));
        assert_eq!(piece.col, 0);
    }

    #[test]
    fn move_right_until_wall() {
        let (mut board, mut piece) = spawned(PieceKind::I);
        // I spans columns 3..=6 at spawn.
        for _ in 0..3 {
            assert!(piece.move_right(&mut board));
        }
        assert!(!piece.move_right(&mut board));
        assert_eq!(piece.col, 6);
    }

    #[test]
    fn move_down_blocked_by_stack() {
        let mut board = Board::new();
        board.cells[2] = [1; 10];
        let mut piece = Piece::new(PieceKind::I);
        assert!(piece.spawn(&mut board));

        // I occupies row 1 at spawn; row 2 is full.
        assert!(!piece.move_down(&mut board));
        assert_eq!(piece.row, 0);
    }

    #[test]
    fn hard_drop_fresh_t() {
        let (mut board, mut piece) = spawned(PieceKind::T);
        // 20 real steps plus the failing probe.
        assert_eq!(piece.drop_down(&mut board), 21);
        assert_eq!(piece.row, 20);
    }

    #[test]
    fn o_piece_never_rotates() {
        let (mut board, mut piece) = spawned(PieceKind::O);
        let snapshot = board.clone();

        assert!(!piece.rotate(&mut board, true, false));
        assert!(!piece.rotate(&mut board, false, false));
        assert!(!piece.rotate(&mut board, true, true));
        assert!(board == snapshot);
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn rotate_cycles_back() {
        let (mut board, mut piece) = spawned(PieceKind::T);
        piece.drop_down(&mut board);

        for expected in [1, 2, 3, 0] {
            assert!(piece.rotate(&mut board, true, false));
            assert_eq!(piece.rotation, expected);
        }
    }

    #[test]
    fn rotate_ccw_wraps() {
        let (mut board, mut piece) = spawned(PieceKind::T);
        assert!(piece.rotate(&mut board, false, false));
        assert_eq!(piece.rotation, 3);
    }

    #[test]
    fn half_turn_skips_a_state() {
        let (mut board, mut piece) = spawned(PieceKind::T);
        assert!(piece.rotate(&mut board, true, true));
        assert_eq!(piece.rotation, 2);
    }

    #[test]
    fn rotate_restamps_board() {
        let (mut board, mut piece) = spawned(PieceKind::T);
        assert!(piece.rotate(&mut board, true, false));

        let stamped: usize = board
            .cells
            .iter()
            .flatten()
            .filter(|&&c| c != EMPTY)
            .count();
        assert_eq!(stamped, 4);
        for (r, c) in piece.coordinates() {
            assert_eq!(board.cells[r as usize][c as usize], piece.color());
        }
    }

    #[test]
    fn wall_kick_off_left_wall() {
        let mut board = Board::new();
        let mut piece = Piece::new(PieceKind::T);
        assert!(piece.spawn(&mut board));
        assert!(piece.rotate(&mut board, true, false));
        while piece.move_left(&mut board) {}

        // Hanging over the left wall in rotation 1, the in-place rotation
        // back to 0 collides with the wall and only a kick can succeed.
        assert!(piece.rotate(&mut board, false, false));
        assert_eq!(piece.rotation, 0);
        assert!(piece.col >= 0);
    }

    #[test]
    fn shadow_does_not_mutate() {
        let (board, piece) = spawned(PieceKind::T);
        let snapshot = board.clone();

        let shadow = piece.shadow_coordinates(&board);

        assert!(board == snapshot);
        assert_eq!((piece.row, piece.col), (0, 3));
        // The shadow sits at the floor.
        assert!(shadow.iter().any(|&(r, _)| r == 21));
    }

    #[test]
    fn shadow_rests_on_stack() {
        let mut board = Board::new();
        for c in 0..10 {
            board.cells[21][c] = 1;
        }
        let mut piece = Piece::new(PieceKind::T);
        assert!(piece.spawn(&mut board));

        let shadow = piece.shadow_coordinates(&board);
        assert!(shadow.iter().all(|&(r, _)| r < 21));
        assert!(shadow.iter().any(|&(r, _)| r == 20));
    }
}
