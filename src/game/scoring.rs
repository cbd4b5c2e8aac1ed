use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, EMPTY, GARBAGE_CELL, HIGHLIGHT_CELL};
use crate::events::SoundEvent;
use crate::piece::{Piece, PieceKind};

use super::{Game, LastMove, TSpin};

/// Points for one locked piece, before the score is committed.
///
/// `multiplier` is the current level, times 1.5 while a back-to-back chain
/// is running. T-Spins score even with zero lines cleared. Combinations
/// outside the tables are worth nothing.
pub fn score_points(lines: u32, multiplier: f64, tspin: TSpin, full_clear: bool) -> u32 {
    let base: u32 = match tspin {
        TSpin::Mini => match lines {
            0 => 100,
            1 => 200,
            2 => 400,
            _ => 0,
        },
        TSpin::Full => match lines {
            0 => 400,
            1 => 800,
            2 => 1200,
            3 => 1600,
            _ => 0,
        },
        TSpin::None => {
            if full_clear {
                match lines {
                    1 => 800,
                    2 => 1200,
                    3 => 1800,
                    4 => 2000,
                    _ => 0,
                }
            } else {
                match lines {
                    1 => 100,
                    2 => 300,
                    3 => 500,
                    4 => 800,
                    _ => 0,
                }
            }
        }
    };
    (base as f64 * multiplier) as u32
}

impl Game {
    /// Locks the current piece and either finalizes the turn immediately or,
    /// when lines were completed and a clear delay is configured, freezes the
    /// game and schedules `next_turn` a few ticks out.
    pub(super) fn invoke_next_turn(&mut self, delay_ms: u32) {
        let full_lines = self.board.full_lines();

        self.current_drop = 0;
        self.lock_ticks_remaining = self.config.lock_delay_ticks;

        if !self.config.colored_board {
            for (row, col) in self.current.coordinates() {
                self.board.cells[row as usize][col as usize] = GARBAGE_CELL;
            }
        }

        // Short delays skip the highlight flash; it would never be visible.
        if delay_ms > 100 {
            for &line in &full_lines {
                self.board.cells[line] = [HIGHLIGHT_CELL; BOARD_WIDTH];
            }
        }

        if !full_lines.is_empty() {
            self.events.push(SoundEvent::LineClear(full_lines.len() as u32));
        }

        if delay_ms > 0 && !full_lines.is_empty() {
            self.frozen = true;
            let ticks = (delay_ms as u64 * 60 / 1000) as u32;
            self.pending_finalize = Some(ticks.max(1));
        } else {
            self.next_turn();
        }
    }

    /// Finalizes a turn: scores the clear, deletes full lines and promotes
    /// the next piece from the queue.
    pub fn next_turn(&mut self) {
        self.frozen = false;
        self.pending_finalize = None;

        if self.over || self.finished {
            return;
        }

        let full_lines = self.board.full_lines();
        let cleared = full_lines.len() as u32;

        if cleared > 0 {
            self.lines += cleared;
            self.line_counter[(cleared - 1) as usize] += 1;
            self.combo += 1;
            if self.combo > 0 {
                self.score += 50 * self.level * self.combo as u32;
            }
        } else {
            self.combo = -1;
        }

        let tspin = self.detect_tspin();
        match tspin {
            TSpin::Mini => {
                self.tspin_counter[0] += 1;
                self.events.push(SoundEvent::TSpinMini);
            }
            TSpin::Full => {
                self.tspin_counter[1] += 1;
                self.events.push(SoundEvent::TSpinFull);
            }
            TSpin::None => {}
        }

        if cleared > 0 {
            if cleared == 4 || tspin != TSpin::None {
                self.back_to_back += 1;
            } else {
                self.back_to_back = -1;
            }
        }

        for &line in &full_lines {
            self.board.delete_line(line);
        }

        let board_sum: u32 = self
            .board
            .cells
            .iter()
            .flatten()
            .map(|&cell| cell as u32)
            .sum();
        // An empty board only counts as a full clear if this turn cleared it.
        let full_clear = cleared > 0 && board_sum == 0;

        let multiplier = self.level as f64 * if self.back_to_back > 0 { 1.5 } else { 1.0 };
        self.score += score_points(cleared, multiplier, tspin, full_clear);

        let new_level = self.level.max(1 + self.lines / 10);
        if new_level > self.level {
            self.level = new_level;
            self.events.push(SoundEvent::LevelUp);
        }

        self.promote_next_piece();

        self.ticks = 0;
        self.hold_used = false;
        self.wait_for_lock = false;
        self.lock_move_resets = self.config.lock_move_resets;
        self.shadow = self.current.shadow_coordinates(&self.board);
    }

    fn promote_next_piece(&mut self) {
        self.current = Piece::new(self.next_queue[0]);
        self.piece_counter[self.current.kind.index()] += 1;
        if !self.current.spawn(&mut self.board) {
            self.over = true;
            self.events.push(SoundEvent::GameOver);
        }
        self.refill_queue();
        self.next_queue.remove(0);
    }

    /// 3-corner T-Spin detection, evaluated on the board before the cleared
    /// lines are deleted. Corners outside the board count as occupied.
    fn detect_tspin(&self) -> TSpin {
        if self.current.kind != PieceKind::T || self.last_move != LastMove::Rotation {
            return TSpin::None;
        }

        let r = self.current.row;
        let c = self.current.col;

        // (front-left, front-right, back-left, back-right), front being the
        // side the T points toward.
        let [fl, fr, bl, br] = match self.current.rotation {
            0 => [(r, c), (r, c + 2), (r + 2, c), (r + 2, c + 2)],
            1 => [(r, c + 2), (r + 2, c + 2), (r, c), (r + 2, c)],
            2 => [(r + 2, c), (r + 2, c + 2), (r, c), (r, c + 2)],
            _ => [(r + 2, c), (r, c), (r, c + 2), (r + 2, c + 2)],
        };

        let occupied = |(row, col): (i32, i32)| -> bool {
            if row < 0 || row >= BOARD_HEIGHT as i32 || col < 0 || col >= BOARD_WIDTH as i32 {
                return true;
            }
            self.board.cells[row as usize][col as usize] != EMPTY
        };

        let front = occupied(fl) as u32 + occupied(fr) as u32;
        let back = occupied(bl) as u32 + occupied(br) as u32;

        if front == 2 && back > 0 {
            TSpin::Full
        } else if back == 2 && front > 0 {
            TSpin::Mini
        } else {
            TSpin::None
        }
    }
}
