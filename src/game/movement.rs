use crate::events::SoundEvent;

use super::{Game, LastMove};

impl Game {
    /// Advances the simulation by one tick (1/60 s). Gravity, lock delay
    /// and the deferred line-clear finalization all run here.
    pub fn tick(&mut self) {
        if self.over || self.finished {
            return;
        }

        if !self.paused {
            self.timer.update();
        }

        if let Some(limit) = self.mode.max_time_ms(&self.config) {
            if self.timer.ms() >= limit {
                // A paused game can still run out of time.
                self.paused = false;
                self.finished = true;
                self.events.push(SoundEvent::GameFinished);
                return;
            }
        }

        // The line-clear freeze must keep ticking even while paused, so a
        // pause cannot stall a pending clear forever.
        if self.paused && !self.frozen {
            return;
        }

        self.ticks += 1;

        if let Some(limit) = self.mode.max_lines(&self.config) {
            if self.lines >= limit {
                self.finished = true;
                self.events.push(SoundEvent::GameFinished);
                return;
            }
        }

        if let Some(remaining) = self.pending_finalize {
            if remaining <= 1 {
                self.pending_finalize = None;
                self.next_turn();
            } else {
                self.pending_finalize = Some(remaining - 1);
            }
        }

        if self.wait_for_lock {
            self.lock_ticks_remaining -= 1;
            self.move_down(false, false);
        }

        // A turn finalized earlier in this tick zeroed the counter; the
        // promoted piece waits a full gravity interval before its first step.
        if self.ticks != 0 && self.ticks % self.fall_speed() == 0 {
            self.move_down(false, false);
            self.ticks = 0;
        }
    }

    /// Ticks between gravity steps, straight from the NES speed curve
    /// (shifted so our levels start at 1).
    pub fn fall_speed(&self) -> u32 {
        match self.level {
            0..=9 => 53 - 5 * self.level,
            10 => 6,
            11..=13 => 5,
            14..=16 => 4,
            17..=19 => 3,
            20..=29 => 2,
            _ => 1,
        }
    }

    /// The shared downward path for gravity, soft drops and hard drops.
    /// Returns whether the piece moved.
    pub(super) fn move_down(&mut self, drop: bool, manual: bool) -> bool {
        let moved;

        if drop {
            let gain = 2 * self.current.drop_down(&mut self.board);
            self.score += gain;
            // A one-attempt "drop" never left the ground; only a real drop
            // counts as the last move.
            if gain > 2 && manual {
                self.last_move = LastMove::Drop;
            }
            self.invoke_next_turn(self.config.line_clear_delay_ms);
            moved = true;
        } else if self.current.move_down(&mut self.board) {
            if manual {
                self.last_move = LastMove::Drop;
                self.current_drop += 1;
            }
            moved = true;
        } else {
            self.wait_for_lock = true;
            if self.lock_ticks_remaining <= 0 && !self.frozen {
                self.lock_ticks_remaining = self.config.lock_delay_ticks;
                self.score += self.current_drop;
                self.events.push(SoundEvent::Lock);
                self.invoke_next_turn(self.config.line_clear_delay_ms);
            }
            moved = false;
        }

        self.shadow = self.current.shadow_coordinates(&self.board);
        moved
    }

    pub fn move_left(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if self.current.move_left(&mut self.board) {
            self.last_move = LastMove::Left;
            self.refresh_lock_delay();
            self.shadow = self.current.shadow_coordinates(&self.board);
            self.events.push(SoundEvent::Move);
            true
        } else {
            false
        }
    }

    pub fn move_right(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if self.current.move_right(&mut self.board) {
            self.last_move = LastMove::Right;
            self.refresh_lock_delay();
            self.shadow = self.current.shadow_coordinates(&self.board);
            self.events.push(SoundEvent::Move);
            true
        } else {
            false
        }
    }

    /// One manual downward step, worth one point at lock time.
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.move_down(false, true)
    }

    pub fn hard_drop(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.events.push(SoundEvent::HardDrop);
        self.move_down(true, true);
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(true, false)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(false, false)
    }

    pub fn rotate_half(&mut self) -> bool {
        self.rotate(true, true)
    }

    fn rotate(&mut self, clockwise: bool, half_turn: bool) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if self.current.rotate(&mut self.board, clockwise, half_turn) {
            self.last_move = LastMove::Rotation;
            self.refresh_lock_delay();
            self.shadow = self.current.shadow_coordinates(&self.board);
            self.events.push(SoundEvent::Rotate);
            true
        } else {
            false
        }
    }

    /// A successful move while the piece waits for lock restarts the lock
    /// timer, limited by the per-turn reset allowance (-1 is unlimited).
    fn refresh_lock_delay(&mut self) {
        if !self.wait_for_lock || self.lock_move_resets == 0 {
            return;
        }
        self.lock_ticks_remaining = self.config.lock_delay_ticks;
        if self.lock_move_resets > 0 {
            self.lock_move_resets -= 1;
        }
    }
}
