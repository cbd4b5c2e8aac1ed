mod movement;
mod scoring;


pub use scoring::score_points;

use crate::board::{Board, EMPTY};
use crate::config::Config;
use crate::events::SoundEvent;
use crate::modes::GameMode;
use crate::piece::{Piece, PieceKind};
use crate::records::GameSummary;
use crate::rng;
use crate::timer::Timer;

/// The last successful move the player made; a T-Spin only counts when
/// this is a rotation at lock time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LastMove {
    None,
    Drop,
    Rotation,
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TSpin {
    None,
    Mini,
    Full,
}

/// The match engine: owns the board, the active piece, the queue and all
/// scoring state. Driven by `tick()` at 60 Hz plus the discrete commands;
/// everything happens synchronously on the caller's thread.
pub struct Game {
    pub config: Config,
    pub mode: GameMode,

    /// Failed spawn. Terminal until reset.
    pub over: bool,
    /// Mode objective reached. Terminal until reset.
    pub finished: bool,
    pub paused: bool,
    /// Line-clear delay in progress; orthogonal to `paused`.
    pub frozen: bool,

    pub board: Board,
    pub current: Piece,
    pub next_queue: Vec<PieceKind>,
    pub piece_counter: [u32; 7],

    pub shadow: [(i32, i32); 4],
    pub hold: Option<PieceKind>,
    pub hold_used: bool,

    pub last_move: LastMove,

    pub back_to_back: i32,
    pub combo: i32,

    /// Manual soft-drop steps since the last lock; paid out on lock.
    pub current_drop: u32,

    pub score: u32,
    pub lines: u32,
    /// Singles, doubles, triples, tetrises.
    pub line_counter: [u32; 4],
    pub level: u32,
    /// Mini, full.
    pub tspin_counter: [u32; 2],

    pub ticks: u32,
    pub timer: Timer,

    pub lock_ticks_remaining: i32,
    pub wait_for_lock: bool,
    pub lock_move_resets: i32,

    /// Ticks until the deferred `next_turn` fires; owned by the game so a
    /// reset drops it along with everything else.
    pending_finalize: Option<u32>,
    summary_taken: bool,

    events: Vec<SoundEvent>,
}

impl Game {
    pub fn new(mode: GameMode, config: Config) -> Self {
        let mut next_queue = Vec::new();
        Self::refill(&mut next_queue, &config, true);
        let current = Piece::new(next_queue.remove(0));
        Self::refill(&mut next_queue, &config, false);

        let mut game = Self {
            config,
            mode,
            over: false,
            finished: false,
            paused: false,
            frozen: false,
            board: Board::new(),
            current,
            next_queue,
            piece_counter: [0; 7],
            shadow: [(0, 0); 4],
            hold: None,
            hold_used: false,
            last_move: LastMove::None,
            back_to_back: -1,
            combo: -1,
            current_drop: 0,
            score: 0,
            lines: 0,
            line_counter: [0; 4],
            level: config.start_level.max(1),
            tspin_counter: [0; 2],
            ticks: 0,
            timer: Timer::new(),
            lock_ticks_remaining: config.lock_delay_ticks,
            wait_for_lock: false,
            lock_move_resets: config.lock_move_resets,
            pending_finalize: None,
            summary_taken: false,
            events: Vec::new(),
        };

        // The first spawn cannot fail on an empty board.
        game.current.spawn(&mut game.board);
        game.piece_counter[game.current.kind.index()] += 1;
        game.shadow = game.current.shadow_coordinates(&game.board);
        game.events.push(SoundEvent::GameStart);
        game
    }

    /// Restarts the match. Replacing the whole value also drops any
    /// pending deferred finalization, so nothing stale can fire into the
    /// fresh game.
    pub fn reset(&mut self) {
        *self = Game::new(self.mode, self.config);
    }

    fn refill(queue: &mut Vec<PieceKind>, config: &Config, first_batch: bool) {
        if config.modern_rng {
            rng::modern_next(
                queue,
                config.piece_bag_multiplier,
                first_batch,
                config.first_piece_no_overhang,
            );
        } else {
            rng::classic_next(queue);
        }
    }

    pub(super) fn refill_queue(&mut self) {
        Self::refill(&mut self.next_queue, &self.config, false);
    }

    /// Commands are only evaluated while the piece is actually in play.
    pub(super) fn accepts_input(&self) -> bool {
        !(self.over || self.finished || self.paused || self.frozen)
    }

    /// Drains the ordered engine events since the last call.
    pub fn take_events(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn toggle_pause(&mut self) {
        if self.over || self.finished {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            self.events.push(SoundEvent::Pause);
        } else {
            self.timer.rebase();
            self.events.push(SoundEvent::Unpause);
        }
    }

    /// Moves the active piece to the hold slot (or swaps with it), at most
    /// once per turn. Returns whether the hold happened.
    pub fn toggle_hold(&mut self) -> bool {
        if !self.accepts_input() || self.hold_used {
            return false;
        }

        self.events.push(SoundEvent::Hold);

        for (r, c) in self.current.coordinates() {
            self.board.cells[r as usize][c as usize] = EMPTY;
        }

        match self.hold {
            None => {
                self.hold = Some(self.current.kind);

                let kind = self.next_queue[0];
                self.current = Piece::new(kind);
                if !self.current.spawn(&mut self.board) {
                    self.over = true;
                    self.events.push(SoundEvent::GameOver);
                }

                self.refill_queue();
                self.next_queue.remove(0);
            }
            Some(held) => {
                self.hold = Some(self.current.kind);
                self.current = Piece::new(held);
                self.current.spawn(&mut self.board);
            }
        }

        self.ticks = 0;
        self.hold_used = true;
        self.wait_for_lock = false;
        self.shadow = self.current.shadow_coordinates(&self.board);
        true
    }

    /// Pushes garbage rows in from the bottom. A direct command, not tied
    /// to the turn sequence.
    pub fn insert_garbage(&mut self, count: u32) {
        if !self.accepts_input() {
            return;
        }
        self.board.insert_garbage_lines(count, &mut self.current);
        self.shadow = self.current.shadow_coordinates(&self.board);
        self.events.push(SoundEvent::Garbage);
    }

    /// True once a terminal state is reached; `take_summary` then yields
    /// the run's summary exactly once.
    pub fn terminal(&self) -> bool {
        self.over || self.finished
    }

    pub fn take_summary(&mut self) -> Option<GameSummary> {
        if !self.terminal() || self.summary_taken {
            return None;
        }
        self.summary_taken = true;
        Some(GameSummary {
            mode: self.mode,
            score: self.score,
            lines: self.lines,
            level: self.level,
            time_ms: self.timer.ms(),
            over: self.over,
        })
    }

    pub fn piece_count(&self) -> u32 {
        self.piece_counter.iter().sum()
    }

    /// Danger indicator for the UI: anything stacked into the top rows
    /// that is not the active piece itself.
    pub fn in_danger(&self) -> bool {
        self.board.first_rows_not_empty(&self.current, 6)
    }
}
