//! A falling-block puzzle rules engine: board, pieces, SRS rotation,
//! randomizers and a tick-driven match engine with scoring, T-Spins and
//! game modes. No rendering, input or audio lives here; collaborators
//! drive the engine through commands and drain its event queue.

pub mod board;
pub mod config;
pub mod events;
pub mod game;
pub mod modes;
pub mod piece;
pub mod records;
pub mod rng;
pub mod timer;

pub use board::{Board, BOARD_HEIGHT, BOARD_WIDTH, EMPTY, GARBAGE_CELL, HIGHLIGHT_CELL};
pub use config::Config;
pub use events::SoundEvent;
pub use game::{score_points, Game, LastMove, TSpin};
pub use modes::GameMode;
pub use piece::{Piece, PieceKind};
pub use records::{GameSummary, LifetimeStats, Records, ScoreRecord};
