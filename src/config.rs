use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Engine configuration, constructed once at startup and handed to
/// `Game::new`. Persistence is a plain JSON load/save boundary; the
/// engine itself never touches storage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locked pieces keep their color; when off they are greyed out (code 8).
    pub colored_board: bool,
    /// Delay between a lock with full lines and the actual clear.
    pub line_clear_delay_ms: u32,
    /// Bag randomizer when true, uniform random draws when false.
    pub modern_rng: bool,
    /// Bags shuffled together per refill batch (>= 1).
    pub piece_bag_multiplier: u32,
    /// Reshuffle the opening bag until it does not start with S, Z or O.
    pub first_piece_no_overhang: bool,
    /// Grace ticks after a piece can no longer fall (a tick is 1/60 s).
    pub lock_delay_ticks: i32,
    /// Moves that may reset the lock delay per turn; -1 is unlimited.
    pub lock_move_resets: i32,
    pub marathon_goal: u32,
    pub sprint_goal: u32,
    pub time_limit_ms: u64,
    pub start_level: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colored_board: true,
            line_clear_delay_ms: 300,
            modern_rng: true,
            piece_bag_multiplier: 1,
            first_piece_no_overhang: true,
            lock_delay_ticks: 30,
            lock_move_resets: 15,
            marathon_goal: 150,
            sprint_goal: 4,
            time_limit_ms: 180_000,
            start_level: 1,
        }
    }
}

fn config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tetrion");
    path.push("config.json");
    path
}

impl Config {
    pub fn load() -> Self {
        let path = config_path();
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let path = config_path();
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(data) = serde_json::to_string_pretty(self) {
            let _ = fs::write(&path, data);
        }
    }
}
