use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::modes::GameMode;

/// End-of-run summary handed to the persistence collaborators exactly once
/// per finished or failed game.
#[derive(Clone, Copy, Debug)]
pub struct GameSummary {
    pub mode: GameMode,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub time_ms: u64,
    /// True when the run ended in a failed spawn rather than an objective.
    pub over: bool,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ScoreRecord {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub time_ms: u64,
}

#[derive(Serialize, Deserialize, Clone, Default)]
pub struct Records {
    pub endless: Vec<ScoreRecord>,
    pub marathon: Vec<ScoreRecord>,
    pub sprint: Vec<ScoreRecord>,
    pub time: Vec<ScoreRecord>,
}

fn records_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tetrion");
    path.push("records.json");
    path
}

impl Records {
    pub fn load() -> Self {
        let path = records_path();
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let path = records_path();
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(data) = serde_json::to_string_pretty(self) {
            let _ = fs::write(&path, data);
        }
    }

    /// Inserts the run into its mode's top-10 list and returns the rank.
    /// Sprint and Marathon rank by completion time and only accept runs
    /// that reached the objective; the other modes rank by score.
    pub fn add(&mut self, summary: &GameSummary) -> Option<usize> {
        let record = ScoreRecord {
            score: summary.score,
            lines: summary.lines,
            level: summary.level,
            time_ms: summary.time_ms,
        };

        match summary.mode {
            GameMode::Sprint | GameMode::Marathon => {
                if summary.over {
                    return None;
                }
                let list = match summary.mode {
                    GameMode::Sprint => &mut self.sprint,
                    _ => &mut self.marathon,
                };
                let pos = list
                    .iter()
                    .position(|r| record.time_ms < r.time_ms)
                    .unwrap_or(list.len());
                if pos >= 10 {
                    return None;
                }
                list.insert(pos, record);
                list.truncate(10);
                Some(pos)
            }
            GameMode::Endless | GameMode::Time => {
                let list = match summary.mode {
                    GameMode::Endless => &mut self.endless,
                    _ => &mut self.time,
                };
                let pos = list
                    .iter()
                    .position(|r| record.score > r.score)
                    .unwrap_or(list.len());
                if pos >= 10 {
                    return None;
                }
                list.insert(pos, record);
                list.truncate(10);
                Some(pos)
            }
        }
    }
}

/// Lifetime statistics accumulated across runs.
#[derive(Serialize, Deserialize, Clone, Copy, Default)]
pub struct LifetimeStats {
    pub games_played: u64,
    pub total_score: u64,
    pub play_time_ms: u64,
    pub pieces: u64,
    pub total_lines: u64,
    pub single_lines: u64,
    pub double_lines: u64,
    pub triple_lines: u64,
    pub tetris_lines: u64,
    pub t_spin_mini: u64,
    pub t_spin_full: u64,
}

fn stats_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tetrion");
    path.push("stats.json");
    path
}

impl LifetimeStats {
    pub fn load() -> Self {
        let path = stats_path();
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let path = stats_path();
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(data) = serde_json::to_string_pretty(self) {
            let _ = fs::write(&path, data);
        }
    }

    pub fn apply(
        &mut self,
        summary: &GameSummary,
        line_counter: &[u32; 4],
        tspin_counter: &[u32; 2],
        piece_count: u32,
    ) {
        self.games_played += 1;
        self.total_score += u64::from(summary.score);
        self.play_time_ms += summary.time_ms;
        self.pieces += u64::from(piece_count);
        self.total_lines += u64::from(summary.lines);
        self.single_lines += u64::from(line_counter[0]);
        self.double_lines += u64::from(line_counter[1]);
        self.triple_lines += u64::from(line_counter[2]);
        self.tetris_lines += u64::from(line_counter[3]);
        self.t_spin_mini += u64::from(tspin_counter[0]);
        self.t_spin_full += u64::from(tspin_counter[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(mode: GameMode, score: u32, time_ms: u64, over: bool) -> GameSummary {
        GameSummary {
            mode,
            score,
            lines: 10,
            level: 2,
            time_ms,
            over,
        }
    }

    #[test]
    fn endless_ranks_by_score() {
        let mut records = Records::default();
        assert_eq!(records.add(&summary(GameMode::Endless, 100, 0, true)), Some(0));
        assert_eq!(records.add(&summary(GameMode::Endless, 300, 0, true)), Some(0));
        assert_eq!(records.add(&summary(GameMode::Endless, 200, 0, true)), Some(1));
        assert_eq!(records.endless[0].score, 300);
        assert_eq!(records.endless[2].score, 100);
    }

    #[test]
    fn sprint_ranks_by_time_and_rejects_failures() {
        let mut records = Records::default();
        assert_eq!(
            records.add(&summary(GameMode::Sprint, 500, 60_000, true)),
            None
        );
        assert_eq!(
            records.add(&summary(GameMode::Sprint, 500, 60_000, false)),
            Some(0)
        );
        assert_eq!(
            records.add(&summary(GameMode::Sprint, 400, 45_000, false)),
            Some(0)
        );
        assert_eq!(records.sprint[0].time_ms, 45_000);
    }

    #[test]
    fn top_ten_is_enforced() {
        let mut records = Records::default();
        for score in (1..=10).rev() {
            records.add(&summary(GameMode::Time, score * 100, 0, false));
        }
        assert_eq!(records.add(&summary(GameMode::Time, 50, 0, false)), None);
        assert_eq!(records.time.len(), 10);
    }

    #[test]
    fn lifetime_stats_accumulate() {
        let mut stats = LifetimeStats::default();
        stats.apply(
            &summary(GameMode::Endless, 1200, 90_000, true),
            &[2, 1, 0, 1],
            &[1, 0],
            17,
        );
        stats.apply(
            &summary(GameMode::Endless, 300, 30_000, true),
            &[1, 0, 0, 0],
            &[0, 0],
            5,
        );

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.total_score, 1500);
        assert_eq!(stats.play_time_ms, 120_000);
        assert_eq!(stats.pieces, 22);
        assert_eq!(stats.single_lines, 3);
        assert_eq!(stats.tetris_lines, 1);
        assert_eq!(stats.t_spin_mini, 1);
    }
}
