use crate::config::Config;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameMode {
    Endless,
    Marathon,
    Sprint,
    Time,
}

impl GameMode {
    /// Line objective that flips the game to Finished, if the mode has one.
    pub fn max_lines(self, config: &Config) -> Option<u32> {
        match self {
            GameMode::Marathon => Some(config.marathon_goal),
            GameMode::Sprint => Some(config.sprint_goal),
            GameMode::Endless | GameMode::Time => None,
        }
    }

    /// Wall-clock limit in milliseconds, if the mode has one.
    pub fn max_time_ms(self, config: &Config) -> Option<u64> {
        match self {
            GameMode::Time => Some(config.time_limit_ms),
            GameMode::Endless | GameMode::Marathon | GameMode::Sprint => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_limits() {
        let config = Config::default();
        assert_eq!(GameMode::Marathon.max_lines(&config), Some(150));
        assert_eq!(GameMode::Sprint.max_lines(&config), Some(4));
        assert_eq!(GameMode::Endless.max_lines(&config), None);
        assert_eq!(GameMode::Time.max_lines(&config), None);

        assert_eq!(GameMode::Time.max_time_ms(&config), Some(180_000));
        assert_eq!(GameMode::Endless.max_time_ms(&config), None);
    }
}
