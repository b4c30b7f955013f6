use serde::{Deserialize, Serialize};

const MIN_PERIOD_SECONDS: u64 = 1;
const MIN_HISTORY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickOptions {
    pub period_seconds: u64,
    pub history_size: usize,
    pub sample_int_count: usize,
    pub sample_byte_len: usize,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            period_seconds: 2,
            history_size: 30,
            sample_int_count: 16,
            sample_byte_len: 4,
        }
    }
}

impl TickOptions {
    pub fn period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.period_seconds.max(MIN_PERIOD_SECONDS))
    }

    /// Number of frames the history keeps. Never below ten.
    pub fn window(&self) -> usize {
        self.history_size.max(MIN_HISTORY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub jackpot_max: u32,
    pub redeem_max: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            jackpot_max: 1_000_000,
            redeem_max: 10_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn floors_apply() {
        let opts = TickOptions {
            period_seconds: 0,
            history_size: 3,
            ..TickOptions::default()
        };
        assert_eq!(opts.period(), Duration::from_secs(1));
        assert_eq!(opts.window(), 10);

        let opts = TickOptions {
            history_size: 50,
            ..TickOptions::default()
        };
        assert_eq!(opts.window(), 50);
    }
}
