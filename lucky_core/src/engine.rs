use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    flag::FlagSource,
    frame::Frame,
    options::{GameOptions, TickOptions},
    rng::RandomSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RedeemError {
    #[error("unknown tick {0}")]
    NotFound(u64),
    #[error("wrong code for tick {0}")]
    Forbidden(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redemption {
    pub tick_id: u64,
    pub flag: String,
}

#[derive(Debug, Default)]
struct History {
    current: u64,
    frames: BTreeMap<u64, Arc<Frame>>,
}

/// Produces one frame per tick from the shared generator and keeps the
/// most recent window of them. A single caller drives [`TickEngine::tick`];
/// any number of readers may query concurrently.
#[derive(Debug)]
pub struct TickEngine {
    rng: Arc<RandomSource>,
    tick: TickOptions,
    game: GameOptions,
    history: RwLock<History>,
}

impl TickEngine {
    pub fn new(rng: Arc<RandomSource>, tick: TickOptions, game: GameOptions) -> Self {
        Self {
            rng,
            tick,
            game,
            history: RwLock::new(History::default()),
        }
    }

    pub fn options(&self) -> &TickOptions {
        &self.tick
    }

    pub fn tick(&self) -> Arc<Frame> {
        self.tick_at(chrono::Utc::now().timestamp())
    }

    /// Same as [`TickEngine::tick`] with an explicit creation time.
    pub fn tick_at(&self, unix_seconds: i64) -> Arc<Frame> {
        let mut history = self.history.write();
        let tick_id = history.current + 1;
        let frame = Arc::new(
            self.rng
                .with_rng(|rng| Frame::draw(rng, tick_id, unix_seconds, &self.tick, &self.game)),
        );
        history.frames.insert(tick_id, frame.clone());
        history.current = tick_id;

        let window = self.tick.window() as u64;
        if tick_id > window {
            let keep_from = tick_id - window + 1;
            history.frames = history.frames.split_off(&keep_from);
        }
        debug!(tick_id, retained = history.frames.len(), "frame produced");
        frame
    }

    pub fn current_tick_id(&self) -> u64 {
        self.history.read().current
    }

    pub fn current(&self) -> Option<Arc<Frame>> {
        let history = self.history.read();
        history.frames.get(&history.current).cloned()
    }

    pub fn get(&self, tick_id: u64) -> Option<Arc<Frame>> {
        self.history.read().frames.get(&tick_id).cloned()
    }

    /// Up to `count` frames ending at the current tick, oldest first.
    /// A count of zero is treated as one.
    pub fn recent(&self, count: usize) -> Vec<Arc<Frame>> {
        let history = self.history.read();
        if history.current == 0 {
            return Vec::new();
        }
        let span = count.max(1) as u64;
        let from = history.current.saturating_sub(span - 1).max(1);
        history
            .frames
            .range(from..=history.current)
            .map(|(_, f)| f.clone())
            .collect()
    }

    pub fn retained(&self) -> usize {
        self.history.read().frames.len()
    }

    pub fn redeem(
        &self,
        tick_id: u64,
        code: i64,
        flags: &dyn FlagSource,
    ) -> Result<Redemption, RedeemError> {
        let frame = self.get(tick_id).ok_or(RedeemError::NotFound(tick_id))?;
        if !frame.matches_code(code) {
            return Err(RedeemError::Forbidden(tick_id));
        }
        Ok(Redemption {
            tick_id: frame.tick_id,
            flag: flags.flag(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::StaticFlag;

    fn engine(history_size: usize) -> TickEngine {
        TickEngine::new(
            Arc::new(RandomSource::new(7)),
            TickOptions {
                history_size,
                ..TickOptions::default()
            },
            GameOptions::default(),
        )
    }

    #[test]
    fn empty_before_first_tick() {
        let e = engine(30);
        assert!(e.current().is_none());
        assert!(e.get(1).is_none());
        assert!(e.recent(5).is_empty());
        assert_eq!(e.current_tick_id(), 0);
    }

    #[test]
    fn ids_are_sequential() {
        let e = engine(30);
        for expected in 1..=5 {
            assert_eq!(e.tick_at(100).tick_id, expected);
        }
        assert_eq!(e.current().map(|f| f.tick_id), Some(5));
        assert!(e.get(6).is_none());
    }

    #[test]
    fn eviction_keeps_window() {
        let e = engine(10);
        for _ in 0..25 {
            e.tick_at(0);
            assert!(e.retained() <= 10);
        }
        assert_eq!(e.retained(), 10);
        assert!(e.get(15).is_none());
        assert!(e.get(16).is_some());
        assert!(e.get(25).is_some());
    }

    #[test]
    fn small_history_is_floored() {
        let e = engine(2);
        for _ in 0..20 {
            e.tick_at(0);
        }
        assert_eq!(e.retained(), 10);
    }

    #[test]
    fn recent_is_oldest_first_and_clamped() {
        let e = engine(10);
        for _ in 0..3 {
            e.tick_at(0);
        }
        let ids: Vec<u64> = e.recent(5).iter().map(|f| f.tick_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        for _ in 0..20 {
            e.tick_at(0);
        }
        let ids: Vec<u64> = e.recent(4).iter().map(|f| f.tick_id).collect();
        assert_eq!(ids, vec![20, 21, 22, 23]);

        let ids: Vec<u64> = e.recent(0).iter().map(|f| f.tick_id).collect();
        assert_eq!(ids, vec![23]);

        // never reaches past the window
        let all = e.recent(100);
        assert_eq!(all.len(), 10);
        assert_eq!(all.first().map(|f| f.tick_id), Some(14));
    }

    #[test]
    fn redeem_outcomes() {
        let e = engine(10);
        let frame = e.tick_at(0);
        let flags = StaticFlag::new("flag{test}");
        let code = i64::from(frame.redeem_code());

        assert_eq!(e.redeem(99, code, &flags), Err(RedeemError::NotFound(99)));
        assert_eq!(
            e.redeem(frame.tick_id, code + 1, &flags),
            Err(RedeemError::Forbidden(frame.tick_id))
        );
        for _ in 0..2 {
            let ok = e.redeem(frame.tick_id, code, &flags).unwrap();
            assert_eq!(ok.tick_id, frame.tick_id);
            assert_eq!(ok.flag, "flag{test}");
        }
    }

    #[test]
    fn redeem_after_eviction_is_not_found() {
        let e = engine(10);
        let first = e.tick_at(0);
        let code = i64::from(first.redeem_code());
        for _ in 0..10 {
            e.tick_at(0);
        }
        let flags = StaticFlag::new("x");
        assert_eq!(
            e.redeem(first.tick_id, code, &flags),
            Err(RedeemError::NotFound(first.tick_id))
        );
    }
}
