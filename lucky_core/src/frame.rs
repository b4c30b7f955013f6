use rand::{Rng, RngCore};

use crate::options::{GameOptions, TickOptions};

pub const REEL_COUNT: usize = 3;
const REEL_DIGITS: u8 = 10;

/// One tick's generated state. Built once by [`Frame::draw`] and never
/// mutated afterwards; the redeem code can only be compared, not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tick_id: u64,
    pub unix_seconds: i64,
    pub reels: [u8; REEL_COUNT],
    pub jackpot_preview: u32,
    pub sample_ints: Vec<i32>,
    pub sample_bytes_hex: String,
    redeem_code: u32,
}

impl Frame {
    /// Draws every random field from `rng` in the fixed order: reels,
    /// jackpot preview, sample ints, sample bytes, redeem code.
    pub fn draw<R: RngCore + ?Sized>(
        rng: &mut R,
        tick_id: u64,
        unix_seconds: i64,
        tick: &TickOptions,
        game: &GameOptions,
    ) -> Self {
        let mut reels = [0u8; REEL_COUNT];
        for reel in reels.iter_mut() {
            *reel = rng.gen_range(0..REEL_DIGITS);
        }
        let jackpot_preview = rng.gen_range(0..game.jackpot_max.max(1));
        let sample_ints = (0..tick.sample_int_count)
            .map(|_| rng.gen_range(0..i32::MAX))
            .collect();
        let mut sample_bytes = vec![0u8; tick.sample_byte_len];
        rng.fill_bytes(&mut sample_bytes);
        let redeem_code = rng.gen_range(0..game.redeem_max.max(1));

        Self {
            tick_id,
            unix_seconds,
            reels,
            jackpot_preview,
            sample_ints,
            sample_bytes_hex: hex::encode(sample_bytes),
            redeem_code,
        }
    }

    pub fn matches_code(&self, code: i64) -> bool {
        i64::from(self.redeem_code) == code
    }

    #[cfg(test)]
    pub(crate) fn redeem_code(&self) -> u32 {
        self.redeem_code
    }
}
