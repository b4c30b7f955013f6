use std::sync::Arc;

use lucky_core::{GameOptions, RandomSource, TickEngine, TickOptions};

fn main() {
    // Produce a handful of frames from a fixed seed and print them
    let rng = Arc::new(RandomSource::new(2024));
    let engine = TickEngine::new(rng.clone(), TickOptions::default(), GameOptions::default());
    for _ in 0..5 {
        engine.tick();
    }
    println!("seed_fingerprint={}", rng.seed_fingerprint());
    for frame in engine.recent(5) {
        println!(
            "tick={} reels={:?} jackpot={} bytes={}",
            frame.tick_id, frame.reels, frame.jackpot_preview, frame.sample_bytes_hex
        );
    }
}
