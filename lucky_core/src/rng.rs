use parking_lot::Mutex;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

// One seeded stream shared by the ticker and every other consumer.
// Draw order across the whole process is part of what a seed reproduces.

pub fn derive_hash_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

pub struct RandomSource {
    seed: u64,
    rng: Mutex<ChaCha8Rng>,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        // warm-up: discard a fixed prefix of the stream
        let mut burn = [0u8; 64];
        rng.fill_bytes(&mut burn);
        let _ = rng.gen_range(0..1_000_000u32);
        let _ = rng.next_u32();
        Self {
            seed,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn seed_fingerprint(&self) -> String {
        derive_hash_hex(&self.seed.to_be_bytes())
    }

    /// Runs `f` with the generator locked, so a batch of draws cannot
    /// interleave with draws from another caller.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        let mut rng = self.rng.lock();
        f(&mut *rng)
    }

    /// Uniform integer in `[0, max)`. `max` of zero is treated as one.
    pub fn next_below(&self, max: u32) -> u32 {
        self.with_rng(|rng| rng.gen_range(0..max.max(1)))
    }

    pub fn fill_bytes(&self, buf: &mut [u8]) {
        self.with_rng(|rng| rng.fill_bytes(buf))
    }
}

impl std::fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSource")
            .field("seed_fingerprint", &self.seed_fingerprint())
            .finish_non_exhaustive()
    }
}
