pub mod engine;
pub mod flag;
pub mod frame;
pub mod options;
pub mod prize;
pub mod rng;

pub use crate::engine::{RedeemError, Redemption, TickEngine};
pub use crate::flag::{FileFlagProvider, FlagSource, StaticFlag, DEFAULT_FALLBACK_FLAG, DEFAULT_FLAG_PATH};
pub use crate::frame::{Frame, REEL_COUNT};
pub use crate::options::{GameOptions, TickOptions};
pub use crate::prize::{issue_token, mask_flag, MaskedFlag};
pub use crate::rng::{derive_hash_hex, RandomSource};
