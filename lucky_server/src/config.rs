use std::path::{Path, PathBuf};

use lucky_core::{GameOptions, TickOptions, DEFAULT_FALLBACK_FLAG, DEFAULT_FLAG_PATH};
use serde::Deserialize;

const CONFIG_ENV: &str = "LUCKY_CONFIG";
const CONFIG_FILE: &str = "lucky.json";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid LUCKY_SEED {0:?}")]
    Seed(String),
}

/// On-disk shape. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    bind: Option<String>,
    tick: TickOptions,
    game: GameOptions,
    flag: Option<String>,
    seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub tick: TickOptions,
    pub game: GameOptions,
    pub flag_path: PathBuf,
    pub fallback_flag: String,
    pub seed: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let file = explicit.or_else(|| {
            let p = PathBuf::from(CONFIG_FILE);
            p.exists().then_some(p)
        });
        Self::from_sources(file.as_deref(), |k| std::env::var(k).ok())
    }

    pub fn from_sources(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let parsed = match file {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => ConfigFile::default(),
        };

        let seed = match env("LUCKY_SEED") {
            Some(s) => Some(s.trim().parse().map_err(|_| ConfigError::Seed(s))?),
            None => parsed.seed,
        };

        Ok(Self {
            bind: env("BIND")
                .or(parsed.bind)
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            tick: parsed.tick,
            game: parsed.game,
            flag_path: env("FLAG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FLAG_PATH)),
            fallback_flag: parsed
                .flag
                .unwrap_or_else(|| DEFAULT_FALLBACK_FLAG.to_string()),
            seed,
        })
    }
}
