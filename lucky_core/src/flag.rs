use std::path::{Path, PathBuf};

use tracing::warn;

pub const DEFAULT_FLAG_PATH: &str = "/flag.txt";
pub const DEFAULT_FALLBACK_FLAG: &str = "crypto{demo_flag}";

/// Where a successful redeem gets its secret from.
pub trait FlagSource: Send + Sync {
    fn flag(&self) -> String;
}

/// Reads the flag from a text file on every call, falling back to a fixed
/// string when the file is missing or unreadable.
#[derive(Debug, Clone)]
pub struct FileFlagProvider {
    path: PathBuf,
    fallback: String,
}

impl FileFlagProvider {
    pub fn new(path: impl Into<PathBuf>, fallback: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fallback: fallback.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlagSource for FileFlagProvider {
    fn flag(&self) -> String {
        if !self.path.exists() {
            return self.fallback.clone();
        }
        match std::fs::read_to_string(&self.path) {
            Ok(s) => s.trim().to_string(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed reading flag");
                self.fallback.clone()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct StaticFlag(String);

impl StaticFlag {
    pub fn new(flag: impl Into<String>) -> Self {
        Self(flag.into())
    }
}

impl FlagSource for StaticFlag {
    fn flag(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_and_trims_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  flag{{from_file}}  ").unwrap();
        let p = FileFlagProvider::new(file.path(), "fallback");
        assert_eq!(p.flag(), "flag{from_file}");
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let p = FileFlagProvider::new(dir.path().join("nope.txt"), "fallback");
        assert_eq!(p.flag(), "fallback");
    }

    #[test]
    fn unreadable_path_falls_back() {
        // a directory exists but cannot be read as a string
        let dir = tempfile::tempdir().unwrap();
        let p = FileFlagProvider::new(dir.path(), "fallback");
        assert_eq!(p.flag(), "fallback");
    }
}
