//! User settings read from `<config dir>/multi-get/config.toml`.
//!
//! Every field is optional; command-line flags take precedence.
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default number of chunks.
    pub threads: Option<u64>,
    /// Default total byte count, with the same suffixes as `--total`.
    pub total: Option<String>,
    /// Cap on simultaneous range requests.
    pub max_concurrency: Option<usize>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("multi-get").join("config.toml"))
    }

    /// Loads the user config file. A missing file (or config directory)
    /// yields the defaults; a file that exists but cannot be read or
    /// parsed is an error.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        Self::parse(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_file() {
        let settings = Settings::parse("threads = 8\ntotal = \"16M\"\n").unwrap();
        assert_eq!(settings.threads, Some(8));
        assert_eq!(settings.total.as_deref(), Some("16M"));
        assert_eq!(settings.max_concurrency, None);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "thread = 8\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Settings::parse("thread = 8").is_err());
    }
}
