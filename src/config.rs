use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};
use crate::install::FailurePolicy;
use crate::paths;

/// Configuration for cppkit, read from `~/.cppkit/config.toml`.
///
/// Every field is optional in the file; CLI flags override what is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Destination for generator scripts
    pub bin_dir: PathBuf,
    /// System include root; headers go to `{include_root}/utility`
    pub include_root: PathBuf,
    /// Directory name marking the private source tree
    pub source_tree: String,
    /// Directory name marking the public interface tree
    pub interface_tree: String,
    /// Per-file failure handling for both install operations
    pub failure_policy: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bin_dir: PathBuf::from(paths::DEFAULT_BIN_DIR),
            include_root: PathBuf::from(paths::DEFAULT_INCLUDE_ROOT),
            source_tree: "src".to_string(),
            interface_tree: "include".to_string(),
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl Config {
    /// Load the user config, falling back to defaults when none exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents =
            fs::read_to_string(path).map_err(|e| ScaffoldError::from_io(path, e))?;
        toml::from_str(&contents).map_err(|e| ScaffoldError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bin_dir, PathBuf::from("/usr/local/bin"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
bin_dir = "/opt/bin"
failure_policy = "best-effort"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.bin_dir, PathBuf::from("/opt/bin"));
        assert_eq!(config.failure_policy, FailurePolicy::BestEffort);
        assert_eq!(config.source_tree, "src");
        assert_eq!(config.interface_tree, "include");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "bin_dir = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ScaffoldError::Config { .. }));
    }
}
