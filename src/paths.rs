//! Single source of truth for every cppkit filesystem location.
//!
//! This module defines WHERE things live. It has no I/O and no validation.
//!
//! # User-Level Paths (~/.cppkit/)
//!
//! ```text
//! ~/.cppkit/
//! └── config.toml              # Global config
//! ```
//!
//! # Install Locations
//!
//! ```text
//! /usr/local/bin/              # Generator scripts (extension stripped)
//! /usr/local/include/utility/  # Shared headers
//! └── detail/                  # Internal headers, replaced on every install
//! ```
//!
//! # Source Checkout Layout
//!
//! ```text
//! <checkout>/
//! ├── scripts/                 # *.sh generator wrappers, install.sh excluded
//! └── headers/                 # Top-level *.hpp
//!     └── detail/              # Copied as a whole
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// User Level (~/.cppkit/)
// =============================================================================

/// User's cppkit home directory: `~/.cppkit/`
pub fn cppkit_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cppkit")
}

/// Global config file: `~/.cppkit/config.toml`
pub fn config_path() -> PathBuf {
    cppkit_home().join("config.toml")
}

// =============================================================================
// Install Locations
// =============================================================================

/// Default destination for generator scripts.
pub const DEFAULT_BIN_DIR: &str = "/usr/local/bin";

/// Default system include root.
pub const DEFAULT_INCLUDE_ROOT: &str = "/usr/local/include";

/// Fixed subpath under the include root that holds the shared headers.
pub const INCLUDE_SUBDIR: &str = "utility";

/// Name of the internal-only header directory.
pub const DETAIL_DIR: &str = "detail";

/// Shared header install directory: `{include_root}/utility/`
pub fn header_install_dir(include_root: &Path) -> PathBuf {
    include_root.join(INCLUDE_SUBDIR)
}

// =============================================================================
// Source Checkout
// =============================================================================

/// Extension of installable generator scripts.
pub const SCRIPT_EXTENSION: &str = "sh";

/// The installer itself, never installed.
pub const INSTALLER_SCRIPT: &str = "install.sh";

/// Generator scripts: `{checkout}/scripts/`
pub fn scripts_dir(checkout: &Path) -> PathBuf {
    checkout.join("scripts")
}

/// Shared headers: `{checkout}/headers/`
pub fn headers_dir(checkout: &Path) -> PathBuf {
    checkout.join("headers")
}

// =============================================================================
// Generated Files
// =============================================================================

pub const HEADER_EXTENSION: &str = "hpp";
pub const SOURCE_EXTENSION: &str = "cpp";

/// Header file name for a class: `widget.hpp`
pub fn header_file_name(class_name: &str) -> String {
    format!("{}.{}", class_name.to_lowercase(), HEADER_EXTENSION)
}

/// Implementation stub file name for a class: `widget.cpp`
pub fn source_file_name(class_name: &str) -> String {
    format!("{}.{}", class_name.to_lowercase(), SOURCE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cppkit_home() {
        assert!(cppkit_home().ends_with(".cppkit"));
        assert!(config_path().starts_with(cppkit_home()));
    }

    #[test]
    fn test_checkout_paths() {
        let root = Path::new("/src/cppkit");
        assert_eq!(scripts_dir(root), PathBuf::from("/src/cppkit/scripts"));
        assert_eq!(headers_dir(root), PathBuf::from("/src/cppkit/headers"));
    }

    #[test]
    fn test_header_install_dir() {
        assert_eq!(
            header_install_dir(Path::new(DEFAULT_INCLUDE_ROOT)),
            PathBuf::from("/usr/local/include/utility")
        );
    }

    #[test]
    fn test_generated_file_names_are_lowercase() {
        assert_eq!(header_file_name("BitArray"), "bitarray.hpp");
        assert_eq!(source_file_name("BitArray"), "bitarray.cpp");
    }
}
