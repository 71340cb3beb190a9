//! Install generator scripts and shared headers.
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): manifest, report and the two operations
//! - Internal implementation: copy and swap helpers in internal.rs
//!
//! # Operations
//!
//! - [`install_scripts`] copies every `scripts/*.sh` except `install.sh` to a
//!   bin directory, drops the extension and makes the copy executable.
//! - [`install_headers`] copies `headers/*.hpp` one by one into the include
//!   directory, then replaces the installed `detail/` tree as a whole.
//!
//! Precondition failures (missing target or source directory) are returned
//! as errors before anything is written. Per-file failures land in the
//! [`InstallReport`]; the [`FailurePolicy`] decides whether the operation
//! stops at the first one.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use cppkit::install::{self, FailurePolicy};
//!
//! let report = install::install_scripts(
//!     Path::new("scripts"),
//!     Path::new("/usr/local/bin"),
//!     FailurePolicy::BestEffort,
//! )?;
//! assert!(report.is_success());
//! # Ok::<(), cppkit::error::ScaffoldError>(())
//! ```

mod internal;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};
use crate::paths;

/// How per-file failures are handled, for both operations alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failed file.
    #[default]
    Abort,
    /// Keep going and report every failure at the end.
    BestEffort,
}

/// One planned copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallItem {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// Permission bits OR-ed into the copy's mode (0 leaves it as copied).
    pub mode: u32,
}

/// Everything one operation will copy, recomputed on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallManifest {
    pub target_dir: PathBuf,
    pub items: Vec<InstallItem>,
}

impl InstallManifest {
    /// Scripts in `scripts_dir`, installer excluded, extension stripped.
    pub fn scripts(scripts_dir: &Path, target_dir: &Path) -> Result<Self> {
        let sources = internal::list_files(scripts_dir, paths::SCRIPT_EXTENSION)?;
        let items = sources
            .into_iter()
            .filter(|src| {
                src.file_name()
                    .map_or(true, |name| name != paths::INSTALLER_SCRIPT)
            })
            .filter_map(|source| {
                let stem = source.file_stem()?.to_owned();
                Some(InstallItem {
                    dest: target_dir.join(stem),
                    source,
                    mode: 0o111,
                })
            })
            .collect();
        Ok(Self {
            target_dir: target_dir.to_path_buf(),
            items,
        })
    }

    /// Top-level headers in `headers_dir`; the detail tree is not listed.
    pub fn headers(headers_dir: &Path, install_dir: &Path) -> Result<Self> {
        let sources = internal::list_files(headers_dir, paths::HEADER_EXTENSION)?;
        let items = sources
            .into_iter()
            .filter_map(|source| {
                let name = source.file_name()?.to_owned();
                Some(InstallItem {
                    dest: install_dir.join(name),
                    source,
                    mode: 0,
                })
            })
            .collect();
        Ok(Self {
            target_dir: install_dir.to_path_buf(),
            items,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Scripts,
    Headers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Installed,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    pub source: PathBuf,
    pub dest: PathBuf,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl InstallOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

/// Per-file results of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub operation: Operation,
    pub target: PathBuf,
    pub outcomes: Vec<InstallOutcome>,
    /// Stopped before the manifest was exhausted.
    pub aborted: bool,
}

impl InstallReport {
    fn new(operation: Operation, target: &Path) -> Self {
        Self {
            operation,
            target: target.to_path_buf(),
            outcomes: Vec::new(),
            aborted: false,
        }
    }

    /// Record a result; returns true if it was a failure.
    fn record(&mut self, source: &Path, dest: &Path, result: Result<()>) -> bool {
        let status = match result {
            Ok(()) => OutcomeStatus::Installed,
            Err(e) => {
                tracing::warn!(source = %source.display(), error = %e, "install failed");
                OutcomeStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        let failed = matches!(status, OutcomeStatus::Failed { .. });
        self.outcomes.push(InstallOutcome {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
            status,
        });
        failed
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    pub fn installed(&self) -> usize {
        self.outcomes.len() - self.failures()
    }

    pub fn is_success(&self) -> bool {
        !self.aborted && self.failures() == 0
    }
}

/// Copy generator scripts into `target_dir`.
///
/// # Errors
///
/// `PathNotFound` if `target_dir` or `scripts_dir` is missing; nothing is
/// written in that case.
pub fn install_scripts(
    scripts_dir: &Path,
    target_dir: &Path,
    policy: FailurePolicy,
) -> Result<InstallReport> {
    if !target_dir.is_dir() {
        return Err(ScaffoldError::PathNotFound(target_dir.to_path_buf()));
    }
    let manifest = InstallManifest::scripts(scripts_dir, target_dir)?;
    tracing::debug!(count = manifest.items.len(), target = %target_dir.display(), "installing scripts");

    let mut report = InstallReport::new(Operation::Scripts, target_dir);
    for item in &manifest.items {
        let result = internal::copy_preserving(&item.source, &item.dest)
            .and_then(|()| internal::add_mode(&item.dest, item.mode));
        if report.record(&item.source, &item.dest, result) && policy == FailurePolicy::Abort {
            report.aborted = true;
            break;
        }
    }
    Ok(report)
}

/// Copy shared headers into `install_dir` and replace its `detail/` tree.
///
/// `install_dir` is created if needed. Top-level headers follow `policy`.
/// The detail replace is staged beside the old tree and swapped in by
/// rename, so the installed tree is either the old one or the complete new
/// one; a failure there always ends the operation.
///
/// # Errors
///
/// `PathNotFound` if `headers_dir` is missing; nothing is written then.
pub fn install_headers(
    headers_dir: &Path,
    install_dir: &Path,
    policy: FailurePolicy,
) -> Result<InstallReport> {
    let manifest = InstallManifest::headers(headers_dir, install_dir)?;
    fs::create_dir_all(install_dir).map_err(|e| ScaffoldError::from_io(install_dir, e))?;

    let mut report = InstallReport::new(Operation::Headers, install_dir);
    for item in &manifest.items {
        let result = internal::copy_preserving(&item.source, &item.dest);
        if report.record(&item.source, &item.dest, result) && policy == FailurePolicy::Abort {
            report.aborted = true;
            return Ok(report);
        }
    }

    let source_detail = headers_dir.join(paths::DETAIL_DIR);
    if !source_detail.is_dir() {
        tracing::debug!(path = %source_detail.display(), "no detail tree to install");
        return Ok(report);
    }
    let dest_detail = install_dir.join(paths::DETAIL_DIR);
    let result = internal::replace_tree(&source_detail, &dest_detail);
    if report.record(&source_detail, &dest_detail, result) {
        report.aborted = true;
    }
    Ok(report)
}
