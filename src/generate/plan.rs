//! All-or-nothing file writes.
//!
//! A plan is built and validated completely before the first byte hits the
//! disk. If a write still fails midway, everything already written is put
//! back the way it was.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Default)]
pub struct GenerationPlan {
    files: Vec<PlannedFile>,
    dirs: Vec<PathBuf>,
    overwrite: bool,
}

/// What commit changed, so a failure can be undone.
enum Applied {
    Created(PathBuf),
    Replaced(PathBuf, Vec<u8>),
    Dir(PathBuf),
}

impl GenerationPlan {
    pub fn new(overwrite: bool) -> Self {
        Self {
            overwrite,
            ..Self::default()
        }
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: String) {
        self.files.push(PlannedFile {
            path: path.into(),
            contents,
        });
    }

    /// Plan a single directory; its parent must already exist.
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        self.dirs.push(path.into());
    }

    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    /// Check every target without touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        let targets = self
            .files
            .iter()
            .map(|f| f.path.as_path())
            .chain(self.dirs.iter().map(PathBuf::as_path));

        for path in targets {
            let parent = parent_of(path);
            if !parent.is_dir() {
                return Err(ScaffoldError::PathNotFound(parent.to_path_buf()));
            }
            if path.exists() && !self.overwrite {
                return Err(ScaffoldError::AlreadyExists(path.to_path_buf()));
            }
        }
        for dir in &self.dirs {
            if dir.exists() && !dir.is_dir() {
                return Err(ScaffoldError::AlreadyExists(dir.clone()));
            }
        }
        Ok(())
    }

    /// Validate, then write every file and directory, or none.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        self.validate()?;

        let mut applied = Vec::new();
        let mut written = Vec::new();
        if let Err(err) = self.apply(&mut applied, &mut written) {
            rollback(applied);
            return Err(err);
        }
        Ok(written)
    }

    fn apply(&self, applied: &mut Vec<Applied>, written: &mut Vec<PathBuf>) -> Result<()> {
        for file in &self.files {
            let previous = fs::read(&file.path).ok();
            fs::write(&file.path, &file.contents)
                .map_err(|e| ScaffoldError::from_io(&file.path, e))?;
            applied.push(match previous {
                Some(bytes) => Applied::Replaced(file.path.clone(), bytes),
                None => Applied::Created(file.path.clone()),
            });
            tracing::debug!(path = %file.path.display(), "wrote file");
            written.push(file.path.clone());
        }
        for dir in &self.dirs {
            if dir.is_dir() {
                continue;
            }
            fs::create_dir(dir).map_err(|e| ScaffoldError::from_io(dir, e))?;
            applied.push(Applied::Dir(dir.clone()));
            written.push(dir.clone());
        }
        Ok(())
    }
}

fn parent_of(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn rollback(applied: Vec<Applied>) {
    for step in applied.into_iter().rev() {
        let result = match &step {
            Applied::Created(path) => fs::remove_file(path),
            Applied::Replaced(path, bytes) => fs::write(path, bytes),
            Applied::Dir(path) => fs::remove_dir(path),
        };
        if let Err(e) = result {
            let path = match &step {
                Applied::Created(p) | Applied::Replaced(p, _) | Applied::Dir(p) => p,
            };
            tracing::warn!(path = %path.display(), error = %e, "rollback failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_commit_writes_all_files() {
        let temp = TempDir::new().unwrap();
        let mut plan = GenerationPlan::new(false);
        plan.add_file(temp.path().join("a.hpp"), "a".to_string());
        plan.add_file(temp.path().join("a.cpp"), "b".to_string());
        plan.add_dir(temp.path().join("build"));

        let written = plan.commit().unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(fs::read_to_string(temp.path().join("a.hpp")).unwrap(), "a");
        assert!(temp.path().join("build").is_dir());
    }

    #[test]
    fn test_existing_target_fails_before_any_write() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.cpp"), "keep").unwrap();

        let mut plan = GenerationPlan::new(false);
        plan.add_file(temp.path().join("a.hpp"), "a".to_string());
        plan.add_file(temp.path().join("a.cpp"), "b".to_string());

        let err = plan.commit().unwrap_err();
        assert!(matches!(err, ScaffoldError::AlreadyExists(_)));
        assert!(!temp.path().join("a.hpp").exists());
        assert_eq!(fs::read_to_string(temp.path().join("a.cpp")).unwrap(), "keep");
    }

    #[test]
    fn test_missing_parent_is_path_not_found() {
        let temp = TempDir::new().unwrap();
        let mut plan = GenerationPlan::new(false);
        plan.add_file(temp.path().join("a.hpp"), "a".to_string());
        plan.add_file(temp.path().join("missing/a.cpp"), "b".to_string());

        let err = plan.commit().unwrap_err();
        assert!(matches!(err, ScaffoldError::PathNotFound(p) if p.ends_with("missing")));
        assert!(!temp.path().join("a.hpp").exists());
    }

    #[test]
    fn test_failed_write_rolls_back_earlier_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("old.hpp"), "old").unwrap();
        // A directory where a file should go passes validation with
        // overwrite enabled but cannot be written.
        fs::create_dir(temp.path().join("blocked.cpp")).unwrap();

        let mut plan = GenerationPlan::new(true);
        plan.add_file(temp.path().join("new.hpp"), "new".to_string());
        plan.add_file(temp.path().join("old.hpp"), "replaced".to_string());
        plan.add_file(temp.path().join("blocked.cpp"), "x".to_string());

        assert!(plan.commit().is_err());
        assert!(!temp.path().join("new.hpp").exists());
        assert_eq!(fs::read_to_string(temp.path().join("old.hpp")).unwrap(), "old");
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.hpp");
        fs::write(&path, "old").unwrap();

        let mut plan = GenerationPlan::new(true);
        plan.add_file(&path, "new".to_string());
        plan.commit().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
