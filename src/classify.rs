//! Public/private header classification.
//!
//! A header generated somewhere under a `src/` tree is private: its stub
//! sits next to it. A header under an `include/` tree is public: its stub
//! goes to the mirrored location under the sibling `src/` tree. Anywhere
//! else is ambiguous and falls back to same-directory placement. When the
//! path holds both names, the segment nearest the invocation directory wins.
//!
//! Classification is pure. It only looks at the path it is handed, never at
//! the process working directory or the filesystem; the generator checks
//! that the mirrored directory exists before it writes anything.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Where an invocation happens and which directory names mark the trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    pub invocation_dir: PathBuf,
    pub source_tree: String,
    pub interface_tree: String,
}

impl PathContext {
    pub fn new(invocation_dir: impl Into<PathBuf>) -> Self {
        Self {
            invocation_dir: invocation_dir.into(),
            source_tree: "src".to_string(),
            interface_tree: "include".to_string(),
        }
    }

    pub fn with_trees(mut self, source_tree: &str, interface_tree: &str) -> Self {
        self.source_tree = source_tree.to_string();
        self.interface_tree = interface_tree.to_string();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Under the source tree; header and stub side by side.
    Private,
    /// Under the interface tree.
    Public {
        /// Path below the interface segment, e.g. `utility` for `include/utility`.
        relative: PathBuf,
        /// Mirrored directory for the stub, e.g. `<root>/src/utility`.
        source_dir: PathBuf,
    },
    /// Neither tree found; same-directory placement.
    Ambiguous,
}

impl Classification {
    /// Directory that receives the implementation stub.
    pub fn source_dir<'a>(&'a self, ctx: &'a PathContext) -> &'a Path {
        match self {
            Classification::Public { source_dir, .. } => source_dir,
            Classification::Private | Classification::Ambiguous => &ctx.invocation_dir,
        }
    }

    /// Header path as spelled in the stub's `#include` directive.
    pub fn include_target(&self, header_file: &str) -> String {
        match self {
            Classification::Public { relative, .. } => {
                let mut parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                parts.push(header_file.to_string());
                parts.join("/")
            }
            Classification::Private | Classification::Ambiguous => header_file.to_string(),
        }
    }
}

/// Classify the invocation directory.
///
/// Segments are checked from the innermost outward and the first tree name
/// found decides. A segment is compared against the source tree before the
/// interface tree, so `~/src/proj/include` is public while
/// `proj/include/src` is private.
pub fn classify(ctx: &PathContext) -> Classification {
    let components: Vec<Component> = ctx.invocation_dir.components().collect();

    for (idx, component) in components.iter().enumerate().rev() {
        let Component::Normal(name) = component else {
            continue;
        };

        if *name == OsStr::new(&ctx.source_tree) {
            tracing::debug!(dir = %ctx.invocation_dir.display(), "private header context");
            return Classification::Private;
        }

        if *name == OsStr::new(&ctx.interface_tree) {
            let root: PathBuf = components[..idx].iter().collect();
            let relative: PathBuf = components[idx + 1..].iter().collect();
            let source_dir = root.join(&ctx.source_tree).join(&relative);
            tracing::debug!(
                dir = %ctx.invocation_dir.display(),
                mirror = %source_dir.display(),
                "public header context"
            );
            return Classification::Public {
                relative,
                source_dir,
            };
        }
    }

    tracing::debug!(dir = %ctx.invocation_dir.display(), "no src/include segment, same-directory placement");
    Classification::Ambiguous
}
