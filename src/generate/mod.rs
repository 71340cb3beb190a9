//! Class scaffolding: a header with an include guard and an empty class,
//! plus a one-line implementation stub.
//!
//! # Example
//!
//! ```no_run
//! use cppkit::classify::PathContext;
//! use cppkit::generate::{self, GenerateOptions};
//!
//! let params = vec!["T".to_string(), "U".to_string()];
//! let spec = generate::resolve(Some("Widget"), Some(params.as_slice()))?;
//! let ctx = PathContext::new(std::env::current_dir()?);
//! let written = generate::generate_class(&spec, &ctx, &GenerateOptions::default())?;
//! assert_eq!(written.len(), 1); // template classes are header-only
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod emit;
pub mod plan;

pub use emit::{template_clause, HeaderArtifact, SourceArtifact};
pub use plan::{GenerationPlan, PlannedFile};

use std::collections::HashSet;
use std::path::PathBuf;

use crate::classify::{self, Classification, PathContext};
use crate::error::{Result, ScaffoldError};
use crate::paths;

/// A validated class request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    pub name: String,
    /// Empty for plain classes.
    pub template_params: Vec<String>,
}

impl ClassSpec {
    pub fn is_template(&self) -> bool {
        !self.template_params.is_empty()
    }

    /// `WIDGET_HPP` for `Widget`.
    pub fn guard_macro(&self) -> String {
        format!("{}_HPP", self.name.to_uppercase())
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Skip the implementation stub.
    pub header_only: bool,
    /// Replace files that already exist.
    pub force: bool,
}

/// Turn CLI input into a [`ClassSpec`].
///
/// `template` is `None` when `-t` was not given and `Some(&[])` when it was
/// given without parameters.
pub fn resolve(name: Option<&str>, template: Option<&[String]>) -> Result<ClassSpec> {
    let name = name.ok_or(ScaffoldError::MissingArgument)?;
    if !is_identifier(name) {
        return Err(ScaffoldError::InvalidClassName(name.to_string()));
    }

    let template_params = match template {
        None => Vec::new(),
        Some([]) => {
            return Err(ScaffoldError::InvalidTemplateSpec(
                "-t must be followed by at least one parameter name".to_string(),
            ))
        }
        Some(params) => {
            let mut seen = HashSet::new();
            for param in params {
                if !is_identifier(param) {
                    return Err(ScaffoldError::InvalidTemplateSpec(format!(
                        "'{}' is not a valid parameter name",
                        param
                    )));
                }
                if !seen.insert(param.as_str()) {
                    return Err(ScaffoldError::InvalidTemplateSpec(format!(
                        "parameter '{}' appears more than once",
                        param
                    )));
                }
            }
            params.to_vec()
        }
    };

    Ok(ClassSpec {
        name: name.to_string(),
        template_params,
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A validated plan plus where it decided to put the stub.
#[derive(Debug)]
pub struct ClassPlan {
    pub classification: Classification,
    pub plan: GenerationPlan,
}

/// Build the header (and stub, unless suppressed) plan for `spec`.
///
/// Every check happens here, so an `Ok` plan only fails on I/O at commit.
pub fn plan_class(
    spec: &ClassSpec,
    ctx: &PathContext,
    options: &GenerateOptions,
) -> Result<ClassPlan> {
    if !ctx.invocation_dir.is_dir() {
        return Err(ScaffoldError::PathNotFound(ctx.invocation_dir.clone()));
    }

    let classification = classify::classify(ctx);
    let header_file = paths::header_file_name(&spec.name);

    let mut plan = GenerationPlan::new(options.force);
    plan.add_file(
        ctx.invocation_dir.join(&header_file),
        HeaderArtifact::new(spec).render(),
    );

    // Templates live entirely in the header.
    if !spec.is_template() && !options.header_only {
        let source_dir = classification.source_dir(ctx);
        if !source_dir.is_dir() {
            return Err(ScaffoldError::PathNotFound(source_dir.to_path_buf()));
        }
        let stub = SourceArtifact {
            include_target: classification.include_target(&header_file),
        };
        plan.add_file(
            source_dir.join(paths::source_file_name(&spec.name)),
            stub.render(),
        );
    }

    plan.validate()?;
    Ok(ClassPlan {
        classification,
        plan,
    })
}

/// Plan and commit; returns the written paths.
pub fn generate_class(
    spec: &ClassSpec,
    ctx: &PathContext,
    options: &GenerateOptions,
) -> Result<Vec<PathBuf>> {
    plan_class(spec, ctx, options)?.plan.commit()
}
