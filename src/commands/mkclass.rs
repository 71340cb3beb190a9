use anyhow::{Context, Result};
use std::path::PathBuf;

use cppkit::classify::{Classification, PathContext};
use cppkit::generate::{self, GenerateOptions};
use cppkit::style::{self, Style};
use cppkit::Config;

pub fn execute(
    name: Option<String>,
    template: Option<Vec<String>>,
    header_only: bool,
    force: bool,
    dir: Option<PathBuf>,
) -> Result<()> {
    // Validate arguments before anything else touches the disk.
    let spec = generate::resolve(name.as_deref(), template.as_deref())?;
    let config = Config::load()?;

    let invocation_dir = match dir {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("Path '{}' does not exist", dir.display()))?,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let ctx = PathContext::new(invocation_dir)
        .with_trees(&config.source_tree, &config.interface_tree);

    let options = GenerateOptions { header_only, force };
    let planned = generate::plan_class(&spec, &ctx, &options)
        .with_context(|| format!("Failed to generate class {}", spec.name))?;

    if planned.classification == Classification::Ambiguous && !spec.is_template() && !header_only
    {
        println!(
            "{}",
            style::status(
                Style::Warning,
                &format!(
                    "not under {}/ or {}/, placing header and source side by side",
                    config.source_tree, config.interface_tree
                )
            )
        );
    }

    let written = planned
        .plan
        .commit()
        .with_context(|| format!("Failed to generate class {}", spec.name))?;

    for path in written {
        println!("{}", style::status(Style::Info, &path.display().to_string()));
    }
    Ok(())
}
