use anyhow::{Context, Result};
use std::path::PathBuf;

use cppkit::project;
use cppkit::style::{self, Style};

pub fn execute(dir: Option<PathBuf>, force: bool) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let written = project::init_project(&dir, force)
        .with_context(|| format!("Failed to initialize project in {}", dir.display()))?;

    for path in written {
        println!("{}", style::status(Style::Info, &path.display().to_string()));
    }
    Ok(())
}
