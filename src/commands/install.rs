//! `cppkit install`: scripts to the bin directory, headers to the include root.
//!
//! The two operations are independent; a failed precondition on one does
//! not stop the other. Exit code is 1 if anything failed.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use cppkit::install::{self, FailurePolicy, InstallReport, OutcomeStatus};
use cppkit::style::{self, Style};
use cppkit::{paths, Config, ScaffoldError};

/// Binary every installed wrapper script hands off to.
const WRAPPED_BINARY: &str = "cppkit";

#[derive(Serialize)]
struct InstallSummary {
    reports: Vec<InstallReport>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

pub fn execute(
    install_dir: Option<PathBuf>,
    from: Option<PathBuf>,
    include_dir: Option<PathBuf>,
    best_effort: bool,
    json_output: bool,
) -> Result<i32> {
    let config = Config::load()?;
    let checkout = match from {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let bin_dir = install_dir.unwrap_or(config.bin_dir);
    let include_root = include_dir.unwrap_or(config.include_root);
    let policy = if best_effort {
        FailurePolicy::BestEffort
    } else {
        config.failure_policy
    };

    let mut summary = InstallSummary {
        reports: Vec::new(),
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    let scripts = install::install_scripts(&paths::scripts_dir(&checkout), &bin_dir, policy);
    let scripts_installed = matches!(&scripts, Ok(report) if report.installed() > 0);
    collect(&mut summary, scripts, &checkout, json_output);

    // The wrappers exec `cppkit`, so they are dead without it on PATH.
    if scripts_installed && which::which(WRAPPED_BINARY).is_err() {
        let warning = format!(
            "{} is not on PATH; the installed scripts need it (try `cargo install --path {}`)",
            WRAPPED_BINARY,
            checkout.display()
        );
        if !json_output {
            eprintln!("{}", style::status(Style::Warning, &warning));
        }
        summary.warnings.push(warning);
    }

    let headers = install::install_headers(
        &paths::headers_dir(&checkout),
        &paths::header_install_dir(&include_root),
        policy,
    );
    collect(&mut summary, headers, &checkout, json_output);

    let ok = summary.errors.is_empty() && summary.reports.iter().all(InstallReport::is_success);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !ok && policy == FailurePolicy::BestEffort {
        let failed: usize = summary.reports.iter().map(InstallReport::failures).sum();
        let installed: usize = summary.reports.iter().map(InstallReport::installed).sum();
        println!(
            "{}",
            style::status(
                Style::Warning,
                &format!("{} installed, {} failed", installed, failed + summary.errors.len())
            )
        );
    }

    Ok(if ok { 0 } else { 1 })
}

fn collect(
    summary: &mut InstallSummary,
    result: Result<InstallReport, ScaffoldError>,
    checkout: &Path,
    json_output: bool,
) {
    match result {
        Ok(report) => {
            if !json_output {
                print_report(&report, checkout);
            }
            summary.reports.push(report);
        }
        Err(e) => {
            if !json_output {
                eprintln!(
                    "{}",
                    style::status(Style::Failure, &format!("{}. Nothing installed.", e))
                );
            }
            summary.errors.push(e.to_string());
        }
    }
}

fn print_report(report: &InstallReport, checkout: &Path) {
    for outcome in &report.outcomes {
        let source = outcome
            .source
            .strip_prefix(checkout)
            .unwrap_or(&outcome.source);
        match &outcome.status {
            OutcomeStatus::Installed => println!(
                "{}",
                style::status(
                    Style::Success,
                    &format!("'{}' to {}", source.display(), outcome.dest.display())
                )
            ),
            OutcomeStatus::Failed { error } => eprintln!(
                "{}",
                style::status(
                    Style::Failure,
                    &format!("'{}' not installed: {}", source.display(), error)
                )
            ),
        }
    }
    if report.aborted {
        eprintln!(
            "{}",
            style::status(
                Style::Warning,
                &format!("install into {} is incomplete", report.target.display())
            )
        );
    }
}
