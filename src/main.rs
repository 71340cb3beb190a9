use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cppkit::style::{self, Style};

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Scaffold C++ classes and projects, install shared headers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate <classname>.hpp and a matching .cpp stub
    Mkclass {
        /// Class name; file names use its lowercase form
        name: Option<String>,

        /// Make a class template with these type parameters (header only)
        #[arg(short = 't', long = "template", num_args = 0.., value_name = "PARAM")]
        template: Option<Vec<String>>,

        /// Do not generate the implementation stub
        #[arg(long)]
        header_only: bool,

        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,

        /// Generate as if invoked from this directory
        #[arg(short = 'C', long = "dir", value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Create CMakeLists.txt, main.cpp and build/
    Init {
        /// Project directory (defaults to the current directory)
        dir: Option<PathBuf>,

        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
    },

    /// Install generator scripts and shared headers
    Install {
        /// Script destination (defaults to /usr/local/bin)
        install_dir: Option<PathBuf>,

        /// Checkout containing scripts/ and headers/ (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        from: Option<PathBuf>,

        /// System include root; headers go to <DIR>/utility
        #[arg(long, value_name = "DIR")]
        include_dir: Option<PathBuf>,

        /// Keep going after a failed file and summarize at the end
        #[arg(long)]
        best_effort: bool,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    init_logging();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{}", style::status(Style::Failure, &format!("{:#}", e)));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Mkclass {
            name,
            template,
            header_only,
            force,
            dir,
        } => {
            commands::mkclass::execute(name, template, header_only, force, dir)?;
        }
        Commands::Init { dir, force } => {
            commands::init::execute(dir, force)?;
        }
        Commands::Install {
            install_dir,
            from,
            include_dir,
            best_effort,
            json,
        } => {
            let exit_code =
                commands::install::execute(install_dir, from, include_dir, best_effort, json)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
    }
    Ok(())
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
