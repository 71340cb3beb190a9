pub mod classify;
pub mod config;
pub mod error;
pub mod generate;
pub mod install;
pub mod paths;
pub mod project;
pub mod style;

// Re-export commonly used types
pub use classify::{Classification, PathContext};
pub use config::Config;
pub use error::ScaffoldError;
pub use generate::{ClassSpec, GenerateOptions};
pub use install::{FailurePolicy, InstallReport};
