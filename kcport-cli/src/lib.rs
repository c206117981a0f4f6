//! Command-line front end for the kcport pipeline.

pub mod args;
mod commands;
pub mod config;
pub mod progress;

pub use args::Cli;
pub use commands::run;
pub use config::FileConfig;
pub use progress::LogProgress;
