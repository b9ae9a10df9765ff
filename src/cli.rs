//! Command-line argument parsing for SqlQuest.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Validation service for SQL learning challenges.
#[derive(Parser, Debug)]
#[command(name = "sqlquest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to bind the HTTP listener to (overrides config)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses arguments from the process command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path, falling back to the platform default.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}
