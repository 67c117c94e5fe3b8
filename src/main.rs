//! transcribe CLI - document a Python source tree as a JSON doc tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use transcribe::{Scribe, ScribeConfig};

/// Extract documentation from a Python source tree into a hierarchical JSON document.
#[derive(Parser)]
#[command(name = "transcribe", version, about)]
struct Cli {
    /// Root directory of the package to document
    input: PathBuf,

    /// Output JSON file (parent directories are created)
    output: PathBuf,

    /// JSON configuration file
    #[arg(long, env = "TRANSCRIBE_CONFIG")]
    config: Option<PathBuf>,

    /// Group classes under a `classes/` href segment
    #[arg(long)]
    group_classes: bool,

    /// Group functions under a `routines/` href segment
    #[arg(long)]
    group_functions: bool,

    /// Load files one at a time instead of on the worker pool
    #[arg(long)]
    sequential: bool,

    /// Extra ignore pattern (repeatable), same syntax as `.transcribeignore`
    #[arg(long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Enable info-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn scribe_config(&self) -> Result<ScribeConfig> {
        let mut config = match &self.config {
            Some(path) => ScribeConfig::from_file(path)?,
            None => ScribeConfig::default(),
        };
        if self.group_classes {
            config.separate_classes = false;
        }
        if self.group_functions {
            config.separate_functions = false;
        }
        if self.sequential {
            config.parallel = false;
        }
        config.exclude.extend(self.exclude.iter().cloned());
        Ok(config)
    }

    fn execute(&self) -> Result<()> {
        let config = self.scribe_config()?;
        let tree = Scribe::new(config)
            .transcribe(&self.input, &self.output)
            .with_context(|| format!("Failed to document '{}'", self.input.display()))?;
        info!(
            "{} nodes written to {}",
            tree.walk().len(),
            self.output.display()
        );
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
