//! Config command handlers.

use crate::config::{
    discover_config_file, generate_example_config, generate_json_schema, load_or_default,
    CONFIG_FILE_NAMES,
};
use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// Sub-subcommands for the `config` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .flow-diff.yaml in the current directory
    Init,
}

/// Run a `config` action.
pub fn run_config(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = load_or_default(explicit)?;
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
            Ok(())
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for path in search_paths() {
                eprintln!("  {}", path.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match discover_config_file(explicit)? {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
            Ok(())
        }
        ConfigAction::Init => {
            let dir = std::env::current_dir().context("cannot determine current directory")?;
            let target = init_config(&dir)?;
            eprintln!("Created {}", target.display());
            Ok(())
        }
    }
}

/// Write the JSON Schema to `output`, or stdout when absent.
pub fn run_config_schema(output: Option<&Path>) -> Result<()> {
    let schema = generate_json_schema().context("failed to serialize config schema")?;
    match output {
        Some(path) => {
            std::fs::write(path, &schema)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Schema written to {}", path.display());
        }
        None => println!("{schema}"),
    }
    Ok(())
}

/// Write an example `.flow-diff.yaml` into `dir`, refusing to overwrite.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(".flow-diff.yaml");
    if target.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(&target, generate_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}

fn search_paths() -> Vec<PathBuf> {
    [
        std::env::current_dir().ok(),
        ::dirs::config_dir().map(|p| p.join("flow-diff")),
        ::dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
