//! Workspace chores. Run with `cargo run -p mirage-xtask -- <command>`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mirage::options::Options;

#[derive(Parser)]
#[command(name = "xtask", about = "Build tasks for the mirage workspace")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Format check, clippy with warnings denied, then the test suite.
    Ci,
    /// Write the options JSON schema consumed by host option panels.
    Schema {
        #[arg(long, default_value = "assets/options.schema.json")]
        out: PathBuf,
    },
    /// Write a TOML preset holding every default option.
    Preset {
        #[arg(long, default_value = "assets/presets/default.toml")]
        out: PathBuf,
    },
}

fn cargo(args: &[&str]) -> Result<()> {
    eprintln!("cargo {}", args.join(" "));
    let status = Command::new(env!("CARGO"))
        .args(args)
        .status()
        .with_context(|| format!("failed to spawn cargo {}", args[0]))?;
    if !status.success() {
        bail!("cargo {} failed with {status}", args.join(" "));
    }
    Ok(())
}

fn ci() -> Result<()> {
    cargo(&["fmt", "--all", "--", "--check"])?;
    cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    cargo(&["test", "--workspace"])
}

fn write_schema(out: &Path) -> Result<()> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .context("failed to serialize options schema")?;
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, schema)
        .with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn write_preset(out: &Path) -> Result<()> {
    Options::default()
        .save(out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Task::Ci => ci(),
        Task::Schema { out } => write_schema(&out),
        Task::Preset { out } => write_preset(&out),
    }
}
