//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// flame - write the .flame bridge manifest for a Vite project
#[derive(Parser)]
#[command(name = "flame")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
  /// Write the dev-server bridge manifest
  Serve(ProjectArgs),

  /// Write the bridge manifest from a finished build
  Build(BuildArgs),
}

#[derive(Args)]
pub struct ProjectArgs {
  /// Project root
  #[arg(long, default_value = ".")]
  pub root: PathBuf,

  /// Plugin configuration file (defaults to <root>/flame.config.json when present)
  #[arg(long)]
  pub config: Option<PathBuf>,

  /// JSON file shaped like the host user configuration
  #[arg(long)]
  pub host_config: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
  #[command(flatten)]
  pub project: ProjectArgs,

  /// Keep the host manifest next to the bridge manifest
  #[arg(long)]
  pub keep_manifest: bool,
}
