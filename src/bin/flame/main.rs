//! flame CLI - drives the bridge lifecycle outside of a running host

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use flame_bridge::config::load_json;
use flame_bridge::host::{Command, ConfigEnv, OutputBundle, OutputEntry, ResolvedConfig, UserConfig};
use flame_bridge::{FlamePlugin, PluginConfig};

mod cli;

use cli::{BuildArgs, Cli, Commands, ProjectArgs};

const HOST_MANIFEST_SUFFIX: &str = "manifest.json";

fn main() {
  if let Err(e) = run() {
    eprintln!("error: {:#}", e);
    std::process::exit(1);
  }
}

fn run() -> Result<()> {
  let cli = Cli::parse();

  let default_filter = if cli.verbose {
    "flame_bridge=debug,flame=debug"
  } else {
    "flame_bridge=info,flame=info"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .without_time()
    .init();

  match cli.command {
    Commands::Serve(args) => serve(args),
    Commands::Build(args) => build(args),
  }
}

fn serve(args: ProjectArgs) -> Result<()> {
  let (config, user) = load_project(&args)?;
  let mut plugin = FlamePlugin::new(&config);

  let overrides = plugin.config(&user, &ConfigEnv::for_command(Command::Serve));
  let resolved = ResolvedConfig::resolve(&args.root, &user, &overrides);
  if let Some(path) = plugin.config_resolved(&resolved)? {
    println!("{}", path.display());
  }
  Ok(())
}

fn build(args: BuildArgs) -> Result<()> {
  let (mut config, user) = load_project(&args.project)?;
  config.keep_manifest |= args.keep_manifest;
  let mut plugin = FlamePlugin::new(&config);

  let overrides = plugin.config(&user, &ConfigEnv::for_command(Command::Build));
  let resolved = ResolvedConfig::resolve(&args.project.root, &user, &overrides);
  plugin.config_resolved(&resolved)?;

  let out_dir = resolved.out_dir();
  let bundle = scan_output_bundle(&out_dir)?;
  match plugin.write_bundle(&bundle)? {
    Some(path) => println!("{}", path.display()),
    None => tracing::warn!(out_dir = %out_dir.display(), "no host manifest found in build output"),
  }
  Ok(())
}

fn load_project(args: &ProjectArgs) -> Result<(PluginConfig, UserConfig)> {
  let config = match &args.config {
    Some(path) => PluginConfig::from_path(path)
      .with_context(|| format!("failed to load plugin config {}", path.display()))?,
    None => PluginConfig::discover(&args.root).context("failed to load flame.config.json")?,
  };

  let user = match &args.host_config {
    Some(path) => load_json::<UserConfig>(path)
      .with_context(|| format!("failed to load host config {}", path.display()))?,
    None => UserConfig::default(),
  };

  Ok((config, user))
}

/// Rebuild the host's output bundle listing from the files already on disk.
///
/// Only manifest files are read; every other entry is listed with empty contents.
fn scan_output_bundle(out_dir: &Path) -> Result<OutputBundle> {
  let mut bundle = OutputBundle::new();
  for entry in WalkDir::new(out_dir).sort_by_file_name() {
    let entry = entry.with_context(|| format!("failed to scan {}", out_dir.display()))?;
    if !entry.file_type().is_file() {
      continue;
    }

    let relative = entry
      .path()
      .strip_prefix(out_dir)
      .unwrap_or(entry.path())
      .to_string_lossy()
      .replace('\\', "/");
    let source = if relative.ends_with(HOST_MANIFEST_SUFFIX) {
      fs::read(entry.path())
        .with_context(|| format!("failed to read {}", entry.path().display()))?
    } else {
      Vec::new()
    };
    bundle.insert(relative, OutputEntry::Asset { source });
  }
  Ok(bundle)
}
