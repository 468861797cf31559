//! Typed view of the host build tool's configuration and build output.
//!
//! Only the fields the bridge reads or negotiates are modelled; everything else the host
//! carries is ignored during deserialisation.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entry_points::EntryDeclaration;

/// Manifest path requested from the host unless the user picked one.
pub const DEFAULT_MANIFEST_FILE: &str = ".vite/manifest.json";
/// Build output directory requested from the host unless the user picked one.
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Host command that selects the session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
  /// Development server.
  Serve,
  /// Production build.
  Build,
}

/// Environment passed alongside the user configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigEnv {
  /// Command the host was started with.
  pub command: Command,
  /// Host mode name (`development`, `production`, ...).
  #[serde(default)]
  pub mode: String,
}

impl ConfigEnv {
  /// Environment for a plain command with the host's conventional mode name.
  pub fn for_command(command: Command) -> Self {
    let mode = match command {
      Command::Serve => "development",
      Command::Build => "production",
    };
    Self {
      command,
      mode: mode.into(),
    }
  }
}

/// `build.manifest` accepts either a toggle or an explicit path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ManifestSetting {
  /// `true`/`false`; the host picks the file name.
  Enabled(bool),
  /// Explicit manifest path relative to the output directory.
  Path(String),
}

impl ManifestSetting {
  /// Explicit path configured by the user, if any.
  pub fn custom_path(&self) -> Option<&str> {
    match self {
      Self::Path(path) => Some(path.as_str()),
      Self::Enabled(_) => None,
    }
  }
}

/// Bundler options nested under `build.rollupOptions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RollupOptions {
  /// Entry points the host declares on its own.
  pub input: Option<EntryDeclaration>,
}

/// User-provided `build` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
  /// Manifest toggle or path.
  pub manifest: Option<ManifestSetting>,
  /// Output directory relative to the project root.
  pub out_dir: Option<String>,
  /// Bundler options.
  pub rollup_options: RollupOptions,
}

/// Dev server section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  /// Listening host.
  pub host: Option<String>,
  /// Listening port.
  pub port: Option<u16>,
}

/// Module resolution section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
  /// Modules forced to resolve to a single instance.
  pub dedupe: Vec<String>,
}

/// Configuration as written by the user, before the host applies plugin overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
  /// Project root; the current directory when absent.
  pub root: Option<PathBuf>,
  /// Build options.
  pub build: BuildConfig,
  /// Dev server options.
  pub server: ServerConfig,
  /// Resolution options.
  pub resolve: ResolveConfig,
}

/// Bundler input requested by the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupInputOverride {
  /// Entry paths in bundler order.
  pub input: Vec<String>,
}

/// Build options requested by the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOverrides {
  /// Manifest setting; always enables manifest output.
  pub manifest: ManifestSetting,
  /// Output directory.
  pub out_dir: String,
  /// Clear the output directory before writing.
  pub empty_out_dir: bool,
  /// Bundler inputs.
  pub rollup_options: RollupInputOverride,
}

/// Dev server options requested in serve mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerOverrides {
  /// Port the server must bind.
  pub port: u16,
  /// Fail instead of picking another port when busy.
  pub strict_port: bool,
  /// Origin for generated asset URLs.
  pub origin: String,
}

/// Partial configuration returned to the host's config hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
  /// Build options.
  pub build: BuildOverrides,
  /// Dev server options, only in serve mode.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub server: Option<ServerOverrides>,
}

/// Resolved `build` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBuild {
  /// Output directory as configured (relative or absolute).
  pub out_dir: PathBuf,
  /// Effective manifest setting.
  pub manifest: ManifestSetting,
}

/// Final configuration after the host merged every plugin's overrides.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
  /// Absolute or working-directory-relative project root.
  pub root: PathBuf,
  /// Build options.
  pub build: ResolvedBuild,
  /// Dev server options.
  pub server: ServerConfig,
  /// Resolution options.
  pub resolve: ResolveConfig,
}

impl ResolvedConfig {
  /// Merge plugin overrides into the user configuration the way the host does.
  pub fn resolve(root: &Path, user: &UserConfig, overrides: &ConfigOverrides) -> Self {
    let root = user
      .root
      .as_ref()
      .map(|configured| root.join(configured))
      .unwrap_or_else(|| root.to_path_buf());

    let mut server = user.server.clone();
    if let Some(forced) = &overrides.server {
      server.port = Some(forced.port);
    }

    Self {
      root,
      build: ResolvedBuild {
        out_dir: PathBuf::from(&overrides.build.out_dir),
        manifest: overrides.build.manifest.clone(),
      },
      server,
      resolve: user.resolve.clone(),
    }
  }

  /// Output directory joined onto the project root.
  pub fn out_dir(&self) -> PathBuf {
    self.root.join(&self.build.out_dir)
  }
}

/// One emitted file in the host's output bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEntry {
  /// Static asset with raw contents.
  Asset {
    /// File contents.
    source: Vec<u8>,
  },
  /// JavaScript chunk.
  Chunk {
    /// Generated code.
    code: String,
  },
}

impl OutputEntry {
  /// Raw bytes of the emitted file.
  pub fn contents(&self) -> &[u8] {
    match self {
      Self::Asset { source } => source.as_slice(),
      Self::Chunk { code } => code.as_bytes(),
    }
  }
}

/// Output bundle keyed by file name relative to the output directory.
pub type OutputBundle = IndexMap<String, OutputEntry>;
