//! Host lifecycle glue: the three hooks the host build tool calls on the plugin.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use crate::bridge::{
  ManifestRetention, finalize_build, generate_bridge_manifest, synthesize_dev_manifest,
};
use crate::config::PluginConfig;
use crate::entry_points::{AliasMapping, collect_entry_points};
use crate::error::{BridgeError, BridgeResult};
use crate::host::{
  BuildOverrides, Command, ConfigEnv, ConfigOverrides, DEFAULT_MANIFEST_FILE, DEFAULT_OUT_DIR,
  ManifestSetting, OutputBundle, ResolvedConfig, RollupInputOverride, ServerOverrides, UserConfig,
};
use crate::models::{DEFAULT_DEV_SERVER_HOST, DEFAULT_DEV_SERVER_PORT, RuntimeMetadata};

/// Name the plugin registers with the host.
pub const PLUGIN_NAME: &str = "flame-vite-plugin";

/// Session mode, chosen once from the host command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Unbundled dev serving; the bridge manifest is written once configuration resolves.
  Serve,
  /// Production build; the bridge manifest is written after the bundle is on disk.
  Build,
}

impl From<Command> for Mode {
  fn from(command: Command) -> Self {
    match command {
      Command::Serve => Self::Serve,
      Command::Build => Self::Build,
    }
  }
}

/// One plugin activation.
///
/// The entry mapping is merged with the host input during [`FlamePlugin::config`] and is
/// read-only afterwards. Mode, manifest ownership and runtime metadata are each captured
/// once.
#[derive(Debug)]
pub struct FlamePlugin {
  entries: AliasMapping,
  keep_manifest: bool,
  mode: OnceLock<Mode>,
  custom_manifest_path: OnceLock<bool>,
  runtime: OnceLock<RuntimeMetadata>,
  out_dir: OnceLock<PathBuf>,
}

impl FlamePlugin {
  /// Activate the plugin for the given configuration.
  pub fn new(config: &PluginConfig) -> Self {
    let entries = collect_entry_points(&config.input);
    debug!(entries = entries.len(), "resolved plugin entry points");
    Self {
      entries,
      keep_manifest: config.keep_manifest,
      mode: OnceLock::new(),
      custom_manifest_path: OnceLock::new(),
      runtime: OnceLock::new(),
      out_dir: OnceLock::new(),
    }
  }

  /// Registered plugin name.
  pub fn name(&self) -> &'static str {
    PLUGIN_NAME
  }

  /// Current entry mapping.
  pub fn entries(&self) -> &AliasMapping {
    &self.entries
  }

  /// Mode selected by the config hook.
  pub fn mode(&self) -> Option<Mode> {
    self.mode.get().copied()
  }

  /// Runtime metadata captured by the config-resolved hook.
  pub fn runtime(&self) -> Option<&RuntimeMetadata> {
    self.runtime.get()
  }

  /// Config hook: merge the host's own inputs and negotiate build and server options.
  pub fn config(&mut self, user: &UserConfig, env: &ConfigEnv) -> ConfigOverrides {
    let mode = Mode::from(env.command);
    if self.mode.set(mode).is_ok() {
      let host_entries = user
        .build
        .rollup_options
        .input
        .as_ref()
        .filter(|input| !input.is_empty())
        .map(collect_entry_points)
        .unwrap_or_default();
      self.entries = self.entries.merged_over(&host_entries);
      info!(?mode, inputs = self.entries.len(), "configured flame bridge");
    } else {
      warn!("config hook called more than once, keeping the first mode and inputs");
    }

    let custom = user
      .build
      .manifest
      .as_ref()
      .and_then(ManifestSetting::custom_path);
    if self.custom_manifest_path.set(custom.is_some()).is_err()
      && self.custom_manifest_path.get() != Some(&custom.is_some())
    {
      warn!("manifest path changed on a repeated config call, keeping the first retention policy");
    }

    let manifest = match custom {
      Some(path) => ManifestSetting::Path(path.to_string()),
      None => ManifestSetting::Path(DEFAULT_MANIFEST_FILE.to_string()),
    };

    let server = (self.mode() == Some(Mode::Serve)).then(|| {
      let host = user.server.host.as_deref().unwrap_or(DEFAULT_DEV_SERVER_HOST);
      let port = user.server.port.unwrap_or(DEFAULT_DEV_SERVER_PORT);
      ServerOverrides {
        port,
        strict_port: true,
        origin: format!("http://{host}:{port}"),
      }
    });

    ConfigOverrides {
      build: BuildOverrides {
        manifest,
        out_dir: user
          .build
          .out_dir
          .clone()
          .unwrap_or_else(|| DEFAULT_OUT_DIR.to_string()),
        empty_out_dir: true,
        rollup_options: RollupInputOverride {
          input: self.entries.paths(),
        },
      },
      server,
    }
  }

  /// Config-resolved hook: capture runtime metadata and, in serve mode, write the bridge
  /// manifest straight away since the host emits none while serving.
  pub fn config_resolved(&self, resolved: &ResolvedConfig) -> BridgeResult<Option<PathBuf>> {
    let mode = self
      .mode()
      .ok_or(BridgeError::HookOrder("config_resolved called before config"))?;

    let runtime = self.runtime.get_or_init(|| {
      RuntimeMetadata::capture(
        resolved.server.host.as_deref(),
        resolved.server.port,
        &resolved.resolve.dedupe,
        mode == Mode::Serve,
      )
    });
    let out_dir = self.out_dir.get_or_init(|| resolved.out_dir());
    debug!(
      library = %runtime.library,
      port = runtime.port,
      out_dir = %out_dir.display(),
      "captured runtime metadata"
    );

    if mode != Mode::Serve {
      return Ok(None);
    }

    let dev_manifest = synthesize_dev_manifest(&self.entries);
    let manifest = serde_json::to_value(&dev_manifest)
      .map_err(|err| BridgeError::parse(out_dir.as_path(), err))?;
    let path = generate_bridge_manifest(&self.entries, runtime, manifest, out_dir)?;
    info!(path = %path.display(), "wrote dev bridge manifest");
    Ok(Some(path))
  }

  /// Write-bundle hook: build the bridge manifest from the host's emitted manifest.
  pub fn write_bundle(&self, bundle: &OutputBundle) -> BridgeResult<Option<PathBuf>> {
    match self.mode() {
      None => return Err(BridgeError::HookOrder("write_bundle called before config")),
      Some(Mode::Serve) => {
        debug!("ignoring bundle output outside build mode");
        return Ok(None);
      }
      Some(Mode::Build) => {}
    }
    let (Some(runtime), Some(out_dir)) = (self.runtime.get(), self.out_dir.get()) else {
      return Err(BridgeError::HookOrder(
        "write_bundle called before config_resolved",
      ));
    };

    let retention = ManifestRetention {
      keep_manifest: self.keep_manifest,
      custom_manifest_path: self.custom_manifest_path.get().copied().unwrap_or(false),
    };
    let written = finalize_build(&self.entries, runtime, bundle, out_dir, retention)?;
    if let Some(path) = &written {
      info!(path = %path.display(), "wrote bridge manifest");
    }
    Ok(written)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entry_points::EntryDeclaration;
  use crate::host::{BuildConfig, RollupOptions};
  use indexmap::IndexMap;

  fn aliased(pairs: &[(&str, &str)]) -> EntryDeclaration {
    EntryDeclaration::Aliased(
      pairs
        .iter()
        .map(|(path, name)| (path.to_string(), name.to_string()))
        .collect::<IndexMap<_, _>>(),
    )
  }

  fn build_env() -> ConfigEnv {
    ConfigEnv::for_command(Command::Build)
  }

  #[test]
  fn string_input_config() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new("foo/bar.js"));
    let overrides = plugin.config(&UserConfig::default(), &build_env());

    assert_eq!(plugin.name(), "flame-vite-plugin");
    assert_eq!(
      overrides.build.manifest,
      ManifestSetting::Path(".vite/manifest.json".into())
    );
    assert_eq!(overrides.build.out_dir, "dist");
    assert!(overrides.build.empty_out_dir);
    assert_eq!(overrides.build.rollup_options.input, vec!["foo/bar.js"]);
    assert!(overrides.server.is_none());
  }

  #[test]
  fn list_input_config() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new(EntryDeclaration::List(vec![
      "foo/bar.js".into(),
      "foo/bar.css".into(),
    ])));
    let overrides = plugin.config(&UserConfig::default(), &build_env());

    assert_eq!(
      overrides.build.rollup_options.input,
      vec!["foo/bar.js", "foo/bar.css"]
    );
  }

  #[test]
  fn aliased_input_config() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new(aliased(&[
      ("foo/bar.js", "foo"),
      ("hoge/huga.js", "hoge"),
    ])));
    let overrides = plugin.config(&UserConfig::default(), &build_env());

    assert_eq!(
      overrides.build.rollup_options.input,
      vec!["foo/bar.js", "hoge/huga.js"]
    );
    assert_eq!(plugin.entries().get("@foo"), Some("foo/bar.js"));
  }

  #[test]
  fn host_inputs_come_first_and_lose_collisions() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new(aliased(&[
      ("src/home.ts", "home"),
      ("src/about.ts", "about"),
    ])));
    let user = UserConfig {
      build: BuildConfig {
        rollup_options: RollupOptions {
          input: Some(aliased(&[("src/old-home.ts", "home"), ("src/admin.ts", "admin")])),
        },
        ..BuildConfig::default()
      },
      ..UserConfig::default()
    };

    let overrides = plugin.config(&user, &build_env());
    assert_eq!(
      overrides.build.rollup_options.input,
      vec!["src/home.ts", "src/admin.ts", "src/about.ts"]
    );
  }

  #[test]
  fn user_paths_are_respected() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new("main.ts"));
    let user = UserConfig {
      build: BuildConfig {
        manifest: Some(ManifestSetting::Path("assets.json".into())),
        out_dir: Some("public/build".into()),
        ..BuildConfig::default()
      },
      ..UserConfig::default()
    };

    let overrides = plugin.config(&user, &build_env());
    assert_eq!(overrides.build.manifest, ManifestSetting::Path("assets.json".into()));
    assert_eq!(overrides.build.out_dir, "public/build");
  }

  #[test]
  fn serve_mode_forces_port_and_origin() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new("main.ts"));
    let overrides = plugin.config(
      &UserConfig::default(),
      &ConfigEnv::for_command(Command::Serve),
    );

    assert_eq!(plugin.mode(), Some(Mode::Serve));
    let server = overrides.server.unwrap();
    assert_eq!(server.port, 5137);
    assert!(server.strict_port);
    assert_eq!(server.origin, "http://localhost:5137");
  }

  #[test]
  fn second_config_call_does_not_merge_again() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new("main.ts"));
    let user = UserConfig {
      build: BuildConfig {
        rollup_options: RollupOptions {
          input: Some(EntryDeclaration::from("extra.ts")),
        },
        ..BuildConfig::default()
      },
      ..UserConfig::default()
    };

    plugin.config(&user, &build_env());
    plugin.config(&UserConfig::default(), &ConfigEnv::for_command(Command::Serve));

    assert_eq!(plugin.mode(), Some(Mode::Build));
    assert_eq!(plugin.entries().paths(), vec!["extra.ts", "main.ts"]);
  }

  #[test]
  fn hooks_out_of_order_are_rejected() {
    let plugin = FlamePlugin::new(&PluginConfig::new("main.ts"));
    let resolved = ResolvedConfig::resolve(
      std::path::Path::new("."),
      &UserConfig::default(),
      &ConfigOverrides {
        build: BuildOverrides {
          manifest: ManifestSetting::Enabled(true),
          out_dir: DEFAULT_OUT_DIR.into(),
          empty_out_dir: true,
          rollup_options: RollupInputOverride { input: Vec::new() },
        },
        server: None,
      },
    );

    assert!(matches!(
      plugin.config_resolved(&resolved),
      Err(BridgeError::HookOrder(_))
    ));
  }

  #[test]
  fn write_bundle_before_config_fails() {
    let plugin = FlamePlugin::new(&PluginConfig::new("main.ts"));

    assert!(matches!(
      plugin.write_bundle(&OutputBundle::new()),
      Err(BridgeError::HookOrder("write_bundle called before config"))
    ));
  }

  #[test]
  fn blank_host_input_adds_no_entry() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new("main.ts"));
    let user = UserConfig {
      build: BuildConfig {
        rollup_options: RollupOptions {
          input: Some(EntryDeclaration::from("")),
        },
        ..BuildConfig::default()
      },
      ..UserConfig::default()
    };

    let overrides = plugin.config(&user, &build_env());
    assert_eq!(overrides.build.rollup_options.input, vec!["main.ts"]);
    assert_eq!(plugin.entries().get(""), None);
  }

  #[test]
  fn retention_follows_first_config_call() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new("main.ts"));
    let custom = UserConfig {
      build: BuildConfig {
        manifest: Some(ManifestSetting::Path("assets.json".into())),
        ..BuildConfig::default()
      },
      ..UserConfig::default()
    };

    plugin.config(&UserConfig::default(), &build_env());
    plugin.config(&custom, &build_env());

    assert_eq!(plugin.custom_manifest_path.get(), Some(&false));
  }

  #[test]
  fn write_bundle_before_config_resolved_fails() {
    let mut plugin = FlamePlugin::new(&PluginConfig::new("main.ts"));
    plugin.config(&UserConfig::default(), &build_env());

    assert!(matches!(
      plugin.write_bundle(&OutputBundle::new()),
      Err(BridgeError::HookOrder(_))
    ));
  }
}
