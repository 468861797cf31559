//! Plugin configuration loader.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::entry_points::EntryDeclaration;
use crate::error::{BridgeError, BridgeResult};

/// File name searched for by [`PluginConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "flame.config.json";

/// Options handed to the plugin when it is activated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
  /// Entry points, with or without aliases.
  pub input: EntryDeclaration,
  /// Keep the host manifest next to the bridge manifest after a build.
  pub keep_manifest: bool,
}

impl PluginConfig {
  /// Plugin configuration for an entry declaration with default options.
  pub fn new(input: impl Into<EntryDeclaration>) -> Self {
    Self {
      input: input.into(),
      keep_manifest: false,
    }
  }

  /// Load `flame.config.json` from the directory, or fall back to defaults when absent.
  pub fn discover(dir: &Path) -> BridgeResult<Self> {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if !candidate.exists() {
      return Ok(Self::default());
    }
    Self::from_path(&candidate)
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> BridgeResult<Self> {
    load_json(path)
  }
}

/// Read and deserialise a JSON configuration file.
///
/// Content that parses as JSON but has the wrong shape is reported as a configuration error.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> BridgeResult<T> {
  let content = fs::read_to_string(path).map_err(|err| BridgeError::io(path, err))?;
  serde_json::from_str(&content).map_err(|err| {
    if err.is_data() {
      BridgeError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
      }
    } else {
      BridgeError::parse(path, err)
    }
  })
}
