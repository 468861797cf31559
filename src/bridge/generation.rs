//! Compose and persist the `.flame` bridge manifest.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::entry_points::AliasMapping;
use crate::error::{BridgeError, BridgeResult};
use crate::models::{BridgeManifest, DevManifest, DevManifestChunk, RuntimeMetadata};

/// File name of the bridge manifest inside the build output directory.
pub const BRIDGE_MANIFEST_FILE: &str = ".flame";

/// Assemble the bridge document from the entry mapping, runtime facts and host manifest.
pub fn compose_bridge_manifest(
  entries: &AliasMapping,
  runtime: &RuntimeMetadata,
  manifest: Value,
) -> BridgeManifest {
  BridgeManifest {
    manifest,
    aliases: entries.aliases(),
    library: runtime.library,
    is_server: runtime.is_server,
    port: runtime.port,
    host: runtime.host.clone(),
  }
}

/// Serialise the document and overwrite `<out_dir>/.flame` in a single write.
///
/// The output directory is not created; a missing directory is reported as an error.
pub fn write_bridge_manifest(out_dir: &Path, document: &BridgeManifest) -> BridgeResult<PathBuf> {
  let target = out_dir.join(BRIDGE_MANIFEST_FILE);
  let json = serde_json::to_string(document).map_err(|err| BridgeError::parse(&target, err))?;
  fs::write(&target, json).map_err(|err| BridgeError::io(&target, err))?;
  debug!(path = %target.display(), aliases = document.aliases.len(), "wrote bridge manifest");
  Ok(target)
}

/// Compose and write in one step.
pub fn generate_bridge_manifest(
  entries: &AliasMapping,
  runtime: &RuntimeMetadata,
  manifest: Value,
  out_dir: &Path,
) -> BridgeResult<PathBuf> {
  let document = compose_bridge_manifest(entries, runtime, manifest);
  write_bridge_manifest(out_dir, &document)
}

/// Stand-in host manifest for dev serving, where every entry is served from its source.
pub fn synthesize_dev_manifest(entries: &AliasMapping) -> DevManifest {
  entries
    .iter()
    .map(|(_, path)| {
      (
        path.to_string(),
        DevManifestChunk {
          file: path.to_string(),
          src: path.to_string(),
        },
      )
    })
    .collect()
}
