//! Build-mode finalisation: read the host manifest out of the bundle, write the bridge
//! manifest and drop the host's copy.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::generation::generate_bridge_manifest;
use crate::entry_points::AliasMapping;
use crate::error::{BridgeError, BridgeResult};
use crate::host::{OutputBundle, OutputEntry};
use crate::models::RuntimeMetadata;

const HOST_MANIFEST_SUFFIX: &str = "manifest.json";

/// Decides whether the host-generated manifest survives the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManifestRetention {
  /// Caller asked to keep the host manifest.
  pub keep_manifest: bool,
  /// The user configured their own manifest path.
  pub custom_manifest_path: bool,
}

impl ManifestRetention {
  /// Returns `true` when the host manifest should be removed after generation.
  pub fn should_delete(self) -> bool {
    !self.keep_manifest && !self.custom_manifest_path
  }
}

/// Locate the host manifest among the emitted files by its name suffix.
pub fn find_manifest_asset(bundle: &OutputBundle) -> Option<(&str, &OutputEntry)> {
  bundle
    .iter()
    .find(|(file_name, _)| file_name.ends_with(HOST_MANIFEST_SUFFIX))
    .map(|(file_name, entry)| (file_name.as_str(), entry))
}

/// Parse the serialised host manifest.
pub fn parse_host_manifest(file_name: &str, entry: &OutputEntry) -> BridgeResult<Value> {
  serde_json::from_slice(entry.contents()).map_err(|err| BridgeError::parse(file_name, err))
}

/// Generate the bridge manifest for a finished build.
///
/// Returns `Ok(None)` when the bundle carries no host manifest. When the retention policy
/// asks for it, deleting the host manifest runs alongside the write and failures of
/// either task are reported together.
pub fn finalize_build(
  entries: &AliasMapping,
  runtime: &RuntimeMetadata,
  bundle: &OutputBundle,
  out_dir: &Path,
  retention: ManifestRetention,
) -> BridgeResult<Option<PathBuf>> {
  let Some((file_name, entry)) = find_manifest_asset(bundle) else {
    info!("no host manifest in build output, skipping bridge manifest");
    return Ok(None);
  };
  let manifest = parse_host_manifest(file_name, entry)?;

  if !retention.should_delete() {
    debug!(file = file_name, "keeping host manifest");
    return generate_bridge_manifest(entries, runtime, manifest, out_dir).map(Some);
  }

  let host_manifest = out_dir.join(file_name);
  let (written, removed) = rayon::join(
    || generate_bridge_manifest(entries, runtime, manifest, out_dir),
    || remove_host_manifest(&host_manifest),
  );

  match (written, removed) {
    (Ok(path), Ok(())) => Ok(Some(path)),
    (written, removed) => Err(BridgeError::Finalize(
      [written.err(), removed.err()].into_iter().flatten().collect(),
    )),
  }
}

fn remove_host_manifest(path: &Path) -> BridgeResult<()> {
  fs::remove_file(path).map_err(|err| BridgeError::io(path, err))?;
  debug!(path = %path.display(), "removed host manifest");
  Ok(())
}
