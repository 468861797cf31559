//! Data structures produced while bridging the host build to the server consumer.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::entry_points::AliasMapping;
use crate::library::{RuntimeLibrary, detect_library};

/// Loopback host written when the dev server host is not configured.
pub const DEFAULT_DEV_SERVER_HOST: &str = "localhost";
/// Dev server port used when none is configured; deliberately not the host's own 5173.
pub const DEFAULT_DEV_SERVER_PORT: u16 = 5137;

/// Snapshot of runtime facts captured once the host configuration is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeMetadata {
  /// Effective dev server host.
  pub host: String,
  /// Effective dev server port.
  pub port: u16,
  /// UI runtime inferred from the dedupe list.
  pub library: RuntimeLibrary,
  /// `true` while the host is serving unbundled sources.
  pub is_server: bool,
}

impl RuntimeMetadata {
  /// Apply the dev server fallbacks and run library detection.
  pub fn capture<S: AsRef<str>>(
    host: Option<&str>,
    port: Option<u16>,
    deduped: &[S],
    is_server: bool,
  ) -> Self {
    Self {
      host: host.unwrap_or(DEFAULT_DEV_SERVER_HOST).to_string(),
      port: port.unwrap_or(DEFAULT_DEV_SERVER_PORT),
      library: detect_library(deduped),
      is_server,
    }
  }

  /// Origin the dev server uses for cross-origin asset URLs.
  pub fn origin(&self) -> String {
    format!("http://{}:{}", self.host, self.port)
  }
}

/// Document written to `<outDir>/.flame`.
///
/// Consumers must treat each write as a full replacement and tolerate additional keys.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeManifest {
  /// Host manifest, passed through untouched.
  pub manifest: Value,
  /// Alias-keyed subset of the entry mapping.
  pub aliases: AliasMapping,
  /// Detected UI runtime, empty when unknown.
  pub library: RuntimeLibrary,
  /// Whether the manifest describes a dev server session.
  pub is_server: bool,
  /// Dev server port.
  pub port: u16,
  /// Dev server host.
  pub host: String,
}

/// Manifest chunk synthesised for unbundled dev serving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevManifestChunk {
  /// Served file path.
  pub file: String,
  /// Source path, identical to `file` without bundling.
  pub src: String,
}

/// Host-shaped manifest keyed by source path.
pub type DevManifest = IndexMap<String, DevManifestChunk>;
