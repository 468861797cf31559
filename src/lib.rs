#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod bridge;
pub mod config;
pub mod entry_points;
pub mod error;
pub mod host;
pub mod library;
pub mod models;
pub mod plugin;

pub use bridge::{BRIDGE_MANIFEST_FILE, ManifestRetention, finalize_build, generate_bridge_manifest};
pub use config::PluginConfig;
pub use entry_points::{AliasMapping, EntryDeclaration, collect_entry_points, normalize_alias};
pub use error::{BridgeError, BridgeResult};
pub use library::{RuntimeLibrary, detect_library};
pub use models::{BridgeManifest, RuntimeMetadata};
pub use plugin::{FlamePlugin, Mode};
