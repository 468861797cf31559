//! Bridge manifest generation split into composition and build finalisation.

mod finalize;
mod generation;

pub use finalize::{ManifestRetention, finalize_build, find_manifest_asset, parse_host_manifest};
pub use generation::{
  BRIDGE_MANIFEST_FILE, compose_bridge_manifest, generate_bridge_manifest,
  synthesize_dev_manifest, write_bridge_manifest,
};
