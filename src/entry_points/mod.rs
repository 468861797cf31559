//! Normalisation of entry-point declarations into an alias-keyed mapping.
//!
//! The alias helpers, the declaration shapes and the resulting mapping container live in
//! separate submodules so each piece can be tested on its own. The mapping produced here
//! drives both the bundler input list and the `aliases` section of the bridge manifest.

mod alias;
mod declaration;
mod mapping;

pub use alias::{ALIAS_SENTINEL, is_alias, normalize_alias};
pub use declaration::EntryDeclaration;
pub use mapping::{AliasMapping, collect_entry_points};
