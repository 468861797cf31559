use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Entry points as declared by the user or by the host's own build input.
///
/// The shape decides the resolution policy: plain paths map to themselves, while the
/// aliased form maps physical paths to short logical names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EntryDeclaration {
  /// A single source path.
  Single(String),
  /// Ordered list of source paths.
  List(Vec<String>),
  /// Physical path to short name, in declaration order.
  Aliased(IndexMap<String, String>),
}

impl EntryDeclaration {
  /// Returns `true` when the declaration names no entry at all.
  ///
  /// A blank single path counts as empty, like an unset host input.
  pub fn is_empty(&self) -> bool {
    match self {
      Self::Single(path) => path.is_empty(),
      Self::List(paths) => paths.is_empty(),
      Self::Aliased(entries) => entries.is_empty(),
    }
  }
}

impl Default for EntryDeclaration {
  fn default() -> Self {
    Self::List(Vec::new())
  }
}

impl From<&str> for EntryDeclaration {
  fn from(path: &str) -> Self {
    Self::Single(path.to_string())
  }
}

impl From<Vec<String>> for EntryDeclaration {
  fn from(paths: Vec<String>) -> Self {
    Self::List(paths)
  }
}

impl From<IndexMap<String, String>> for EntryDeclaration {
  fn from(entries: IndexMap<String, String>) -> Self {
    Self::Aliased(entries)
  }
}
