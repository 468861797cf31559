//! Guess which UI runtime is in use from the host's dedupe list.

use std::fmt;

use serde::{Serialize, Serializer};

/// UI runtime reported in the bridge manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeLibrary {
  /// A dedupe entry mentions `react`.
  React,
  /// A dedupe entry mentions `vue` and none mentions `react`.
  Vue,
  /// Nothing recognised.
  #[default]
  None,
}

impl RuntimeLibrary {
  /// Name written to the manifest; empty when no runtime was detected.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::React => "react",
      Self::Vue => "vue",
      Self::None => "",
    }
  }
}

impl fmt::Display for RuntimeLibrary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for RuntimeLibrary {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

/// Inspect the resolved dedupe list.
///
/// Plain case-sensitive substring matching: any entry containing `react` wins, then any
/// entry containing `vue`.
pub fn detect_library<S: AsRef<str>>(deduped: &[S]) -> RuntimeLibrary {
  if deduped.iter().any(|name| name.as_ref().contains("react")) {
    return RuntimeLibrary::React;
  }
  if deduped.iter().any(|name| name.as_ref().contains("vue")) {
    return RuntimeLibrary::Vue;
  }
  RuntimeLibrary::None
}
