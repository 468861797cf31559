use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::alias::{is_alias, normalize_alias};
use super::declaration::EntryDeclaration;

/// Insertion-ordered mapping from key (physical path or `@alias`) to physical path.
///
/// Re-inserting an existing key replaces its value in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AliasMapping {
  entries: IndexMap<String, String>,
}

impl AliasMapping {
  /// Create an empty mapping.
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or overwrite a key.
  pub fn insert(&mut self, key: impl Into<String>, path: impl Into<String>) {
    self.entries.insert(key.into(), path.into());
  }

  /// Look up the physical path stored for a key.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when the mapping holds no entries.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Iterate over `(key, path)` pairs in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .entries
      .iter()
      .map(|(key, path)| (key.as_str(), path.as_str()))
  }

  /// Physical paths in insertion order.
  ///
  /// This is the bundler input list, so the order is significant.
  pub fn paths(&self) -> Vec<String> {
    self.entries.values().cloned().collect()
  }

  /// Layer `self` on top of a lower-precedence mapping.
  ///
  /// The result starts with `base` in its own order; keys from `self` that already exist
  /// overwrite the value at the existing position, new keys are appended.
  pub fn merged_over(&self, base: &AliasMapping) -> AliasMapping {
    let mut merged = base.clone();
    for (key, path) in &self.entries {
      merged.entries.insert(key.clone(), path.clone());
    }
    merged
  }

  /// Only the entries whose key is an alias.
  pub fn aliases(&self) -> AliasMapping {
    self
      .entries
      .iter()
      .filter(|(key, _)| is_alias(key))
      .map(|(key, path)| (key.clone(), path.clone()))
      .collect()
  }
}

impl FromIterator<(String, String)> for AliasMapping {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}

impl From<&EntryDeclaration> for AliasMapping {
  fn from(declaration: &EntryDeclaration) -> Self {
    collect_entry_points(declaration)
  }
}

/// Resolve an entry declaration into its canonical alias mapping.
///
/// Plain paths map to themselves. Aliased declarations are inverted: the declared short
/// name becomes the `@`-prefixed key and the declared path becomes the value. Later
/// entries silently win when two names normalise to the same alias.
pub fn collect_entry_points(declaration: &EntryDeclaration) -> AliasMapping {
  let mut mapping = AliasMapping::new();
  match declaration {
    EntryDeclaration::Single(path) => mapping.insert(path.as_str(), path.as_str()),
    EntryDeclaration::List(paths) => {
      for path in paths {
        mapping.insert(path.as_str(), path.as_str());
      }
    }
    EntryDeclaration::Aliased(entries) => {
      for (path, short_name) in entries {
        mapping.insert(normalize_alias(short_name), path.as_str());
      }
    }
  }
  mapping
}

#[cfg(test)]
mod tests {
  use super::*;

  fn aliased(pairs: &[(&str, &str)]) -> EntryDeclaration {
    EntryDeclaration::Aliased(
      pairs
        .iter()
        .map(|(path, name)| (path.to_string(), name.to_string()))
        .collect(),
    )
  }

  fn mapping(pairs: &[(&str, &str)]) -> AliasMapping {
    pairs
      .iter()
      .map(|(key, path)| (key.to_string(), path.to_string()))
      .collect()
  }

  #[test]
  fn single_path_maps_to_itself() {
    let resolved = collect_entry_points(&EntryDeclaration::from("foo/bar.js"));
    assert_eq!(resolved, mapping(&[("foo/bar.js", "foo/bar.js")]));
  }

  #[test]
  fn list_paths_map_to_themselves_in_order() {
    let resolved = collect_entry_points(&EntryDeclaration::List(vec![
      "foo/bar.js".into(),
      "foo/bar.css".into(),
    ]));

    assert_eq!(
      resolved.iter().collect::<Vec<_>>(),
      vec![("foo/bar.js", "foo/bar.js"), ("foo/bar.css", "foo/bar.css")]
    );
    assert!(resolved.aliases().is_empty());
  }

  #[test]
  fn list_with_repeated_path_keeps_one_entry() {
    let resolved =
      collect_entry_points(&EntryDeclaration::List(vec!["a.js".into(), "a.js".into()]));
    assert_eq!(resolved.len(), 1);
  }

  #[test]
  fn aliased_declaration_is_inverted() {
    let resolved = collect_entry_points(&aliased(&[
      ("foo/bar.js", "foo"),
      ("hoge/huga.js", "hoge"),
    ]));

    assert_eq!(
      resolved,
      mapping(&[("@foo", "foo/bar.js"), ("@hoge", "hoge/huga.js")])
    );
  }

  #[test]
  fn colliding_aliases_keep_the_later_path() {
    let resolved = collect_entry_points(&aliased(&[("one.js", "page"), ("two.js", "@page")]));

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved.get("@page"), Some("two.js"));
  }

  #[test]
  fn empty_declarations_resolve_to_empty_mapping() {
    assert!(collect_entry_points(&EntryDeclaration::List(Vec::new())).is_empty());
    assert!(collect_entry_points(&aliased(&[])).is_empty());
  }

  #[test]
  fn plugin_entries_win_on_collision() {
    let plugin = mapping(&[("@home", "src/home.ts")]);
    let host = mapping(&[("@home", "src/legacy.ts")]);

    let merged = plugin.merged_over(&host);
    assert_eq!(merged.get("@home"), Some("src/home.ts"));
  }

  #[test]
  fn merge_keeps_host_order_and_overwrites_in_place() {
    let host = mapping(&[("a.js", "a.js"), ("@b", "host-b.js"), ("c.js", "c.js")]);
    let plugin = mapping(&[("@d", "d.js"), ("@b", "plugin-b.js")]);

    let merged = plugin.merged_over(&host);
    assert_eq!(merged.paths(), vec!["a.js", "plugin-b.js", "c.js", "d.js"]);
  }

  #[test]
  fn merging_with_empty_host_is_identity() {
    let plugin = mapping(&[("@x", "x.js"), ("y.js", "y.js")]);
    assert_eq!(plugin.merged_over(&AliasMapping::new()), plugin);
  }

  #[test]
  fn aliases_drop_path_keyed_entries() {
    let resolved = mapping(&[("@foo", "x.js"), ("y.js", "y.js")]);
    assert_eq!(resolved.aliases(), mapping(&[("@foo", "x.js")]));
  }

  #[test]
  fn serialises_as_plain_object() {
    let resolved = mapping(&[("@foo", "x.js"), ("@bar", "y.js")]);
    assert_eq!(
      serde_json::to_string(&resolved).unwrap(),
      r#"{"@foo":"x.js","@bar":"y.js"}"#
    );
  }
}
