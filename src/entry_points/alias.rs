/// Prefix marking a mapping key as a logical alias rather than a physical path.
pub const ALIAS_SENTINEL: char = '@';

/// Turn a short entry name into an alias key.
///
/// At most one leading sentinel is stripped before re-prefixing, so `"foo"` and `"@foo"`
/// both become `"@foo"` while `"@@foo"` keeps one of its sentinels.
pub fn normalize_alias(short_name: &str) -> String {
  let bare = short_name
    .strip_prefix(ALIAS_SENTINEL)
    .unwrap_or(short_name);
  format!("{ALIAS_SENTINEL}{bare}")
}

/// Returns `true` when a mapping key carries the alias sentinel.
pub fn is_alias(key: &str) -> bool {
  key.starts_with(ALIAS_SENTINEL)
}
