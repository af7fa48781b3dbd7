/// Canonical form of a field or column name: trimmed, lower-cased, with each
/// internal whitespace run collapsed to a single underscore.
///
/// "Land Size", "land_size" and "  Land   Size " all become `land_size`.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
