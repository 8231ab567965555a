use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};

lazy_static! {
    /// Regex for validating article slugs
    /// Must be lowercase alphanumeric with single hyphens between segments
    /// - Valid: "hello-world", "post123", "a-b-c"
    /// - Invalid: "-post", "post-", "post--name", "Post", "post_name"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for tag references in article filters
    /// Alphanumeric and hyphens; double hyphens are rejected separately
    pub static ref TAG_REF_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9-]+$").unwrap();

    /// Regex for hex colors such as "#1e90ff"
    pub static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// Returns true when every tag reference is well formed
pub fn valid_tag_refs(tags: &[String]) -> bool {
    tags.iter()
        .all(|tag| TAG_REF_REGEX.is_match(tag) && !tag.contains("--"))
}

/// Deserializer for patch fields that distinguishes "absent" from "null".
///
/// Pair with `#[serde(default)]`: a missing field stays `None`, an explicit
/// `null` becomes `Some(None)` and clears the stored value.
pub fn deserialize_patch<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
