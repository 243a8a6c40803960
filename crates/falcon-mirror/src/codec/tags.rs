//! Comma separated `key=value` tag lists.
//!
//! Keys and values containing `,` or `=` are not escaped; such input does not
//! survive a round trip.

use serde::{Deserialize, Serialize};

/// Names the extension that generated a process.
pub const EXTENSION_NAME_TAG: &str = "_falcon_extension_name";
/// Names the extension job a process belongs to.
pub const EXTENSION_JOB_TAG: &str = "_falcon_extension_job";
/// Marks a legacy mirroring process with its mirror type.
pub const MIRRORING_TYPE_TAG: &str = "_falcon_mirroring_type";

const RESERVED_KEYS: &[&str] = &[EXTENSION_NAME_TAG, EXTENSION_JOB_TAG, MIRRORING_TYPE_TAG];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_reserved(&self) -> bool {
        is_reserved_key(&self.key)
    }
}

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Joins pairs as `k1=v1,k2=v2`, skipping pairs with an empty key or value.
pub fn encode_tags(tags: &[Tag]) -> String {
    tags.iter()
        .filter(|t| !t.key.is_empty() && !t.value.is_empty())
        .map(|t| format!("{}={}", t.key, t.value))
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits on `,` then on the first `=`. An empty string yields no pairs; a
/// segment without `=` yields an empty value.
pub fn decode_tags(value: &str) -> Vec<Tag> {
    if value.is_empty() {
        return Vec::new();
    }

    value
        .split(',')
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => Tag::new(key, value),
            None => Tag::new(segment, ""),
        })
        .collect()
}

/// Like [`decode_tags`], dropping the reserved extension and mirroring markers.
pub fn decode_user_tags(value: &str) -> Vec<Tag> {
    decode_tags(value)
        .into_iter()
        .filter(|t| !t.is_reserved())
        .collect()
}

/// Value of the last tag with the given key.
pub fn find_tag<'a>(tags: &'a [Tag], key: &str) -> Option<&'a str> {
    tags.iter()
        .rev()
        .find(|t| t.key == key)
        .map(|t| t.value.as_str())
}
