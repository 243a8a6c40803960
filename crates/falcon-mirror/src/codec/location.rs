use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static RE_S3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^s3[an]?://").unwrap());
static RE_AZURE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^wasbs?://").unwrap());

/// Storage kind behind a mirror source or target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocationKind {
    #[serde(rename = "S3")]
    S3,
    #[serde(rename = "Azure")]
    Azure,
    #[default]
    #[serde(rename = "HDFS")]
    Hdfs,
}

impl LocationKind {
    /// Classifies a URL. S3 is tested first, then Azure; everything else,
    /// including the empty string, is HDFS.
    pub fn classify(url: &str) -> Self {
        if RE_S3.is_match(url) {
            LocationKind::S3
        } else if RE_AZURE.is_match(url) {
            LocationKind::Azure
        } else {
            LocationKind::Hdfs
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::S3 => "S3",
            LocationKind::Azure => "Azure",
            LocationKind::Hdfs => "HDFS",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
