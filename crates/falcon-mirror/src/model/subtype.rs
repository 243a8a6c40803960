use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codec::tags::{
    decode_tags, find_tag, Tag, EXTENSION_JOB_TAG, EXTENSION_NAME_TAG, MIRRORING_TYPE_TAG,
};
use crate::error::MappingError;

/// The kind of replication job a process entity describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobSubtype {
    #[serde(rename = "HDFS")]
    Hdfs,
    #[serde(rename = "HIVE")]
    Hive,
    #[serde(rename = "SNAPSHOT")]
    Snapshot,
}

impl JobSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSubtype::Hdfs => "HDFS",
            JobSubtype::Hive => "HIVE",
            JobSubtype::Snapshot => "SNAPSHOT",
        }
    }

    /// Extension name the server registers jobs of this sub-type under.
    pub fn extension_name(&self) -> &'static str {
        match self {
            JobSubtype::Hdfs => "HDFS-MIRRORING",
            JobSubtype::Hive => "HIVE-MIRRORING",
            JobSubtype::Snapshot => "HDFS-SNAPSHOT-MIRRORING",
        }
    }

    /// Tags that mark a newly created process as this sub-type.
    pub fn marker_tags(&self, job_name: &str) -> Vec<Tag> {
        match self {
            JobSubtype::Hdfs | JobSubtype::Hive => {
                vec![Tag::new(MIRRORING_TYPE_TAG, self.as_str())]
            }
            JobSubtype::Snapshot => vec![
                Tag::new(EXTENSION_NAME_TAG, self.extension_name()),
                Tag::new(EXTENSION_JOB_TAG, job_name),
            ],
        }
    }

    pub fn all() -> &'static [JobSubtype] {
        &[JobSubtype::Hdfs, JobSubtype::Hive, JobSubtype::Snapshot]
    }

    /// Resolves the sub-type from a process tag string.
    ///
    /// An extension-name marker takes precedence over a mirroring-type marker.
    /// A marker with an unrecognised value is an error. Without any marker
    /// `fallback` applies; with no fallback the tags are rejected.
    pub fn resolve(tags: &str, fallback: Option<JobSubtype>) -> Result<Self, MappingError> {
        let unknown = || MappingError::UnknownSubtype {
            tags: tags.to_string(),
        };
        let pairs = decode_tags(tags);

        if let Some(extension) = find_tag(&pairs, EXTENSION_NAME_TAG) {
            return JobSubtype::all()
                .iter()
                .copied()
                .find(|s| s.extension_name() == extension)
                .ok_or_else(unknown);
        }

        if let Some(mirror_type) = find_tag(&pairs, MIRRORING_TYPE_TAG) {
            return match mirror_type {
                "HDFS" => Ok(JobSubtype::Hdfs),
                "HIVE" => Ok(JobSubtype::Hive),
                _ => Err(unknown()),
            };
        }

        match fallback {
            Some(subtype) => {
                tracing::warn!(
                    tags = %tags,
                    fallback = %subtype,
                    "Process carries no sub-type marker, using fallback"
                );
                Ok(subtype)
            }
            None => Err(unknown()),
        }
    }
}

impl fmt::Display for JobSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobSubtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HDFS" => Ok(JobSubtype::Hdfs),
            "HIVE" => Ok(JobSubtype::Hive),
            "SNAPSHOT" => Ok(JobSubtype::Snapshot),
            _ => Err(format!("Unknown job sub-type: {}", s)),
        }
    }
}
