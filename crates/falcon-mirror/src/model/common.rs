use chrono::{NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::Frequency;

/// Which side of the replication the process is scheduled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOn {
    #[default]
    Source,
    Target,
}

/// Job validity window as wall-clock times in `timezone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Validity {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub timezone: String,
}

impl Default for Validity {
    fn default() -> Self {
        Self {
            start: Some(Utc::now().date_naive().and_time(NaiveTime::MIN)),
            end: None,
            timezone: default_timezone(),
        }
    }
}

pub(crate) fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Retry {
    pub policy: String,
    pub delay: Frequency,
    pub attempts: u32,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            policy: "periodic".to_string(),
            delay: Frequency::minutes(30),
            attempts: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Acl {
    pub owner: String,
    pub group: String,
    pub permission: String,
}

impl Default for Acl {
    fn default() -> Self {
        Self {
            owner: String::new(),
            group: "users".to_string(),
            permission: "0x755".to_string(),
        }
    }
}
