use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::model::JobSubtype;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default = "default_subtype_fallback")]
    pub subtype_fallback: Option<JobSubtype>,
}

fn default_subtype_fallback() -> Option<JobSubtype> {
    Some(JobSubtype::Hive)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            server: ServerConfig::default(),
            defaults: DefaultsConfig::default(),
            subtype_fallback: default_subtype_fallback(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:15000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user: String::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Values applied to new jobs when the form leaves them empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub owner: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(default = "default_permission")]
    pub permission: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_group() -> String {
    "users".to_string()
}

fn default_permission() -> String {
    "0x755".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            group: default_group(),
            permission: default_permission(),
            timezone: default_timezone(),
        }
    }
}
