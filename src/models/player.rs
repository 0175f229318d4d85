use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub device_type: DeviceType,
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Push token from Apple or Google.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Seconds away from GMT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_version: Option<String>,
    #[serde(rename = "ad_id", skip_serializing_if = "Option::is_none")]
    pub advertising_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_count: Option<u32>,
    /// Merged into the player's existing tags; an empty value removes the tag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// USD, up to two decimal places.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_spent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playtime: Option<i64>,
}

impl Player {
    /// The id, if set and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Sent over the wire as its numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DeviceType {
    #[default]
    Ios,
    Android,
    Amazon,
}

impl From<DeviceType> for u8 {
    fn from(value: DeviceType) -> Self {
        match value {
            DeviceType::Ios => 0,
            DeviceType::Android => 1,
            DeviceType::Amazon => 2,
        }
    }
}

impl TryFrom<u8> for DeviceType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DeviceType::Ios),
            1 => Ok(DeviceType::Android),
            2 => Ok(DeviceType::Amazon),
            other => Err(format!("unknown device type {other}")),
        }
    }
}

impl FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(DeviceType::Ios),
            "android" => Ok(DeviceType::Android),
            "amazon" => Ok(DeviceType::Amazon),
            other => Err(format!(
                "unknown device type '{other}' (expected ios, android or amazon)"
            )),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceType::Ios => "ios",
            DeviceType::Android => "android",
            DeviceType::Amazon => "amazon",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaytimeState {
    Suspend,
    Resume,
    #[default]
    Ping,
}

impl FromStr for PlaytimeState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "suspend" => Ok(PlaytimeState::Suspend),
            "resume" => Ok(PlaytimeState::Resume),
            "ping" => Ok(PlaytimeState::Ping),
            other => Err(format!(
                "unknown playtime state '{other}' (expected suspend, resume or ping)"
            )),
        }
    }
}

impl fmt::Display for PlaytimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaytimeState::Suspend => "suspend",
            PlaytimeState::Resume => "resume",
            PlaytimeState::Ping => "ping",
        })
    }
}
