use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    /// Assigned by the API on creation; never part of the request body.
    #[serde(skip)]
    pub id: Option<String>,

    pub app_id: String,
    #[serde(rename = "isIos")]
    pub is_ios: bool,
    #[serde(rename = "isAndroid")]
    pub is_android: bool,
    /// Message text keyed by language code. "en" is required by the API.
    pub contents: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included_segments: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_segments: Vec<String>,
    #[serde(rename = "include_player_ids", skip_serializing_if = "Vec::is_empty")]
    pub included_player_ids: Vec<String>,
    #[serde(rename = "include_ios_tokens", skip_serializing_if = "Vec::is_empty")]
    pub included_ios_tokens: Vec<String>,
    #[serde(rename = "include_android_reg_ids", skip_serializing_if = "Vec::is_empty")]
    pub included_android_reg_ids: Vec<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub content_available: bool,
    #[serde(rename = "ios_badgeType", skip_serializing_if = "Option::is_none")]
    pub ios_badge_type: Option<BadgeType>,
    #[serde(rename = "ios_badgeCount", skip_serializing_if = "Option::is_none")]
    pub ios_badge_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios_sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_sound: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_after: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub send_at_user_active_time: bool,
}

impl Notification {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeType {
    #[default]
    None,
    SetTo,
    Increase,
}

impl FromStr for BadgeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(BadgeType::None),
            "setto" => Ok(BadgeType::SetTo),
            "increase" => Ok(BadgeType::Increase),
            other => Err(format!(
                "unknown badge type '{other}' (expected none, setto or increase)"
            )),
        }
    }
}

impl fmt::Display for BadgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BadgeType::None => "none",
            BadgeType::SetTo => "setto",
            BadgeType::Increase => "increase",
        })
    }
}
