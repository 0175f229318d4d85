use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use serde::de::DeserializeOwned;
use serde_json::Value;

use gamethrive::models::{BadgeType, DeviceType, Notification, PlaytimeState, Player};

/// Layout of `send_after` once the zone abbreviation has been dropped.
const SEND_AFTER_FORMAT: &str = "%a %b %d %Y %H:%M:%S %z";

/// Flags for `players new`, `players update` and `players session`.
#[derive(Parser, Debug)]
#[command(rename_all = "snake_case", disable_version_flag = true)]
pub struct PlayerArgs {
    /// Read player info from a json file (other flags are ignored)
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Your GameThrive application key
    #[arg(long)]
    pub app_id: Option<String>,

    /// GameThrive identifier of the player
    #[arg(long)]
    pub id: Option<String>,

    /// "ios", "android" or "amazon"
    #[arg(long, default_value_t = DeviceType::Ios)]
    pub device_type: DeviceType,

    /// Push notification identifier from Google or Apple
    #[arg(long)]
    pub identifier: Option<String>,

    /// Language code. Typically lower case two letters, except for chinese
    #[arg(long)]
    pub language: Option<String>,

    /// Number of seconds away from GMT
    #[arg(long, allow_negative_numbers = true)]
    pub timezone: Option<i32>,

    /// Device model
    #[arg(long)]
    pub device_model: Option<String>,

    /// Device operating system version
    #[arg(long)]
    pub device_os: Option<String>,

    /// Version of the game
    #[arg(long)]
    pub game_version: Option<String>,

    /// Advertising id for Android devices and identifierForVendor for iOS devices
    #[arg(long)]
    pub ad_id: Option<String>,

    /// Number of times the player has played the game
    #[arg(long, default_value_t = 1)]
    pub session_count: u32,

    /// Custom tags for the player, as a json object of strings
    #[arg(long, value_parser = parse_string_map)]
    pub tags: Option<BTreeMap<String, String>>,

    /// Amount the player has spent in USD, up to two decimal places
    #[arg(long)]
    pub amount_spent: Option<f64>,

    /// Unixtime when the player joined the game
    #[arg(long)]
    pub created_at: Option<i64>,

    /// Unixtime when the player was last active
    #[arg(long)]
    pub last_active: Option<i64>,

    /// Seconds player was running your app
    #[arg(long)]
    pub playtime: Option<i64>,
}

impl PlayerArgs {
    pub fn into_player(self) -> Result<Player> {
        if let Some(path) = &self.json {
            return read_json(path);
        }

        Ok(Player {
            device_type: self.device_type,
            app_id: self.app_id.unwrap_or_default(),
            id: self.id,
            identifier: self.identifier,
            language: self.language,
            timezone: self.timezone,
            device_model: self.device_model,
            device_os: self.device_os,
            game_version: self.game_version,
            advertising_id: self.ad_id,
            session_count: Some(self.session_count),
            tags: self.tags.unwrap_or_default(),
            amount_spent: self.amount_spent,
            created_at: self.created_at,
            last_active: self.last_active,
            playtime: self.playtime,
        })
    }
}

/// Flags for `players amount`.
#[derive(Parser, Debug)]
#[command(rename_all = "snake_case", disable_version_flag = true)]
pub struct AmountArgs {
    /// GameThrive identifier of the player
    #[arg(long)]
    pub id: Option<String>,

    /// Amount to add in USD, up to two decimal places
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub amount: f64,
}

/// Flags for `players playtime`.
#[derive(Parser, Debug)]
#[command(rename_all = "snake_case", disable_version_flag = true)]
pub struct PlaytimeArgs {
    /// GameThrive identifier of the player
    #[arg(long)]
    pub id: Option<String>,

    /// "suspend", "resume" or "ping"
    #[arg(long, default_value_t = PlaytimeState::Ping)]
    pub state: PlaytimeState,

    /// Number of seconds player was running your app
    #[arg(long, default_value_t = 0)]
    pub active_time: i64,
}

/// Flags for `notifications new`.
#[derive(Parser, Debug)]
#[command(rename_all = "snake_case", disable_version_flag = true)]
pub struct NotificationArgs {
    /// Read notification info from a json file (other flags except --auth are ignored)
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Your "API Auth Key" on the GameThrive application settings page
    #[arg(long)]
    pub auth: Option<String>,

    /// Your GameThrive application key
    #[arg(long)]
    pub app_id: Option<String>,

    /// Send notification to iOS players
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub ios: bool,

    /// Send notification to Android players
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub android: bool,

    /// Message contents as a json object keyed by language; "en" is required
    #[arg(long, value_parser = parse_string_map, default_value = r#"{"en":""}"#)]
    pub contents: BTreeMap<String, String>,

    /// Names of segments to send the message to (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub included_segments: Vec<String>,

    /// Names of segments to exclude players from (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub excluded_segments: Vec<String>,

    /// Specific players to send the notification to (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub include_player_ids: Vec<String>,

    /// Specific iOS device tokens to send the notification to (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub include_ios_tokens: Vec<String>,

    /// Specific Android registration ids to send the notification to (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub include_android_reg_ids: Vec<String>,

    /// Wake the app in the background on delivery (iOS)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub content_available: bool,

    /// "none", "setto" or "increase"
    #[arg(long = "ios_badgeType", default_value_t = BadgeType::None)]
    pub ios_badge_type: BadgeType,

    /// Sets or increases the badge icon on the device
    #[arg(long = "ios_badgeCount")]
    pub ios_badge_count: Option<i32>,

    /// Sound file that is included in your app to play (iOS)
    #[arg(long)]
    pub ios_sound: Option<String>,

    /// Sound file that is included in your app to play (Android)
    #[arg(long)]
    pub android_sound: Option<String>,

    /// Custom key value pairs your app can read, as a json object
    #[arg(long, value_parser = parse_value_map)]
    pub data: Option<BTreeMap<String, Value>>,

    /// Web page opened when the player opens the notification
    #[arg(long)]
    pub url: Option<String>,

    /// Schedule delivery, e.g. "Mon Jan 02 2006 15:04:05 GMT-0700" or RFC 3339
    #[arg(long, value_parser = parse_send_after)]
    pub send_after: Option<DateTime<FixedOffset>>,

    /// Deliver at the time of day each player last opened your app
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub send_at_user_active_time: bool,
}

impl NotificationArgs {
    pub fn into_notification(self) -> Result<Notification> {
        if let Some(path) = &self.json {
            return read_json(path);
        }

        Ok(Notification {
            id: None,
            app_id: self.app_id.unwrap_or_default(),
            is_ios: self.ios,
            is_android: self.android,
            contents: self.contents,
            included_segments: self.included_segments,
            excluded_segments: self.excluded_segments,
            included_player_ids: self.include_player_ids,
            included_ios_tokens: self.include_ios_tokens,
            included_android_reg_ids: self.include_android_reg_ids,
            content_available: self.content_available,
            ios_badge_type: Some(self.ios_badge_type),
            ios_badge_count: self.ios_badge_count,
            ios_sound: self.ios_sound,
            android_sound: self.android_sound,
            data: self.data.unwrap_or_default(),
            url: self.url,
            send_after: self.send_after,
            send_at_user_active_time: self.send_at_user_active_time,
        })
    }
}

/// Flags for `notifications open`.
#[derive(Parser, Debug)]
#[command(rename_all = "snake_case", disable_version_flag = true)]
pub struct OpenArgs {
    /// Identifier of the notification
    #[arg(long)]
    pub id: Option<String>,

    /// Your GameThrive application key
    #[arg(long)]
    pub app_id: String,

    /// Whether the notification was opened
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub opened: bool,
}

/// Flags for `auth`.
#[derive(Parser, Debug)]
#[command(rename_all = "snake_case", disable_version_flag = true)]
pub struct AuthArgs {
    /// API auth key to store in the system keyring
    #[arg(long, conflicts_with = "clear")]
    pub key: Option<String>,

    /// Remove the stored API auth key
    #[arg(long)]
    pub clear: bool,
}

/// Parses the flags that follow a command's words. Returns `None` when clap
/// handled the invocation itself, as with `--help`.
pub fn parse_flags<T: Parser>(bin_name: &str, flags: &[String]) -> Result<Option<T>> {
    let argv = std::iter::once(bin_name.to_string()).chain(normalize_flags(flags));
    match T::try_parse_from(argv) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().context("Failed to print help")?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Accepts single-dash long flags (`-app_id x`) alongside `--app_id x`.
/// Short flags and negative numbers pass through untouched.
pub fn normalize_flags(flags: &[String]) -> Vec<String> {
    flags
        .iter()
        .map(|flag| {
            let mut chars = flag.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some('-'), Some(c), Some(_)) if c.is_ascii_alphabetic() => format!("-{flag}"),
                _ => flag.clone(),
            }
        })
        .collect()
}

pub fn parse_string_map(s: &str) -> Result<BTreeMap<String, String>, String> {
    serde_json::from_str(s).map_err(|e| format!("expected a json object of strings: {e}"))
}

pub fn parse_value_map(s: &str) -> Result<BTreeMap<String, Value>, String> {
    serde_json::from_str(s).map_err(|e| format!("expected a json object: {e}"))
}

/// Accepts RFC 3339, or the textual form "Mon Jan 02 2006 15:04:05 MST-0700"
/// where a zone abbreviation is glued to the numeric offset.
pub fn parse_send_after(s: &str) -> Result<DateTime<FixedOffset>, String> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts);
    }

    let invalid = |reason: String| format!("invalid send time '{s}': {reason}");
    let (head, zone) = s
        .rsplit_once(' ')
        .ok_or_else(|| invalid("missing time zone".into()))?;
    let offset = zone.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    DateTime::parse_from_str(&format!("{head} {offset}"), SEND_AFTER_FORMAT)
        .map_err(|e| invalid(e.to_string()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
}
