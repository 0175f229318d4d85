pub mod notification;
pub mod player;

pub use notification::{BadgeType, Notification};
pub use player::{DeviceType, PlaytimeState, Player};
