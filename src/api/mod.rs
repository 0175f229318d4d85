pub mod client;
pub mod error;
pub mod notifications;
pub mod players;
