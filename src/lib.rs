//! Client library for the GameThrive push-notification API, plus the
//! command router used by the `gamethrive` binary.

pub mod api;
pub mod models;
pub mod router;

pub use api::client::GameThriveClient;
pub use api::error::{ApiError, ErrorResponse};
