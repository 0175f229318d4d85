use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::api::client::GameThriveClient;
use crate::api::error::ApiError;
use crate::models::Notification;

#[derive(Debug, Deserialize)]
struct CreateNotificationResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    recipients: u64,
}

#[derive(Debug, Serialize)]
struct OpenBody<'a> {
    opened: bool,
    app_id: &'a str,
}

impl GameThriveClient {
    /// Create and deliver a notification, returning the number of players
    /// targeted. `auth` is the app's REST API key, sent as HTTP basic auth.
    pub async fn create_notification(
        &self,
        notification: &mut Notification,
        auth: Option<&str>,
    ) -> Result<u64, ApiError> {
        let mut req = self.new_request(Method::POST, "notifications", Some(&*notification))?;
        if let Some(auth) = auth.filter(|a| !a.is_empty()) {
            let value = HeaderValue::from_str(&format!("Basic {auth}"))?;
            req.headers_mut().insert(AUTHORIZATION, value);
        }

        let resp: CreateNotificationResponse = self.execute_json(req).await?;
        notification.id = Some(resp.id);
        Ok(resp.recipients)
    }

    /// Track that a delivered notification was opened.
    pub async fn open_notification(
        &self,
        notification: &Notification,
        opened: bool,
    ) -> Result<(), ApiError> {
        let id = notification
            .id()
            .ok_or(ApiError::MissingField("notification id"))?;
        let body = OpenBody {
            opened,
            app_id: &notification.app_id,
        };
        let req = self.new_request(Method::PUT, &format!("notifications/{id}"), Some(&body))?;
        self.execute_discard(req).await
    }
}
