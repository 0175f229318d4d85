use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::GameThriveClient;
use crate::api::error::ApiError;
use crate::models::{PlaytimeState, Player};

#[derive(Debug, Deserialize)]
struct CreatePlayerResponse {
    #[serde(default)]
    id: String,
}

#[derive(Debug, Serialize)]
struct PurchaseBody {
    amount: f64,
}

#[derive(Debug, Serialize)]
struct FocusBody {
    state: PlaytimeState,
    active_time: i64,
}

fn require_id(id: Option<&str>) -> Result<&str, ApiError> {
    id.filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingField("player id"))
}

impl GameThriveClient {
    /// Register a new player. The id assigned by the API is stored on `player`.
    pub async fn create_player(&self, player: &mut Player) -> Result<(), ApiError> {
        let req = self.new_request(Method::POST, "players", Some(&*player))?;
        let resp: CreatePlayerResponse = self.execute_json(req).await?;
        player.id = Some(resp.id);
        Ok(())
    }

    /// Update an existing player's attributes. Tags are merged with the
    /// player's current tags.
    pub async fn update_player(&self, player: &Player) -> Result<(), ApiError> {
        let id = require_id(player.id())?;
        let req = self.new_request(Method::PUT, &format!("players/{id}"), Some(player))?;
        self.execute_discard(req).await
    }

    /// Add `amount` (USD) to the player's total spend.
    pub async fn update_player_amount(&self, player_id: &str, amount: f64) -> Result<(), ApiError> {
        let id = require_id(Some(player_id))?;
        let req = self.new_request(
            Method::POST,
            &format!("players/{id}/on_purchase"),
            Some(&PurchaseBody { amount }),
        )?;
        self.execute_discard(req).await
    }

    /// Report a new session: refreshes details and increments the session count.
    pub async fn player_session(&self, player: &Player) -> Result<(), ApiError> {
        let id = require_id(player.id())?;
        let req = self.new_request(
            Method::POST,
            &format!("players/{id}/on_session"),
            Some(player),
        )?;
        self.execute_discard(req).await
    }

    /// Add `active_time` seconds to the player's total playtime.
    pub async fn player_playtime(
        &self,
        player_id: &str,
        state: PlaytimeState,
        active_time: i64,
    ) -> Result<(), ApiError> {
        let id = require_id(Some(player_id))?;
        let req = self.new_request(
            Method::POST,
            &format!("players/{id}/on_focus"),
            Some(&FocusBody { state, active_time }),
        )?;
        self.execute_discard(req).await
    }
}
