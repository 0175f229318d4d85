use anyhow::{Context, Result};

use crate::cli::{self, AmountArgs, PlayerArgs, PlaytimeArgs};
use crate::commands::Command;
use crate::credentials::Settings;

pub async fn create(settings: &Settings, flags: &[String]) -> Result<()> {
    let Some(args) = cli::parse_flags::<PlayerArgs>(&Command::PlayersNew.bin_name(), flags)? else {
        return Ok(());
    };
    let mut player = args.into_player()?;

    let client = settings.client()?;
    client
        .create_player(&mut player)
        .await
        .context("Failed to create player")?;

    println!(
        "Player created correctly. Player id is: \"{}\"",
        player.id().unwrap_or_default()
    );
    Ok(())
}

pub async fn update(settings: &Settings, flags: &[String]) -> Result<()> {
    let Some(args) = cli::parse_flags::<PlayerArgs>(&Command::PlayersUpdate.bin_name(), flags)?
    else {
        return Ok(());
    };
    let player = args.into_player()?;

    let client = settings.client()?;
    client
        .update_player(&player)
        .await
        .context("Failed to update player")?;

    println!("Player {} updated.", player.id().unwrap_or_default());
    Ok(())
}

pub async fn amount(settings: &Settings, flags: &[String]) -> Result<()> {
    let Some(args) = cli::parse_flags::<AmountArgs>(&Command::PlayersAmount.bin_name(), flags)?
    else {
        return Ok(());
    };
    let id = args.id.unwrap_or_default();

    let client = settings.client()?;
    client
        .update_player_amount(&id, args.amount)
        .await
        .context("Failed to update player amount")?;

    println!("Added {:.2} USD to player {}.", args.amount, id);
    Ok(())
}

pub async fn session(settings: &Settings, flags: &[String]) -> Result<()> {
    let Some(args) = cli::parse_flags::<PlayerArgs>(&Command::PlayersSession.bin_name(), flags)?
    else {
        return Ok(());
    };
    let player = args.into_player()?;

    let client = settings.client()?;
    client
        .player_session(&player)
        .await
        .context("Failed to record player session")?;

    println!("Session recorded for player {}.", player.id().unwrap_or_default());
    Ok(())
}

pub async fn playtime(settings: &Settings, flags: &[String]) -> Result<()> {
    let Some(args) = cli::parse_flags::<PlaytimeArgs>(&Command::PlayersPlaytime.bin_name(), flags)?
    else {
        return Ok(());
    };
    let id = args.id.unwrap_or_default();

    let client = settings.client()?;
    client
        .player_playtime(&id, args.state, args.active_time)
        .await
        .context("Failed to record player playtime")?;

    println!(
        "Recorded {}s of playtime ({}) for player {}.",
        args.active_time, args.state, id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;
    use crate::commands::tests::{flags, settings};

    #[tokio::test]
    async fn new_posts_flag_built_player() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/players").json_body(json!({
                    "device_type": 1,
                    "app_id": "app",
                    "language": "en",
                    "session_count": 1,
                    "tags": {"vip": "yes"}
                }));
                then.status(200).body(r#"{"success":true,"id":"p1"}"#);
            })
            .await;

        create(
            &settings(&server.base_url()),
            &flags(&[
                "-app_id",
                "app",
                "-device_type",
                "android",
                "-language",
                "en",
                "-tags",
                r#"{"vip":"yes"}"#,
            ]),
        )
        .await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn update_without_id_fails_locally() {
        let err = update(&settings("http://127.0.0.1:9/"), &flags(&["-app_id", "app"]))
            .await
            .expect_err("id required");
        assert!(format!("{err:#}").contains("player id is required"), "{err:#}");
    }

    #[tokio::test]
    async fn api_error_is_reported_with_request_line() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/players/p1/on_purchase");
                then.status(400).body(r#"{"errors":["Player not found"]}"#);
            })
            .await;

        let err = amount(
            &settings(&server.base_url()),
            &flags(&["-id", "p1", "-amount", "0.99"]),
        )
        .await
        .expect_err("400");

        let message = format!("{err:#}");
        assert!(message.starts_with("Failed to update player amount: POST "), "{message}");
        assert!(message.ends_with("/players/p1/on_purchase: (400) Player not found"), "{message}");
    }

    #[tokio::test]
    async fn playtime_reports_focus() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/players/p1/on_focus")
                    .json_body(json!({"state": "ping", "active_time": 45}));
                then.status(200).body(r#"{"success":true}"#);
            })
            .await;

        playtime(
            &settings(&server.base_url()),
            &flags(&["-id", "p1", "-active_time", "45"]),
        )
        .await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn session_uses_player_id_in_path() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/players/abc/on_session");
                then.status(200);
            })
            .await;

        session(
            &settings(&server.base_url()),
            &flags(&["-id", "abc", "-app_id", "app"]),
        )
        .await?;
        mock.assert_async().await;
        Ok(())
    }
}
