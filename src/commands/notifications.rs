use anyhow::{Context, Result};

use gamethrive::models::Notification;

use crate::cli::{self, NotificationArgs, OpenArgs};
use crate::commands::Command;
use crate::credentials::Settings;

pub async fn create(settings: &Settings, flags: &[String]) -> Result<()> {
    let Some(mut args) =
        cli::parse_flags::<NotificationArgs>(&Command::NotificationsNew.bin_name(), flags)?
    else {
        return Ok(());
    };
    let auth = settings.resolve_auth_key(args.auth.take());
    let mut notification = args.into_notification()?;

    let client = settings.client()?;
    let recipients = client
        .create_notification(&mut notification, auth.as_deref())
        .await
        .context("Failed to create notification")?;

    println!(
        "Notification ({}) created successfully. Target: {} players",
        notification.id().unwrap_or_default(),
        recipients
    );
    Ok(())
}

pub async fn open(settings: &Settings, flags: &[String]) -> Result<()> {
    let Some(args) = cli::parse_flags::<OpenArgs>(&Command::NotificationsOpen.bin_name(), flags)?
    else {
        return Ok(());
    };
    let notification = Notification {
        id: args.id,
        app_id: args.app_id,
        ..Default::default()
    };

    let client = settings.client()?;
    client
        .open_notification(&notification, args.opened)
        .await
        .context("Failed to track notification open")?;

    println!(
        "Notification {} marked as {}.",
        notification.id().unwrap_or_default(),
        if args.opened { "opened" } else { "not opened" }
    );
    Ok(())
}
