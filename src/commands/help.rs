use anyhow::Result;
use clap::CommandFactory;

use crate::cli::{AmountArgs, AuthArgs, NotificationArgs, OpenArgs, PlayerArgs, PlaytimeArgs};
use crate::commands::Command;

fn description(command: Command) -> &'static str {
    match command {
        Command::PlayersNew => "Creates a new player.",
        Command::PlayersUpdate => {
            "Updates player attributes.\n\
             Note: Updating tags will append to the player's existing tags.\n      \
             To remove an existing tag, update the tag with a value of a blank string."
        }
        Command::PlayersAmount => "Increment player's total amount spent.",
        Command::PlayersSession => {
            "Updates any player details that may have changed as well as incrementing \
             the player's session count."
        }
        Command::PlayersPlaytime => "Increment the player's total playtime.",
        Command::NotificationsNew => {
            "Create and deliver a new notification.\n\
             Without --auth, GAMETHRIVE_AUTH_KEY or the key stored by `gamethrive auth` is used."
        }
        Command::NotificationsOpen => "Track that a push notification was opened.",
        Command::Auth => "Store the API auth key in the system keyring, or remove it.",
    }
}

/// Flag documentation for one command.
pub fn render(command: Command) -> String {
    let flags = match command {
        Command::PlayersNew | Command::PlayersUpdate | Command::PlayersSession => {
            PlayerArgs::command()
        }
        Command::PlayersAmount => AmountArgs::command(),
        Command::PlayersPlaytime => PlaytimeArgs::command(),
        Command::NotificationsNew => NotificationArgs::command(),
        Command::NotificationsOpen => OpenArgs::command(),
        Command::Auth => AuthArgs::command(),
    };

    flags
        .bin_name(command.bin_name())
        .about(description(command))
        .render_help()
        .to_string()
}

pub fn run(command: Command) -> Result<()> {
    println!("{}", render(command));
    Ok(())
}
