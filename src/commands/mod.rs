pub mod auth;
pub mod help;
pub mod notifications;
pub mod players;

use anyhow::Result;

use gamethrive::router::{Node, Router};

use crate::credentials::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlayersNew,
    PlayersUpdate,
    PlayersAmount,
    PlayersSession,
    PlayersPlaytime,
    NotificationsNew,
    NotificationsOpen,
    Auth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Run(Command),
    Help(Command),
}

impl Command {
    #[cfg(test)]
    pub const ALL: [Command; 8] = [
        Command::PlayersNew,
        Command::PlayersUpdate,
        Command::PlayersAmount,
        Command::PlayersSession,
        Command::PlayersPlaytime,
        Command::NotificationsNew,
        Command::NotificationsOpen,
        Command::Auth,
    ];

    /// The words that invoke this command.
    pub fn words(self) -> &'static [&'static str] {
        match self {
            Command::PlayersNew => &["players", "new"],
            Command::PlayersUpdate => &["players", "update"],
            Command::PlayersAmount => &["players", "amount"],
            Command::PlayersSession => &["players", "session"],
            Command::PlayersPlaytime => &["players", "playtime"],
            Command::NotificationsNew => &["notifications", "new"],
            Command::NotificationsOpen => &["notifications", "open"],
            Command::Auth => &["auth"],
        }
    }

    pub fn bin_name(self) -> String {
        format!("gamethrive {}", self.words().join(" "))
    }

    /// One-line summary shown in the command listing.
    pub fn summary(self) -> &'static str {
        match self {
            Command::PlayersNew => "Creates a player",
            Command::PlayersUpdate => "Updates player attributes",
            Command::PlayersAmount => "Updates player's amount",
            Command::PlayersSession => "Updates and increments player session count",
            Command::PlayersPlaytime => "Increment the player's total playtime",
            Command::NotificationsNew => "Create and deliver a new notification",
            Command::NotificationsOpen => "Track that a push notification was opened",
            Command::Auth => "Store or clear the API auth key",
        }
    }
}

fn run_node(command: Command) -> Node<Action> {
    Node::leaf(Action::Run(command)).with_usage(command.summary())
}

pub fn router() -> Router<Action> {
    use Command::*;

    Router::new([
        (
            "players",
            Node::branch([
                ("new", run_node(PlayersNew)),
                ("update", run_node(PlayersUpdate)),
                ("amount", run_node(PlayersAmount)),
                ("session", run_node(PlayersSession)),
                ("playtime", run_node(PlayersPlaytime)),
            ]),
        ),
        (
            "notifications",
            Node::branch([
                ("new", run_node(NotificationsNew)),
                ("open", run_node(NotificationsOpen)),
            ]),
        ),
        ("auth", run_node(Auth)),
        (
            "help",
            Node::branch([
                (
                    "players",
                    Node::branch([
                        ("new", Node::leaf(Action::Help(PlayersNew))),
                        ("update", Node::leaf(Action::Help(PlayersUpdate))),
                        ("amount", Node::leaf(Action::Help(PlayersAmount))),
                        ("session", Node::leaf(Action::Help(PlayersSession))),
                        ("playtime", Node::leaf(Action::Help(PlayersPlaytime))),
                    ]),
                ),
                (
                    "notifications",
                    Node::branch([
                        ("new", Node::leaf(Action::Help(NotificationsNew))),
                        ("open", Node::leaf(Action::Help(NotificationsOpen))),
                    ]),
                ),
                ("auth", Node::leaf(Action::Help(Auth))),
            ])
            .with_usage("Shows usage about each command. Example: help players new"),
        ),
    ])
}

pub async fn run(action: Action, settings: &Settings, flags: &[String]) -> Result<()> {
    match action {
        Action::Help(command) => help::run(command),
        Action::Run(Command::PlayersNew) => players::create(settings, flags).await,
        Action::Run(Command::PlayersUpdate) => players::update(settings, flags).await,
        Action::Run(Command::PlayersAmount) => players::amount(settings, flags).await,
        Action::Run(Command::PlayersSession) => players::session(settings, flags).await,
        Action::Run(Command::PlayersPlaytime) => players::playtime(settings, flags).await,
        Action::Run(Command::NotificationsNew) => notifications::create(settings, flags).await,
        Action::Run(Command::NotificationsOpen) => notifications::open(settings, flags).await,
        Action::Run(Command::Auth) => auth::run(flags),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn flags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    pub fn settings(base_url: &str) -> Settings {
        Settings {
            base_url: base_url.to_string(),
            auth_key: None,
            use_keyring: false,
        }
    }

    #[test]
    fn every_command_and_its_help_resolve() {
        let router = router();
        for command in Command::ALL {
            assert_eq!(router.resolve(command.words()), Some(&Action::Run(command)));

            let mut help = vec!["help"];
            help.extend_from_slice(command.words());
            assert_eq!(router.resolve(&help), Some(&Action::Help(command)));
        }
    }

    #[test]
    fn incomplete_commands_do_not_resolve() {
        let router = router();
        assert_eq!(router.resolve(&["players"]), None);
        assert_eq!(router.resolve(&["help"]), None);
        assert_eq!(router.resolve(&["help", "players"]), None);
        assert_eq!(router.resolve(&["notifications", "delete"]), None);
    }

    #[test]
    fn listing_is_aligned_and_excludes_help_leaves() {
        let usage = router().usage();
        let lines: Vec<&str> = usage.lines().collect();
        // every runnable command plus the single help summary line
        assert_eq!(lines.len(), Command::ALL.len() + 1);

        let column = "notifications open".len() + 2;
        for line in &lines {
            assert!(!line[column..].starts_with(' '), "{line:?}");
            assert!(line[..column].ends_with("  "), "{line:?}");
        }
        assert!(lines.iter().any(|l| l.starts_with("help ") && l.ends_with("help players new")));
        assert!(lines.iter().any(|l| l.starts_with("players playtime ")));
    }
}
