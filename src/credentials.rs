use std::env;

use anyhow::{Context, Result};
use tracing::debug;

use gamethrive::GameThriveClient;
use gamethrive::api::client::DEFAULT_BASE_URL;

const SERVICE: &str = "gamethrive-cli";
const AUTH_KEY_USER: &str = "auth_key";

/// Per-invocation configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub auth_key: Option<String>,
    /// Fall back to the system keyring for the auth key.
    pub use_keyring: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            base_url: non_empty(env::var("GAMETHRIVE_BASE_URL").ok())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            auth_key: non_empty(env::var("GAMETHRIVE_AUTH_KEY").ok()),
            use_keyring: true,
        }
    }

    pub fn client(&self) -> Result<GameThriveClient> {
        GameThriveClient::with_base_url(&self.base_url)
            .with_context(|| format!("Failed to create API client for {}", self.base_url))
    }

    /// The flag value wins, then GAMETHRIVE_AUTH_KEY, then the keyring.
    pub fn resolve_auth_key(&self, flag: Option<String>) -> Option<String> {
        non_empty(flag)
            .or_else(|| self.auth_key.clone())
            .or_else(|| self.use_keyring.then(load_auth_key).flatten())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn entry() -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE, AUTH_KEY_USER).context("Failed to create keyring entry for auth_key")
}

pub fn store_auth_key(key: &str) -> Result<()> {
    entry()?
        .set_password(key)
        .context("Failed to store auth_key in keyring")
}

/// Returns whether a stored key was removed.
pub fn clear_auth_key() -> Result<bool> {
    match entry()?.delete_credential() {
        Ok(()) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(e).context("Failed to remove auth_key from keyring"),
    }
}

/// Keyring failures are not fatal: notifications can still be sent without
/// an auth key if the app allows it.
pub fn load_auth_key() -> Option<String> {
    let result = keyring::Entry::new(SERVICE, AUTH_KEY_USER).and_then(|e| e.get_password());
    match result {
        Ok(key) => non_empty(Some(key)),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            debug!(error = %e, "keyring unavailable, continuing without stored auth key");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(auth_key: Option<&str>) -> Settings {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_key: auth_key.map(str::to_string),
            use_keyring: false,
        }
    }

    #[test]
    fn flag_takes_precedence_over_environment() {
        let s = settings(Some("from-env"));
        assert_eq!(s.resolve_auth_key(Some("from-flag".into())).as_deref(), Some("from-flag"));
        assert_eq!(s.resolve_auth_key(Some("  ".into())).as_deref(), Some("from-env"));
        assert_eq!(s.resolve_auth_key(None).as_deref(), Some("from-env"));
    }

    #[test]
    fn no_key_without_keyring() {
        assert_eq!(settings(None).resolve_auth_key(None), None);
    }

    #[test]
    fn client_uses_configured_base_url() -> Result<()> {
        let s = Settings {
            base_url: "http://localhost:8080/api/v1".into(),
            ..settings(None)
        };
        assert_eq!(s.client()?.base_url.as_str(), "http://localhost:8080/api/v1/");
        Ok(())
    }

    #[test]
    fn bad_base_url_is_reported() {
        let s = Settings {
            base_url: "not a url".into(),
            ..settings(None)
        };
        let err = s.client().err().expect("invalid url");
        assert!(format!("{err:#}").contains("not a url"));
    }
}
