use anyhow::{Result, bail};

use crate::cli::{self, AuthArgs};
use crate::commands::Command;
use crate::credentials;

pub fn run(flags: &[String]) -> Result<()> {
    let Some(args) = cli::parse_flags::<AuthArgs>(&Command::Auth.bin_name(), flags)? else {
        return Ok(());
    };

    if args.clear {
        if credentials::clear_auth_key()? {
            println!("Stored auth key removed.");
        } else {
            println!("No stored auth key.");
        }
        return Ok(());
    }

    match args.key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => {
            credentials::store_auth_key(key)?;
            println!("Auth key stored successfully.");
            Ok(())
        }
        _ => bail!("--key <KEY> or --clear is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::flags;

    #[test]
    fn requires_key_or_clear() {
        let err = run(&flags(&[])).expect_err("nothing to do");
        assert!(err.to_string().contains("--key"));

        let err = run(&flags(&["-key", " "])).expect_err("blank key");
        assert!(err.to_string().contains("--key"));
    }
}
