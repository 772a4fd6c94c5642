//! Управление SSH-ключами GitHub

use colored::Colorize;

use super::{header, on_off, Context};
use crate::error::{Result, SettingsError};
use crate::panels::network;
use crate::params::keys;
use crate::ssh_keys::{authorized, FetchOutcome, KeyDisplay, KeySource, SshKeyFetcher};

/// Fetch and store the keys of a GitHub account.
///
/// Returns `None` when no username was given. Failures of the lookup itself
/// are shown through the prompt and are not errors.
pub async fn add(
    ctx: &Context<'_>,
    source: &dyn KeySource,
    username: Option<String>,
) -> Result<Option<FetchOutcome>> {
    let mut fetcher = SshKeyFetcher::new(ctx.params);

    if let KeyDisplay::Configured { username } = fetcher.display()? {
        return Err(SettingsError::KeysAlreadyConfigured(username));
    }

    let username = match username {
        Some(name) => Some(name),
        None => ctx.prompt.request_text("Enter your GitHub username")?,
    };
    let Some(username) = username.filter(|u| !u.trim().is_empty()) else {
        return Ok(None);
    };

    println!(
        "{} {}",
        "Fetching keys from".cyan(),
        source.keys_url(username.trim()).bold()
    );

    let outcome = fetcher.fetch(source, &username).await?;
    match outcome.message() {
        Some(message) => ctx.prompt.alert(&message),
        None => {
            if let FetchOutcome::Saved { username, key_count } = &outcome {
                println!(
                    "{} Stored {} key(s) for '{}'.",
                    "Success:".green().bold(),
                    key_count,
                    username
                );
            }
        }
    }

    Ok(Some(outcome))
}

/// Forget the stored account and keys
pub fn remove(ctx: &Context<'_>) -> Result<()> {
    let mut fetcher = SshKeyFetcher::new(ctx.params);
    let previous = fetcher.display()?;
    fetcher.clear()?;

    match previous {
        KeyDisplay::Configured { username } => {
            println!("{} Removed SSH keys for '{}'.", "Success:".green().bold(), username)
        }
        _ => println!("No SSH keys configured."),
    }
    Ok(())
}

pub fn show(ctx: &Context<'_>) -> Result<()> {
    header("SSH Keys");

    let fetcher = SshKeyFetcher::new(ctx.params);
    println!("{:<12} {}", "SSH access:".bold(), on_off(network::ssh_enabled(ctx.params)?));

    let username = match fetcher.display()? {
        KeyDisplay::Configured { username } => username,
        _ => {
            println!("{:<12} {}", "Account:".bold(), "none".dimmed());
            println!();
            println!("Run {} to add one.", "offroad-settings ssh add".cyan());
            return Ok(());
        }
    };
    println!("{:<12} {}", "Account:".bold(), username);
    println!();

    let blob = ctx.params.get_or_default(keys::GITHUB_SSH_KEYS)?;
    let summaries = authorized::summarize(&blob);

    println!("{:<20} {:<50} {}", "TYPE".bold(), "FINGERPRINT".bold(), "COMMENT".bold());
    println!("{}", "─".repeat(80).dimmed());
    for key in &summaries {
        println!("{:<20} {:<50} {}", key.algorithm, key.fingerprint, key.comment);
    }

    let skipped = authorized::count_lines(&blob).saturating_sub(summaries.len());
    if skipped > 0 {
        println!("{}", format!("({} line(s) could not be parsed)", skipped).yellow());
    }
    println!();
    Ok(())
}

pub fn set_enabled(ctx: &Context<'_>, enabled: bool) -> Result<()> {
    network::set_ssh_enabled(ctx.params, enabled)?;
    println!("SSH access {}.", on_off(enabled));
    Ok(())
}

pub fn status(ctx: &Context<'_>) -> Result<()> {
    println!("{}", on_off(network::ssh_enabled(ctx.params)?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MemoryParams, ParamStore};
    use crate::testing::{FakeHardware, RecordingPrompt, ScriptedSource};
    use pretty_assertions::assert_eq;

    const KEYS: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAILM+rvN+ot98qgEN796jTiQfZfG1KaT0PtFDJ/XFSqti me\n";

    #[tokio::test(start_paused = true)]
    async fn test_add_asks_for_username() {
        let params = MemoryParams::new();
        let hw = FakeHardware::default();
        let prompt = RecordingPrompt::answering(true).with_text(Some("octocat"));
        let ctx = Context { params: &params, hardware: &hw, prompt: &prompt };

        let outcome = add(&ctx, &ScriptedSource::body(KEYS), None).await.unwrap();

        assert!(outcome.unwrap().is_saved());
        assert_eq!(params.get(keys::GITHUB_USERNAME).unwrap().as_deref(), Some("octocat"));
        assert!(prompt.alerts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_without_username_does_nothing() {
        let params = MemoryParams::new();
        let hw = FakeHardware::default();
        let prompt = RecordingPrompt::answering(true).with_text(None);
        let ctx = Context { params: &params, hardware: &hw, prompt: &prompt };
        let source = ScriptedSource::body(KEYS);

        assert_eq!(add(&ctx, &source, None).await.unwrap(), None);
        assert_eq!(add(&ctx, &source, Some("  ".into())).await.unwrap(), None);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_alerts_once_on_failure() {
        let params = MemoryParams::new();
        let hw = FakeHardware::default();
        let prompt = RecordingPrompt::answering(true);
        let ctx = Context { params: &params, hardware: &hw, prompt: &prompt };

        add(&ctx, &ScriptedSource::body(""), Some("octocat".into())).await.unwrap();

        assert_eq!(prompt.alerts(), vec!["Username 'octocat' has no keys on GitHub".to_string()]);
        assert!(params.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_refused_when_configured() {
        let params = MemoryParams::new();
        params.put(keys::GITHUB_USERNAME, "alice").unwrap();
        params.put(keys::GITHUB_SSH_KEYS, KEYS).unwrap();
        let hw = FakeHardware::default();
        let prompt = RecordingPrompt::answering(true);
        let ctx = Context { params: &params, hardware: &hw, prompt: &prompt };

        let result = add(&ctx, &ScriptedSource::body(KEYS), Some("bob".into())).await;
        assert!(matches!(result, Err(SettingsError::KeysAlreadyConfigured(ref u)) if u == "alice"));

        remove(&ctx).unwrap();
        remove(&ctx).unwrap();
        assert!(params.is_empty());

        let outcome = add(&ctx, &ScriptedSource::body(KEYS), Some("bob".into())).await.unwrap();
        assert!(outcome.unwrap().is_saved());
    }

    #[test]
    fn test_show_and_toggle() {
        let params = MemoryParams::new();
        params.put(keys::GITHUB_USERNAME, "octocat").unwrap();
        params.put(keys::GITHUB_SSH_KEYS, KEYS).unwrap();
        let hw = FakeHardware::default();
        let prompt = RecordingPrompt::answering(true);
        let ctx = Context { params: &params, hardware: &hw, prompt: &prompt };

        show(&ctx).unwrap();
        set_enabled(&ctx, true).unwrap();
        status(&ctx).unwrap();
        assert!(params.get_bool(keys::SSH_ENABLED).unwrap());
    }
}
