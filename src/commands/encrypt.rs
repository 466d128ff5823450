//! `encrypt` command — wrap a plaintext file into an sfdotenv envelope.
//!
//! Same password-handling and status-output shape as the other file
//! commands, targeting this crate's envelope format (magic `SFDOTENV`,
//! Argon2id + XSalsa20-Poly1305).

use anyhow::{anyhow, Context, Result};
use colored::*;
use std::path::Path;

#[cfg(feature = "crypto")]
use crate::utils::{file_ops, string, ui};

pub fn run(path: String, key: Option<String>, key_env: Option<String>, output: Option<String>, verbose: bool) -> Result<()> {
    #[cfg(not(feature = "crypto"))]
    {
        let _ = (&path, &key, &key_env, &output, verbose);
        println!("{} Crypto support is not enabled", "✗".red());
        println!("Rebuild with: cargo build --features crypto");
        return Ok(());
    }

    #[cfg(feature = "crypto")]
    {
        use crate::core::wrap;

        if verbose {
            ui::info(&format!("Encrypting {}", path));
        }

        if !Path::new(&path).exists() {
            return Err(anyhow!("File not found: {}", path));
        }

        let plaintext = std::fs::read(&path).with_context(|| format!("Failed to read {}", path))?;

        let passphrase = resolve_or_prompt(key, key_env, true)?;
        if verbose {
            ui::info(&format!("passphrase: {}", string::redact(&passphrase)));
        }

        let encrypted = wrap(&plaintext, passphrase.as_bytes()).map_err(|e| anyhow!("Encryption failed: {}", e))?;

        let output_path = output.unwrap_or_else(|| format!("{}.enc", path));
        if let Some(parent) = Path::new(&output_path).parent().filter(|p| !p.as_os_str().is_empty()) {
            file_ops::ensure_dir(parent)?;
        }
        std::fs::write(&output_path, &encrypted)
            .with_context(|| format!("Failed to write {}", output_path))?;

        ui::success(&format!("Encrypted {} -> {}", path, output_path));
        println!("  {} bytes written", encrypted.len());

        Ok(())
    }
}

#[cfg(feature = "crypto")]
pub(crate) fn resolve_or_prompt(key: Option<String>, key_env: Option<String>, confirm: bool) -> Result<String> {
    use dialoguer::Password;

    if let Some(key) = key {
        if !key.is_empty() {
            return Ok(key);
        }
    }
    if let Some(name) = key_env {
        if let Ok(value) = std::env::var(&name) {
            if !value.is_empty() {
                return Ok(value);
            }
        }
    }
    for name in ["SIGNALFORGE_DOTENV_KEY", "DOTENV_PRIVATE_KEY"] {
        if let Ok(value) = std::env::var(name) {
            if !value.is_empty() {
                return Ok(value);
            }
        }
    }

    let passphrase = Password::new().with_prompt("Enter passphrase").interact()?;
    if passphrase.is_empty() {
        return Err(anyhow!("Passphrase must not be empty"));
    }

    if confirm {
        let confirmation = Password::new().with_prompt("Confirm passphrase").interact()?;
        if passphrase != confirmation {
            return Err(anyhow!("Passphrases do not match"));
        }
    }

    Ok(passphrase)
}
