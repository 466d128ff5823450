//! `decrypt` command — unwrap an sfdotenv envelope back to plaintext.

use anyhow::{anyhow, Context, Result};
use colored::*;
use std::path::Path;

#[cfg(feature = "crypto")]
use crate::utils::{file_ops, fs as fs_utils, ui};

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
        use crate::commands::encrypt::resolve_or_prompt;
        use crate::core::unwrap;

        if verbose {
            ui::info(&format!("Decrypting {}", path));
        }

        if !Path::new(&path).exists() {
            return Err(anyhow!("File not found: {}", path));
        }

        let ciphertext = std::fs::read(&path).with_context(|| format!("Failed to read {}", path))?;

        if !crate::core::is_enveloped(&ciphertext) {
            return Err(anyhow!("{} does not look like an sfdotenv envelope", path));
        }

        let passphrase = resolve_or_prompt(key, key_env, false)?;

        let plaintext =
            unwrap(&ciphertext, passphrase.as_bytes()).map_err(|e| anyhow!("Decryption failed: {}", e))?;

        let output_path = output.unwrap_or_else(|| {
            path.strip_suffix(".enc").map(str::to_string).unwrap_or_else(|| format!("{}.dec", path))
        });
        if let Some(parent) = Path::new(&output_path).parent().filter(|p| !p.as_os_str().is_empty()) {
            file_ops::ensure_dir(parent)?;
        }
        std::fs::write(&output_path, &plaintext)
            .with_context(|| format!("Failed to write {}", output_path))?;
        if let Err(e) = fs_utils::set_secure_permissions(Path::new(&output_path)) {
            if verbose {
                ui::warning(&format!("could not restrict permissions on {}: {}", output_path, e));
            }
        }

        ui::success(&format!("Decrypted {} -> {}", path, output_path));

        Ok(())
    }
}
