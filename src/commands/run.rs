//! `run` command — load an env file, publish it to the environment, then
//! run a child process inheriting it. The CLI analogue of the "loader's
//! top-level orchestration function" callers are expected to supply.

use anyhow::{Context, Result};

use crate::utils::{string, ui};
use crate::core::{load, LoadOptions};

#[allow(clippy::too_many_arguments)]
pub fn run(
    env_file: String,
    key: Option<String>,
    key_env: Option<String>,
    encrypted: bool,
    no_export: bool,
    no_arrays: bool,
    override_existing: bool,
    command: Vec<String>,
    verbose: bool,
) -> Result<()> {
    if verbose {
        ui::info(&format!("Loading {}", env_file));
    }

    let options = LoadOptions {
        encrypted: if encrypted { Some(true) } else { None },
        key,
        key_env,
        override_existing,
        export: !no_export,
        export_server: false,
        arrays: !no_arrays,
    };

    let loaded = load(&env_file, options).with_context(|| format!("Failed to load {}", env_file))?;

    if verbose {
        ui::success(&format!(
            "Loaded {} from {}",
            string::pluralize(loaded.len(), "variable", "variables"),
            env_file
        ));
    }

    let Some((program, args)) = command.split_first() else {
        return Err(anyhow::anyhow!("No command given to run"));
    };

    let status = std::process::Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to launch {}", program))?;

    std::process::exit(status.code().unwrap_or(1));
}
