//! sfdotenv CLI entry point.

use anyhow::Result;
use clap::Parser;

use sfdotenv::cli::{Cli, Commands};
use sfdotenv::commands;
use sfdotenv::core::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?.merge_with_args(cli.verbose);

    match cli.command {
        Commands::Run {
            env_file,
            key,
            key_env,
            encrypted,
            no_export,
            no_arrays,
            r#override,
            command,
        } => {
            let env_file = env_file.unwrap_or_else(|| config.defaults.env_file.clone());
            let key_env = key_env.or_else(|| config.defaults.key_env.clone());
            let verbose = cli.verbose || config.defaults.verbose;
            commands::run::run(env_file, key, key_env, encrypted, no_export, no_arrays, r#override, command, verbose)
        }

        Commands::Encrypt { path, key, key_env, output } => {
            let key_env = key_env.or_else(|| config.defaults.key_env.clone());
            commands::encrypt::run(path, key, key_env, output, config.defaults.verbose)
        }

        Commands::Decrypt { path, key, key_env, output } => {
            let key_env = key_env.or_else(|| config.defaults.key_env.clone());
            commands::decrypt::run(path, key, key_env, output, config.defaults.verbose)
        }

        Commands::Completions { shell } => commands::completions::run(shell),
    }
}
