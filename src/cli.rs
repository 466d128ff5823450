//! CLI argument parsing for sfdotenv.
//!
//! Uses clap derive macros for type-safe argument handling.

use clap::{Parser, Subcommand};

/// sfdotenv — load dotenv files with variable expansion and an
/// authenticated-encryption envelope.
#[derive(Parser)]
#[command(
    name = "sfdotenv",
    about = "Load .env files with variable expansion and encrypted-at-rest support",
    version,
    author,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load an env file and run a command with the resulting environment.
    Run {
        /// Path to the env file to load. Falls back to the project config's
        /// `[defaults] env_file`, then `.env`, when omitted.
        #[arg(long)]
        env_file: Option<String>,

        /// Direct passphrase for an encrypted env file.
        #[arg(long)]
        key: Option<String>,

        /// Name of an environment variable holding the passphrase.
        #[arg(long)]
        key_env: Option<String>,

        /// Force treating the input as encrypted.
        #[arg(long)]
        encrypted: bool,

        /// Skip publishing the loaded variables to the child process's
        /// environment.
        #[arg(long)]
        no_export: bool,

        /// Disable opportunistic JSON decoding of array/object-shaped
        /// values.
        #[arg(long)]
        no_arrays: bool,

        /// Overwrite variables that already exist in the environment.
        #[arg(long)]
        r#override: bool,

        /// Command (and arguments) to run with the loaded environment.
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Encrypt a file into an sfdotenv envelope.
    Encrypt {
        /// Path to the plaintext file to encrypt.
        path: String,

        /// Direct passphrase (prompted interactively if omitted).
        #[arg(long)]
        key: Option<String>,

        /// Name of an environment variable holding the passphrase.
        #[arg(long)]
        key_env: Option<String>,

        /// Destination path (default: `<path>.enc`).
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Decrypt an sfdotenv envelope back to plaintext.
    Decrypt {
        /// Path to the encrypted file.
        path: String,

        /// Direct passphrase (prompted interactively if omitted).
        #[arg(long)]
        key: Option<String>,

        /// Name of an environment variable holding the passphrase.
        #[arg(long)]
        key_env: Option<String>,

        /// Destination path (default: `<path>` with `.enc` stripped, or
        /// `<path>.dec` if there is nothing to strip).
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Generate shell completions.
    Completions { shell: String },
}
