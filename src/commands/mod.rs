pub mod decrypt;
pub mod encrypt;
pub mod run;

pub mod completions {
    use crate::cli::Cli;
    use anyhow::Result;
    use clap::CommandFactory;
    use clap_complete::{generate, Shell};
    use std::io;

    pub fn run(shell: String) -> Result<()> {
        let shell = match shell.to_lowercase().as_str() {
            "bash" => Shell::Bash,
            "zsh" => Shell::Zsh,
            "fish" => Shell::Fish,
            "powershell" => Shell::PowerShell,
            _ => {
                eprintln!("Unsupported shell: {}", shell);
                std::process::exit(1);
            }
        };

        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "sfdotenv", &mut io::stdout());
        Ok(())
    }
}
