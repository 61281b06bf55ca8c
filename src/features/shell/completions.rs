//! Shell completion scripts, generated from the clap command tree.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::StreaksError;

const BIN: &str = "streaks";

/// Render the completion script for `shell`.
///
/// # Errors
///
/// Returns `StreaksError::Parse` if the generator emits invalid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, StreaksError> {
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut Cli::command(), BIN, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| StreaksError::Parse(format!("completion script is not UTF-8: {e}")))
}

/// Parse a shell name, case-insensitively. `ps` and `pwsh` mean `PowerShell`.
#[must_use]
pub fn shell_from_str(name: &str) -> Option<Shell> {
    match name.trim().to_lowercase().as_str() {
        "ps" | "pwsh" => Some(Shell::PowerShell),
        other => other.parse().ok(),
    }
}

/// How to wire the generated script into `shell`.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    let steps = match shell {
        Shell::Bash => "# In ~/.bashrc:\nsource <(streaks completions bash)",
        Shell::Zsh => {
            "mkdir -p ~/.zsh/completions\n\
             streaks completions zsh > ~/.zsh/completions/_streaks\n\
             # In ~/.zshrc, before compinit:\n\
             fpath=(~/.zsh/completions $fpath)"
        }
        Shell::Fish => "streaks completions fish > ~/.config/fish/completions/streaks.fish",
        Shell::PowerShell => {
            "# In $PROFILE:\nstreaks completions powershell | Out-String | Invoke-Expression"
        }
        Shell::Elvish => {
            "streaks completions elvish > ~/.config/elvish/lib/streaks.elv\n\
             # In ~/.config/elvish/rc.elv:\nuse streaks"
        }
        _ => return format!("Run `{BIN} completions {shell}` and load the output in your shell."),
    };
    format!("{steps}\n")
}
