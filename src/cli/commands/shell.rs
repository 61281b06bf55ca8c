//! Shell completion command.

use crate::error::StreaksError;
use crate::features::shell::completions::{
    completion_install_instructions, generate_completions, shell_from_str,
};

/// Print a completion script, or install instructions with `install`.
///
/// # Errors
///
/// Returns `StreaksError::InvalidArgument` for an unsupported shell.
pub fn completions(shell: &str, install: bool) -> Result<String, StreaksError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        StreaksError::InvalidArgument(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_bash() {
        let script = completions("bash", false).unwrap();
        assert!(script.contains("streaks"));
    }

    #[test]
    fn test_completions_install_instructions() {
        let text = completions("zsh", true).unwrap();
        assert!(text.contains("_streaks"));
    }

    #[test]
    fn test_completions_unknown_shell() {
        assert!(matches!(
            completions("tcsh", false),
            Err(StreaksError::InvalidArgument(_))
        ));
    }
}
