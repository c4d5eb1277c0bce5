use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tasklane_app::Interaction;

/// Prompts on stderr and reads answers from stdin.
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Interaction for TerminalPrompt {
    fn confirm(&self, message: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        let mut stderr = io::stderr().lock();
        write!(stderr, "{message} [y/N] ").context("failed to write prompt")?;
        stderr.flush().context("failed to flush prompt")?;
        drop(stderr);

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("failed to read answer")?;
        Ok(is_yes(&answer))
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
