//! User prompts
//!
//! The settings logic only needs three capabilities from the UI: ask for a
//! line of text, ask for confirmation, and show a message.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::error::Result;

pub trait Prompt {
    /// Ask for a line of text. `None` when the user backs out.
    fn request_text(&self, prompt: &str) -> Result<Option<String>>;

    /// Yes/no question, anything but an explicit yes is a no
    fn confirm(&self, prompt: &str) -> bool;

    fn alert(&self, message: &str);
}

/// Prompts on stdin/stdout
#[derive(Debug, Default)]
pub struct TerminalPrompt {
    /// Answer every confirmation with yes
    pub assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompt for TerminalPrompt {
    fn request_text(&self, prompt: &str) -> Result<Option<String>> {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }

        let input = input.trim();
        Ok((!input.is_empty()).then(|| input.to_string()))
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", prompt);
        io::stdout().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }

        is_yes(&input)
    }

    fn alert(&self, message: &str) {
        println!("{} {}", "!".yellow().bold(), message);
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
