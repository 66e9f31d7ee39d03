//! User interaction handling.
//! Yes/no confirmations asked before destructive or surprising operations.

use crate::error::{Error, Result};
use dialoguer::Confirm;

/// Asks the user a yes/no question.
pub trait Prompter {
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer. Defaults to "no".
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Makes sure a question reads as one.
pub fn as_question(message: &str) -> String {
    let message = message.trim_end();
    if message.ends_with('?') {
        message.to_string()
    } else {
        format!("{message}?")
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(as_question(message))
            .default(false)
            .interact()
            .map_err(|e| Error::IoError(std::io::Error::other(e.to_string())))
    }
}

/// Parses a typed yes/no answer.
///
/// Returns `(valid, answer)`; only answers starting with `y` or `n` are valid.
pub fn yes_no_answer(input: &str) -> (bool, bool) {
    let input = input.trim().to_lowercase();
    if input.starts_with('y') {
        (true, true)
    } else if input.starts_with('n') {
        (true, false)
    } else {
        (false, false)
    }
}
