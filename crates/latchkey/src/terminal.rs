// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal-backed credential form.
//!
//! Reads the username with a line editor and the password without echo.
//! Ctrl-C or Ctrl-D at any prompt cancels the form.

use colored::Colorize;
use latchkey_core::{CredentialForm, CredentialPrompt, FormOutcome, PromptRequest};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

/// Credential form on stdin/stderr.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialPrompt for TerminalPrompt {
    fn present(&self, request: &PromptRequest) -> FormOutcome {
        eprintln!();
        eprintln!("{}", request.message.bold());

        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                warn!(error = %e, "terminal unavailable, cancelling credential form");
                return FormOutcome::Cancelled;
            }
        };

        let mut form = CredentialForm::new();
        loop {
            let Some(username) = read_line(&mut editor, "Username (user@domain): ") else {
                return cancel(&mut form);
            };
            form.set_username(username.trim());

            match rpassword::prompt_password("Password: ") {
                Ok(password) => form.set_password(password),
                Err(e) => {
                    warn!(error = %e, "failed to read password");
                    return cancel(&mut form);
                }
            }

            if form.can_submit() {
                return form.submit().unwrap_or(FormOutcome::Cancelled);
            }

            eprintln!("{}", "Username and password are both required.".yellow());
            match read_line(&mut editor, "Try again? [Y/n] ") {
                Some(answer) if wants_retry(&answer) => form.clear(),
                _ => return cancel(&mut form),
            }
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("{}", message.yellow());
    }
}

fn read_line(editor: &mut DefaultEditor, prompt: &str) -> Option<String> {
    match editor.readline(prompt) {
        Ok(line) => Some(line),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
        Err(e) => {
            warn!(error = %e, "failed to read from terminal");
            None
        }
    }
}

fn cancel(form: &mut CredentialForm) -> FormOutcome {
    eprintln!("{}", "Sign in cancelled.".dimmed());
    form.cancel().unwrap_or(FormOutcome::Cancelled)
}

/// Empty input or anything starting with `y` means yes.
fn wants_retry(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.to_ascii_lowercase().starts_with('y')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_answers() {
        assert!(wants_retry(""));
        assert!(wants_retry("y"));
        assert!(wants_retry(" Yes "));
        assert!(!wants_retry("n"));
        assert!(!wants_retry("no"));
        assert!(!wants_retry("q"));
    }
}
