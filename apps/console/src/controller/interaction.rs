//! User-facing side effects a page needs from its host: blocking confirmation,
//! alerts, and a full page reload.

use std::io::{self, BufRead, Write};

pub trait Interaction {
    fn confirm(&mut self, question: &str) -> bool;
    fn alert(&mut self, message: &str);
    fn reload(&mut self);
}

/// Terminal host: questions on stderr answered from stdin, alerts on stderr,
/// reloads recorded for the caller to carry out.
pub struct TerminalInteraction {
    assume_yes: bool,
    reload_requested: bool,
}

impl TerminalInteraction {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            reload_requested: false,
        }
    }

    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "j" | "ja"
    )
}

impl Interaction for TerminalInteraction {
    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            tracing::debug!(question, "confirmation assumed");
            return true;
        }
        let mut stderr = io::stderr();
        if write!(stderr, "{question} [y/N] ").and_then(|()| stderr.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(err) => {
                tracing::warn!("failed to read confirmation: {err}");
                false
            }
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn reload(&mut self) {
        self.reload_requested = true;
    }
}
