use std::io::{self, BufRead, Write};

use smartcity_core::gateways::ConfirmGate;

/// Asks on the terminal before destructive operations.
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl TerminalConfirm {
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "o" | "oui"
    )
}

impl ConfirmGate for TerminalConfirm {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            log::debug!("Confirmed without asking: {message}");
            return true;
        }
        print!("{message} [y/N] ");
        if let Err(err) = io::stdout().flush() {
            log::warn!("Unable to ask for confirmation: {err}");
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                log::warn!("Unable to read the answer: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_an_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(is_yes("oui"));
        assert!(!is_yes(""));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[tokio::test]
    async fn assume_yes_does_not_ask() {
        assert!(TerminalConfirm::new(true).confirm("Delete?").await);
    }
}
