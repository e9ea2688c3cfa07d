//! Confirmation policy for trading-API calls.
//!
//! A policy object supplied at client construction decides whether each
//! trading-API call may proceed. Declining aborts the call with
//! [`SdkError::ConfirmationDeclined`](crate::error::SdkError) before any
//! request is sent. The client serializes prompts so concurrent calls never
//! interleave their console output.

/// Decides whether a trading-API call may proceed.
///
/// `summary` is the command and its encoded arguments (credentials are never
/// included).
pub trait ConfirmPolicy: Send + Sync {
    fn confirm(&self, summary: &str) -> bool;
}

/// Never prompts; every call proceeds. The default policy.
pub struct NoConfirm;

impl ConfirmPolicy for NoConfirm {
    fn confirm(&self, _summary: &str) -> bool {
        true
    }
}

/// Prompts y/n on the console before every trading-API call.
pub struct ConsoleConfirm;

impl ConfirmPolicy for ConsoleConfirm {
    fn confirm(&self, summary: &str) -> bool {
        use std::io::{BufRead, Write};

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            let _ = write!(
                stdout,
                "About to call the trading API:\n  {summary}\nProceed? [y/n] "
            );
            let _ = stdout.flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                // EOF or read failure: refuse rather than trade blind.
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }
            match line.trim() {
                "y" | "Y" | "yes" => return true,
                "n" | "N" | "no" => return false,
                _ => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CancelsOnly;

    impl ConfirmPolicy for CancelsOnly {
        fn confirm(&self, summary: &str) -> bool {
            summary.starts_with("command=cancelOrder")
        }
    }

    #[test]
    fn test_no_confirm_always_allows() {
        assert!(NoConfirm.confirm("command=buy&rate=0.05"));
    }

    #[test]
    fn test_custom_policy_sees_the_summary() {
        assert!(CancelsOnly.confirm("command=cancelOrder&orderNumber=1"));
        assert!(!CancelsOnly.confirm("command=buy"));
    }
}
