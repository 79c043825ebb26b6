//! What to do when loading or saving fails.
//!
//! The screensaver's settings dialog answers a failed load with
//! "retry / ignore and use defaults / abort" and a failed save with
//! "retry / ignore / cancel".  [`Recovery`] names those answers; the
//! `*_with_recovery` use cases ask a caller-supplied closure for one after
//! every failure.  [`RetryPolicy`] is the non-interactive answer used by the
//! command line: retry a fixed number of times, then give a fixed answer.

use tracing::warn;

use super::ConfigError;

/// The caller's answer to a failed load or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Try the same operation again.
    Retry,
    /// Carry on without the operation: defaults for a load, nothing written
    /// for a save.
    Ignore,
    /// Give up and report the error.
    Abort,
}

/// Retries up to `retries` times, then answers `exhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    retries: u32,
    exhausted: Recovery,
}

impl RetryPolicy {
    pub fn new(retries: u32, exhausted: Recovery) -> Self {
        Self { retries, exhausted }
    }

    /// Decides how to proceed after the `failures`-th consecutive failure
    /// (counting from 1).
    pub fn decide(&self, err: &ConfigError, failures: u32) -> Recovery {
        if failures <= self.retries {
            warn!("attempt {failures} failed: {err}; retrying");
            Recovery::Retry
        } else {
            self.exhausted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clock_core::PropertyError;

    fn some_error() -> ConfigError {
        PropertyError::NotFound("scale".to_string()).into()
    }

    #[test]
    fn test_policy_retries_then_gives_fixed_answer() {
        let policy = RetryPolicy::new(2, Recovery::Ignore);
        let err = some_error();

        assert_eq!(policy.decide(&err, 1), Recovery::Retry);
        assert_eq!(policy.decide(&err, 2), Recovery::Retry);
        assert_eq!(policy.decide(&err, 3), Recovery::Ignore);
    }

    #[test]
    fn test_policy_without_retries_answers_immediately() {
        let policy = RetryPolicy::new(0, Recovery::Abort);
        assert_eq!(policy.decide(&some_error(), 1), Recovery::Abort);
    }
}
