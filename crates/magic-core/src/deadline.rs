//! Cooperative cancellation: pipeline stages are expected to honor a
//! caller-supplied deadline by periodically sampling it at natural
//! checkpoints.

use std::time::{Duration, Instant};

use crate::error::{ErrorInfo, ErrorKind, MagicError};

/// A deadline sampled at pipeline checkpoints (per row in scanning loops,
/// per contour in classification, per symbol in connection inference).
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires.
    pub fn none() -> Self {
        Self { expires_at: None }
    }

    /// A deadline expiring `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            expires_at: Some(Instant::now() + timeout),
        }
    }

    /// Returns `Err(MagicError::Cancelled)` if the deadline has elapsed.
    pub fn check(&self) -> Result<(), MagicError> {
        match self.expires_at {
            Some(at) if Instant::now() >= at => Err(MagicError::new(
                ErrorKind::Cancelled,
                ErrorInfo::new("E_CANCELLED", "operation exceeded its deadline"),
            )),
            _ => Ok(()),
        }
    }

    /// Returns true if the deadline has elapsed.
    pub fn is_expired(&self) -> bool {
        self.check().is_err()
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_never_expires() {
        assert!(Deadline::none().check().is_ok());
    }

    #[test]
    fn elapsed_deadline_cancels() {
        let d = Deadline::after(Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert!(d.check().is_err());
    }
}
