//! Error Types
//!
//! The engines themselves cannot fail: empty text and zero durations are
//! completions, not errors. What can fail is turning host-supplied numbers
//! into timings, and talking to a driver task that has already stopped.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by the disclosure core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A numeric timing parameter was negative or not finite
    #[error("invalid argument `{name}`: {reason} (got {value})")]
    InvalidArgument {
        /// Parameter name as the caller knows it
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The driver task behind a handle is no longer running
    #[error("{0} driver has shut down")]
    DriverClosed(&'static str),
}

/// Convenience alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Convert a host-supplied millisecond value into a [`Duration`]
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `ms` is negative, not finite, or
/// too large to fit in a [`Duration`].
pub fn duration_from_millis(name: &'static str, ms: f64) -> Result<Duration> {
    if !ms.is_finite() {
        return Err(Error::InvalidArgument {
            name,
            value: ms,
            reason: "must be finite",
        });
    }
    if ms < 0.0 {
        return Err(Error::InvalidArgument {
            name,
            value: ms,
            reason: "must not be negative",
        });
    }
    Duration::try_from_secs_f64(ms / 1000.0).map_err(|_| Error::InvalidArgument {
        name,
        value: ms,
        reason: "too large",
    })
}
