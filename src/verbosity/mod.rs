//! The verbosity dial: the common `-v`, `-vv`, `-vvv` flag pattern stored as a
//! count, translated into level thresholds through ordered breakpoints.
//!
//! (no flag) → 0, `-v` → 1, `-vv` → 2, ...

mod filter;
mod levels;
mod state;

pub use filter::VerbosityLevelsFilter;
pub use levels::{VerbosityLevel, VerbosityLevels, VerbosityRange};
pub use state::VerbosityState;

use crate::Error;

/// A verbosity value. Valid values are below [`MAX_VERBOSITY`].
pub type Verbosity = usize;

/// Exclusive upper bound. `usize::MAX` itself is reserved to mean "unset"
/// in the lock-free verbosity slot.
pub const MAX_VERBOSITY: Verbosity = usize::MAX;

/// Whether `value` is a usable verbosity.
#[must_use]
pub const fn is_verbosity(value: Verbosity) -> bool {
    value < MAX_VERBOSITY
}

/// Converts a signed integer (config files, command lines) into a verbosity.
///
/// # Errors
/// Negative values and values at or above [`MAX_VERBOSITY`].
pub fn as_verbosity(value: i64) -> Result<Verbosity, Error> {
    Verbosity::try_from(value)
        .ok()
        .filter(|v| is_verbosity(*v))
        .ok_or_else(|| {
            Error::validation(format!(
                "expected verbosity to be a non-negative integer less than {MAX_VERBOSITY}, given {value}"
            ))
        })
}

/// Checks an unsigned verbosity, rejecting the reserved sentinel.
///
/// # Errors
/// [`MAX_VERBOSITY`] itself.
pub fn check_verbosity(value: Verbosity) -> Result<Verbosity, Error> {
    if is_verbosity(value) {
        Ok(value)
    } else {
        Err(Error::validation(format!(
            "expected verbosity less than {MAX_VERBOSITY}, given {value}"
        )))
    }
}
