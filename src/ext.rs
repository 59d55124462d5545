//! Extension trait for attaching stacks and user-facing messages to Results.

use crate::category::{Category, CategoryError};
use crate::error::TracedError;
use crate::user_facing::UserFacingError;

/// Ergonomic error conversion on `Result`, avoiding `map_err` boilerplate.
///
/// ## Example
///
/// ```rust
/// use errstack::{Missing, MissingError, ResultExt, TracedError};
///
/// fn read_marker() -> Result<String, std::io::Error> {
///     Err(std::io::Error::other("no such file"))
/// }
///
/// fn load() -> Result<String, TracedError> {
///     read_marker().with_stack()
/// }
///
/// fn lookup() -> Result<String, MissingError> {
///     read_marker().categorize::<Missing>("that record does not exist")
/// }
///
/// assert_eq!(load().unwrap_err().to_string(), "no such file");
/// assert_eq!(
///     lookup().unwrap_err().message(),
///     "that record does not exist"
/// );
/// ```
pub trait ResultExt<T> {
    /// Wrap the error with a stack captured at the caller's site.
    fn with_stack(self) -> Result<T, TracedError>;

    /// Wrap the error in a [`UserFacingError`] carrying `message` for the
    /// external audience.
    fn user_facing(self, message: &str) -> Result<T, UserFacingError>;

    /// Wrap the error in a [`CategoryError`] of the given category carrying
    /// `message` for the external audience.
    fn categorize<C: Category>(self, message: &str) -> Result<T, CategoryError<C>>;
}

// Written as plain matches rather than `map_err`: a closure would put
// `core::result`/`core::ops::function` frames between this crate's frames,
// and the capture filter only drops a contiguous run of them. This way the
// first recorded frame is the adapter's caller.
impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_stack(self) -> Result<T, TracedError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(TracedError::wrap(err)),
        }
    }

    fn user_facing(self, message: &str) -> Result<T, UserFacingError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(UserFacingError::builder(message).from_error(err).build()),
        }
    }

    fn categorize<C: Category>(self, message: &str) -> Result<T, CategoryError<C>> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(CategoryError::builder(message).from_error(err).build()),
        }
    }
}
