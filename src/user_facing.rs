//! Errors that carry a message designated for an external audience.

use std::error::Error;
use std::fmt;

use crate::BoxError;
use crate::error::TracedError;
use crate::stack::{EMPTY_STACK, Stack, StackPolicy, StackTracer};
use crate::tree;

/// An error carrying a message designated to be shown to a user external to
/// the system, alongside the technical cause chain.
///
/// The external message (via [`message`](Self::message)) and the internal
/// diagnostic message (via `Display`/`to_string`) are independent: the
/// internal one always comes from the wrapped cause. When no cause is
/// supplied, both collapse to the same string.
///
/// By construction the cause's tree always carries a stack: causes without
/// one are wrapped at build time (see [`UserFacingBuilder::build`]).
///
/// ## Example
///
/// ```rust
/// use errstack::{UserFacingError, user_facing_message};
///
/// let cause = errstack::new("lookup failed: row 42 not in index");
/// let err = UserFacingError::builder("that record does not exist")
///     .from_error(cause)
///     .build();
///
/// assert_eq!(err.to_string(), "lookup failed: row 42 not in index");
/// assert_eq!(err.message(), "that record does not exist");
/// assert_eq!(
///     user_facing_message(&err),
///     Some("that record does not exist")
/// );
/// ```
pub struct UserFacingError {
    message: String,
    cause: BoxError,
}

impl UserFacingError {
    /// Build an error whose external and internal messages are both
    /// `message`, with a stack captured at the caller's site.
    pub fn new(message: impl Into<String>) -> Self {
        Self::builder(message).build()
    }

    /// Start building; see [`UserFacingBuilder`] for the options.
    pub fn builder(message: impl Into<String>) -> UserFacingBuilder {
        UserFacingBuilder {
            message: message.into(),
            cause: None,
            policy: StackPolicy::Preserve,
            skip: 0,
        }
    }

    /// The message intended for the user external to the system.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl StackTracer for UserFacingError {
    fn stack_trace(&self) -> &Stack {
        tree::stack_trace(tree::as_dyn(&self.cause)).unwrap_or(&EMPTY_STACK)
    }
}

impl fmt::Display for UserFacingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cause)?;
        if f.alternate() {
            write!(f, ": {}", self.stack_trace())?;
        }
        Ok(())
    }
}

impl fmt::Debug for UserFacingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cause)?;
        let stack = self.stack_trace();
        if !stack.is_empty() {
            write!(f, "\n{stack:#}")?;
        }
        Ok(())
    }
}

impl Error for UserFacingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(tree::as_dyn(&self.cause))
    }
}

/// Options for constructing a [`UserFacingError`].
///
/// The cause's stack follows four rules, applied at [`build`](Self::build):
///
/// 1. no cause: one is created from the message, with a fresh stack
/// 2. cause without a stack: the cause is wrapped to attach a fresh stack
/// 3. cause with a stack (default): the cause and its stack are kept as-is
/// 4. cause with a stack plus [`overwrite_stack`](Self::overwrite_stack):
///    the cause is re-wrapped, replacing the stack with one captured here
pub struct UserFacingBuilder {
    message: String,
    cause: Option<BoxError>,
    policy: StackPolicy,
    skip: usize,
}

impl UserFacingBuilder {
    /// Supply the underlying cause.
    pub fn from_error(mut self, err: impl Into<BoxError>) -> Self {
        self.cause = Some(err.into());
        self
    }

    /// Capture a fresh stack at the build site even when the cause already
    /// carries one.
    pub fn overwrite_stack(mut self) -> Self {
        self.policy = StackPolicy::Overwrite;
        self
    }

    /// Skip `frames` additional caller frames when capturing; for wrapper
    /// constructors that should not appear in the stack.
    pub fn skip(mut self, frames: usize) -> Self {
        self.skip = frames;
        self
    }

    /// Apply the stack policy and produce the error.
    pub fn build(self) -> UserFacingError {
        let cause: BoxError = match self.cause {
            None => Box::new(TracedError::new_skip(self.message.clone(), self.skip)),
            Some(cause) => {
                let has_stack = tree::stack_trace(tree::as_dyn(&cause)).is_some();
                if has_stack && self.policy == StackPolicy::Preserve {
                    cause
                } else {
                    Box::new(TracedError::wrap_skip(cause, self.skip))
                }
            }
        };

        UserFacingError {
            message: self.message,
            cause,
        }
    }
}

/// The first user-facing message in `err`'s tree, if any error in it carries
/// one. `None` is absence, not failure.
pub fn user_facing_message<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a str> {
    if let Some(user_facing) = err.downcast_ref::<UserFacingError>() {
        return Some(user_facing.message());
    }
    tree::causes(err).into_iter().find_map(user_facing_message)
}
