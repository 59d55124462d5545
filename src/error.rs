//! The core traced error value.

use std::error::Error;
use std::fmt;

use crate::BoxError;
use crate::stack::{Stack, StackPolicy, StackTracer};
use crate::tree;

/// Wrapped-cause storage for [`TracedError`].
///
/// `Multiple` backs multi-placeholder [`errorf!`](crate::errorf): the causes
/// are direct children of the error, exposed through the multi-cause contract
/// rather than through [`Error::source`].
#[derive(Debug, Default)]
pub(crate) enum Cause {
    #[default]
    None,
    Single(BoxError),
    Multiple(Vec<BoxError>),
}

impl Cause {
    /// Whether any wrapped cause's tree already carries a non-empty stack.
    fn has_stack(&self) -> bool {
        match self {
            Cause::None => false,
            Cause::Single(err) => tree::stack_trace(tree::as_dyn(err)).is_some(),
            Cause::Multiple(errs) => errs
                .iter()
                .any(|err| tree::stack_trace(tree::as_dyn(err)).is_some()),
        }
    }
}

/// An error message coupled with an optional wrapped cause and a [`Stack`]
/// captured at construction time.
///
/// The message is exactly the string supplied at construction; it is never
/// derived from the cause after the fact. The value is immutable once built.
///
/// ## Formatting
///
/// - `{}`: the message
/// - `{:#}`: `<message>: [<file>:<line> ...]`
/// - `{:?}`: the message followed by the verbose stack, one frame per entry
///
/// ## Example
///
/// ```rust
/// use errstack::{StackTracer, TracedError};
///
/// let err = TracedError::new("connection refused");
/// assert_eq!(err.to_string(), "connection refused");
/// assert!(!err.stack_trace().is_empty());
/// ```
pub struct TracedError {
    message: String,
    cause: Cause,
    stack: Stack,
}

impl TracedError {
    /// Build an error with the supplied message and a stack captured at the
    /// caller's site.
    pub fn new(message: impl Into<String>) -> Self {
        Self::new_skip(message, 0)
    }

    /// Like [`new`](Self::new), skipping `skip` additional caller frames.
    /// Use from wrapper constructors that should not appear in the stack.
    pub fn new_skip(message: impl Into<String>, skip: usize) -> Self {
        Self {
            message: message.into(),
            cause: Cause::None,
            stack: Stack::capture(skip),
        }
    }

    /// Wrap an existing error: the message is the wrapped error's rendered
    /// message, and a fresh stack is captured at the caller's site.
    pub fn wrap(err: impl Into<BoxError>) -> Self {
        Self::wrap_skip(err, 0)
    }

    /// Like [`wrap`](Self::wrap), skipping `skip` additional caller frames.
    pub fn wrap_skip(err: impl Into<BoxError>, skip: usize) -> Self {
        let err = err.into();
        Self {
            message: err.to_string(),
            cause: Cause::Single(err),
            stack: Stack::capture(skip),
        }
    }

    /// The diagnostic message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub(crate) fn cause(&self) -> &Cause {
        &self.cause
    }
}

impl StackTracer for TracedError {
    #[inline]
    fn stack_trace(&self) -> &Stack {
        &self.stack
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if f.alternate() {
            write!(f, ": {}", self.stack)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if !self.stack.is_empty() {
            write!(f, "\n{:#}", self.stack)?;
        }
        Ok(())
    }
}

impl Error for TracedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Cause::Single(err) => {
                let err: &(dyn Error + 'static) = &**err;
                Some(err)
            }
            _ => None,
        }
    }
}

/// Non-macro core of [`errorf!`](crate::errorf): build a [`TracedError`]
/// from an already-formatted message and the causes consumed by the format's
/// placeholders, in placeholder order.
///
/// With [`StackPolicy::Overwrite`] a fresh stack is captured at the caller's
/// site. With [`StackPolicy::Preserve`] the new error carries an empty stack
/// of its own whenever one of the causes' trees already has one, so
/// [`stack_trace`](crate::stack_trace) keeps reporting the existing stack.
pub fn errorf_parts(message: String, causes: Vec<BoxError>, policy: StackPolicy) -> TracedError {
    let mut causes = causes;
    let cause = if causes.len() > 1 {
        Cause::Multiple(causes)
    } else {
        match causes.pop() {
            Some(err) => Cause::Single(err),
            None => Cause::None,
        }
    };

    let stack = if policy == StackPolicy::Preserve && cause.has_stack() {
        Stack::empty()
    } else {
        Stack::capture(0)
    };

    TracedError {
        message,
        cause,
        stack,
    }
}
