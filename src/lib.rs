//! # errstack - stack-traced error values
//!
//! Errors that capture a call-stack snapshot at the point they are created
//! or first wrapped, compose through wrap/unwrap tree traversal, and can
//! carry a user-facing message plus a semantic category (bad input, not
//! allowed, missing, conflict, timeout, unexpected) alongside the internal
//! diagnostic message.
//!
//! ```text
//! saving snapshot: disk offline
//! storage::flush
//!         src/storage.rs:142
//! api::handle_request
//!         src/api.rs:89
//! ```
//!
//! ## Creating and wrapping
//!
//! ```rust
//! use errstack::{ResultExt, errorf, stack_trace};
//!
//! fn read_marker() -> Result<String, std::io::Error> {
//!     Err(std::io::Error::other("no such file"))
//! }
//!
//! // Start a trace on a plain error.
//! let err = read_marker().with_stack().unwrap_err();
//! assert!(stack_trace(&err).is_some());
//!
//! // Or build one from a format string; every format argument is an error
//! // that substitutes into the message *and* becomes a cause.
//! let io = std::io::Error::other("disk offline");
//! let err = errorf!("saving snapshot: {}", io);
//! assert_eq!(err.to_string(), "saving snapshot: disk offline");
//! ```
//!
//! ## Overwrite vs. preserve
//!
//! By default every wrap captures a fresh stack at the call site; the
//! wrapped error's own stack stays reachable through the cause tree. Pass
//! [`StackPolicy::Preserve`] (or use [`with_stack_policy`]) to keep an
//! existing stack instead:
//!
//! ```rust
//! use errstack::{StackPolicy, errorf};
//!
//! let inner = errstack::new("inner");
//! let err = errorf!("outer: {}", inner; StackPolicy::Preserve);
//! // stack_trace(&err) still reports `inner`'s capture site.
//! # assert!(errstack::stack_trace(&err).is_some());
//! ```
//!
//! ## User-facing messages and categories
//!
//! [`UserFacingError`] separates the message shown to an external user from
//! the internal diagnostic chain. [`CategoryError`] additionally tags the
//! error with one of six categories at the type level, so category checks
//! are type-directed tree lookups:
//!
//! ```rust
//! use errstack::{CategoryError, Missing, is_missing, user_facing_message};
//!
//! let cause = errstack::new("lookup failed: row 42 not in index");
//! let err = CategoryError::<Missing>::builder("that record does not exist")
//!     .from_error(cause)
//!     .build();
//!
//! assert_eq!(err.to_string(), "lookup failed: row 42 not in index");
//! assert_eq!(is_missing(&err).unwrap().message(), "that record does not exist");
//! assert_eq!(user_facing_message(&err), Some("that record does not exist"));
//! ```
//!
//! ## Formatting
//!
//! Every error and [`Stack`] supports two registered modes:
//!
//! - compact (`Display`): the message; `{:#}` appends
//!   `": [<file>:<line> ...]"` after it
//! - verbose (`Debug`): the message followed by one
//!   `<function>\n\t<path>:<line>` entry per frame
//!
//! ## What this crate is not
//!
//! No persistence, no transport, no localization, and no structured
//! key/value fields: an error is message + category + cause + stack.

use std::error::Error;

mod category;
mod error;
mod ext;
mod frame;
pub mod prelude;
mod stack;
mod tree;
mod user_facing;

pub use category::{
    BadInput, BadInputError, Category, CategoryBuilder, CategoryError, Conflict, ConflictError,
    Missing, MissingError, NotAllowed, NotAllowedError, Timeout, TimeoutError, Unexpected,
    UnexpectedError, is_bad_input, is_conflict, is_missing, is_not_allowed, is_timeout,
    is_unexpected,
};
pub use error::{TracedError, errorf_parts};
pub use ext::ResultExt;
pub use frame::Frame;
pub use stack::{Stack, StackPolicy, StackTracer};
pub use tree::{ErrorSlot, Joined, cause, causes, find_any, find_ref, is, join, stack_trace};
pub use user_facing::{UserFacingBuilder, UserFacingError, user_facing_message};

/// The universal owned error: anything that renders a message and may
/// expose causes.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Build an error with the supplied message and a stack captured at the
/// caller's site.
///
/// ```rust
/// use errstack::StackTracer;
///
/// let err = errstack::new("connection refused");
/// assert_eq!(err.to_string(), "connection refused");
/// assert!(!err.stack_trace().is_empty());
/// ```
pub fn new(message: impl Into<String>) -> TracedError {
    TracedError::new(message)
}

/// Wrap `err` with a stack captured at the caller's site, shadowing any
/// stack it already carried for formatting purposes. The wrapped error and
/// its own stack stay independently reachable through the cause tree.
///
/// Use [`with_stack_policy`] with [`StackPolicy::Preserve`] to keep an
/// existing stack instead.
pub fn with_stack(err: impl Into<BoxError>) -> TracedError {
    TracedError::wrap(err)
}

/// Like [`with_stack`], but under [`StackPolicy::Preserve`] the error is
/// returned unchanged when its tree already exposes a stack. The probe goes
/// through the stack-exposing contract, not a concrete type check.
pub fn with_stack_policy(err: impl Into<BoxError>, policy: StackPolicy) -> BoxError {
    let err = err.into();
    if policy == StackPolicy::Preserve && tree::stack_trace(tree::as_dyn(&err)).is_some() {
        return err;
    }
    Box::new(TracedError::wrap(err))
}

/// Build a [`TracedError`] from a format string.
///
/// Every format argument must be an error; it is consumed once,
/// substituting its rendered message into the placeholder *and* registering
/// as a cause, in placeholder order. One argument yields a single cause; two
/// or more yield a multi-cause node (see [`causes`]). Interpolate plain
/// values through inline named captures in the literal. A non-error
/// argument is rejected at compile time.
///
/// A trailing `; policy` applies the [`with_stack`] overwrite policy:
/// the default captures a fresh stack at the call site, while
/// [`StackPolicy::Preserve`] keeps a stack already present in the causes'
/// trees.
///
/// ```rust
/// use errstack::{causes, errorf};
///
/// let a = std::io::Error::other("a");
/// let b = std::io::Error::other("b");
/// let path = "state.db";
/// let err = errorf!("flushing {path}: {}: {}", a, b);
///
/// assert_eq!(err.to_string(), "flushing state.db: a: b");
/// assert_eq!(causes(&err).len(), 2);
/// ```
#[macro_export]
macro_rules! errorf {
    ($fmt:literal $(, $cause:expr)* ; $policy:expr $(,)?) => {{
        let __causes: ::std::vec::Vec<$crate::BoxError> =
            ::std::vec![$(::std::boxed::Box::new($cause) as $crate::BoxError),*];
        #[allow(unused_mut, unused_variables)]
        let mut __remaining = __causes.iter();
        let __message = ::std::format!(
            $fmt,
            $({
                let _ = ::core::stringify!($cause);
                match __remaining.next() {
                    ::core::option::Option::Some(cause) => cause,
                    ::core::option::Option::None => ::core::unreachable!(),
                }
            }),*
        );
        $crate::errorf_parts(__message, __causes, $policy)
    }};
    ($fmt:literal $(, $cause:expr)* $(,)?) => {
        $crate::errorf!($fmt $(, $cause)* ; $crate::StackPolicy::Overwrite)
    };
}
