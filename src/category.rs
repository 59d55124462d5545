//! The closed taxonomy of semantic error categories.
//!
//! A category is encoded purely in the value's static type: checking "is
//! this a missing-category error" is a [`find_ref`](crate::find_ref)-style
//! downcast to `CategoryError<Missing>`, never an inspection of a runtime
//! tag field.

use std::error::Error;
use std::fmt;
use std::marker::PhantomData;

use crate::BoxError;
use crate::stack::{Stack, StackTracer};
use crate::user_facing::{UserFacingBuilder, UserFacingError};

mod sealed {
    pub trait Sealed {}
}

/// Marker contract for the fixed category set. Sealed: the taxonomy is
/// closed.
pub trait Category: sealed::Sealed + Send + Sync + 'static {
    /// Label used in verbose output.
    const LABEL: &'static str;
}

/// A [`UserFacingError`] tagged with a semantic category at the type level.
///
/// Categories classify common application failures so callers can decide how
/// to handle an error without inspecting message strings. Constructed
/// through one generic entry point:
///
/// ```rust
/// use errstack::{CategoryError, Missing, is_conflict, is_missing};
///
/// let err = CategoryError::<Missing>::new("not found");
///
/// assert!(is_conflict(&err).is_none());
/// let missing = is_missing(&err).expect("category matches");
/// assert_eq!(missing.message(), "not found");
/// ```
pub struct CategoryError<C: Category> {
    inner: UserFacingError,
    category: PhantomData<C>,
}

impl<C: Category> CategoryError<C> {
    /// Build a categorized error whose external and internal messages are
    /// both `message`, with a stack captured at the caller's site.
    pub fn new(message: impl Into<String>) -> Self {
        Self::builder(message).build()
    }

    /// Start building; options are those of [`UserFacingBuilder`].
    pub fn builder(message: impl Into<String>) -> CategoryBuilder<C> {
        CategoryBuilder {
            inner: UserFacingError::builder(message),
            category: PhantomData,
        }
    }

    /// The message intended for the user external to the system.
    #[inline]
    pub fn message(&self) -> &str {
        self.inner.message()
    }
}

impl<C: Category> StackTracer for CategoryError<C> {
    #[inline]
    fn stack_trace(&self) -> &Stack {
        self.inner.stack_trace()
    }
}

impl<C: Category> fmt::Display for CategoryError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<C: Category> fmt::Debug for CategoryError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", C::LABEL)?;
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<C: Category> Error for CategoryError<C> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.inner)
    }
}

/// Builder for [`CategoryError`]; see [`UserFacingBuilder`] for the stack
/// policy rules.
pub struct CategoryBuilder<C: Category> {
    inner: UserFacingBuilder,
    category: PhantomData<C>,
}

impl<C: Category> CategoryBuilder<C> {
    /// Supply the underlying cause.
    pub fn from_error(mut self, err: impl Into<BoxError>) -> Self {
        self.inner = self.inner.from_error(err);
        self
    }

    /// Capture a fresh stack at the build site even when the cause already
    /// carries one.
    pub fn overwrite_stack(mut self) -> Self {
        self.inner = self.inner.overwrite_stack();
        self
    }

    /// Skip `frames` additional caller frames when capturing.
    pub fn skip(mut self, frames: usize) -> Self {
        self.inner = self.inner.skip(frames);
        self
    }

    /// Apply the stack policy and produce the categorized error.
    pub fn build(self) -> CategoryError<C> {
        CategoryError {
            inner: self.inner.build(),
            category: PhantomData,
        }
    }
}

macro_rules! categories {
    ($($(#[$doc:meta])* $marker:ident => $alias:ident, $probe:ident, $label:literal;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy)]
            pub struct $marker;

            impl sealed::Sealed for $marker {}

            impl Category for $marker {
                const LABEL: &'static str = $label;
            }

            #[doc = concat!("A [`CategoryError`] tagged [`", stringify!($marker), "`].")]
            pub type $alias = CategoryError<$marker>;

            #[doc = concat!(
                "The first [`", stringify!($alias), "`] in `err`'s tree, if any. ",
                "`None` is a category mismatch, not an error condition."
            )]
            pub fn $probe<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a $alias> {
                crate::tree::find_ref(err)
            }
        )*
    };
}

categories! {
    /// Some input was invalid.
    BadInput => BadInputError, is_bad_input, "bad input";
    /// An action was not allowed.
    NotAllowed => NotAllowedError, is_not_allowed, "not allowed";
    /// Something was not found.
    Missing => MissingError, is_missing, "missing";
    /// An action could not be completed due to a conflict.
    Conflict => ConflictError, is_conflict, "conflict";
    /// An action took too long to complete.
    Timeout => TimeoutError, is_timeout, "timeout";
    /// An unexpected failure the caller cannot meaningfully react to.
    Unexpected => UnexpectedError, is_unexpected, "unexpected";
}
