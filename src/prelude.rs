//! Convenient re-exports for common usage.
//!
//! ```rust
//! use errstack::prelude::*;
//!
//! fn load() -> Result<(), TracedError> {
//!     Err(new("config missing"))
//! }
//!
//! let err = load().unwrap_err();
//! assert!(stack_trace(&err).is_some());
//! ```

pub use crate::errorf;
pub use crate::{BoxError, StackPolicy, StackTracer, TracedError, UserFacingError};
pub use crate::{ResultExt, new, with_stack};
pub use crate::{find_ref, join, stack_trace, user_facing_message};
pub use crate::{
    BadInput, CategoryError, Conflict, Missing, NotAllowed, Timeout, Unexpected,
};
