//! Cause-tree traversal.
//!
//! Every algorithm here walks an error's cause tree in the same fixed order:
//! pre-order, depth-first, left-to-right over (self, then each cause in
//! order). The order is part of the contract: it decides which node wins
//! when several match.

use std::error::Error;
use std::fmt;

use crate::BoxError;
use crate::error::{Cause, TracedError};
use crate::stack::{Stack, StackTracer};

/// Upcast an owned boxed error to the borrowed traversal view.
pub(crate) fn as_dyn(err: &BoxError) -> &(dyn Error + 'static) {
    &**err
}

// ============================================================================
// Joined - multi-cause node
// ============================================================================

/// A virtual node aggregating two or more sibling causes.
///
/// Built by [`join`]; carries no stack of its own, so
/// [`stack_trace`] falls through to the first child that has one. Renders as
/// each child's message joined by newline, in order.
pub struct Joined {
    errs: Vec<BoxError>,
}

impl Joined {
    /// The joined errors, in original order. Always at least two.
    #[inline]
    pub fn causes(&self) -> &[BoxError] {
        &self.errs
    }
}

impl fmt::Display for Joined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errs.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

// Verbose mode renders each child's message, not its structural Debug;
// foreign errors would otherwise leak their struct fields here.
impl fmt::Debug for Joined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errs.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for Joined {}

/// Join multiple optional errors into one.
///
/// `None` entries are discarded. Returns `None` when nothing remains, the
/// single error unchanged when exactly one remains, and otherwise a node
/// exposing all remaining errors, in original order, through the multi-cause
/// contract (see [`causes`]).
///
/// ## Example
///
/// ```rust
/// use errstack::{BoxError, causes, join};
///
/// let a: BoxError = Box::new(errstack::new("a"));
/// let b: BoxError = Box::new(errstack::new("b"));
///
/// let err = join([Some(a), None, Some(b)]).expect("two errors remain");
/// assert_eq!(err.to_string(), "a\nb");
/// assert_eq!(causes(&*err).len(), 2);
/// ```
pub fn join<I>(errs: I) -> Option<BoxError>
where
    I: IntoIterator<Item = Option<BoxError>>,
{
    let mut errs: Vec<BoxError> = errs.into_iter().flatten().collect();
    match errs.len() {
        0 => None,
        1 => errs.pop(),
        _ => Some(Box::new(Joined { errs })),
    }
}

// ============================================================================
// Unwrapping
// ============================================================================

/// The single wrapped cause, if the error exposes exactly one.
///
/// Multi-cause nodes (from [`join`] or a multi-placeholder
/// [`errorf!`](crate::errorf)) are not unwrapped through this path; use
/// [`causes`] for those.
pub fn cause<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a (dyn Error + 'static)> {
    err.source()
}

/// The immediate causes of an error, flattened.
///
/// A multi-cause node yields its children verbatim; a single-cause error
/// yields a one-element vec; anything else yields an empty vec, never an
/// "absent" result.
pub fn causes<'a>(err: &'a (dyn Error + 'static)) -> Vec<&'a (dyn Error + 'static)> {
    if let Some(joined) = err.downcast_ref::<Joined>() {
        return joined.causes().iter().map(as_dyn).collect();
    }
    if let Some(traced) = err.downcast_ref::<TracedError>() {
        if let Cause::Multiple(errs) = traced.cause() {
            return errs.iter().map(as_dyn).collect();
        }
    }
    match err.source() {
        Some(child) => vec![child],
        None => Vec::new(),
    }
}

// ============================================================================
// Matching
// ============================================================================

/// Whether any error in `err`'s tree equals `target`.
///
/// Each node is downcast to `T` and compared with `==`, so the node type's
/// `PartialEq` impl is its equivalence predicate. The first pre-order match
/// short-circuits.
pub fn is<T>(err: &(dyn Error + 'static), target: &T) -> bool
where
    T: Error + PartialEq + 'static,
{
    if err.downcast_ref::<T>().is_some_and(|found| found == target) {
        return true;
    }
    causes(err).into_iter().any(|child| is(child, target))
}

/// The first error in `err`'s tree whose concrete type is `T`.
///
/// ## Example
///
/// ```rust
/// use errstack::{TracedError, errorf, find_ref};
///
/// let io = std::io::Error::other("disk offline");
/// let err = errorf!("saving snapshot: {}", io);
///
/// let found = find_ref::<std::io::Error>(&err).expect("io error is in the tree");
/// assert_eq!(found.to_string(), "disk offline");
/// assert!(find_ref::<TracedError>(&err).is_some());
/// ```
pub fn find_ref<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    if let Some(found) = err.downcast_ref::<T>() {
        return Some(found);
    }
    causes(err).into_iter().find_map(find_ref)
}

/// A writable target for [`find_any`]. Implemented for `Option<&T>` where
/// `T` is a concrete error type; a matched node is written into the option.
pub trait ErrorSlot<'a> {
    /// Attempt to fill this slot from a single node. True on match.
    fn try_fill(&mut self, err: &'a (dyn Error + 'static)) -> bool;
}

impl<'a, T> ErrorSlot<'a> for Option<&'a T>
where
    T: Error + 'static,
{
    fn try_fill(&mut self, err: &'a (dyn Error + 'static)) -> bool {
        match err.downcast_ref::<T>() {
            Some(found) => {
                *self = Some(found);
                true
            }
            None => false,
        }
    }
}

/// Run an independent [`find_ref`]-style search for every slot against the
/// same tree. True iff at least one slot matched; unmatched slots are left
/// untouched.
///
/// ## Example
///
/// ```rust
/// use errstack::{BadInputError, Conflict, ConflictError, MissingError};
/// use errstack::{CategoryError, find_any};
///
/// let err = CategoryError::<Conflict>::new("version mismatch");
///
/// let mut bad_input: Option<&BadInputError> = None;
/// let mut conflict: Option<&ConflictError> = None;
/// let mut missing: Option<&MissingError> = None;
///
/// assert!(find_any(&err, &mut [&mut bad_input, &mut conflict, &mut missing]));
/// assert!(conflict.is_some());
/// assert!(bad_input.is_none() && missing.is_none());
/// ```
pub fn find_any<'a>(
    err: &'a (dyn Error + 'static),
    slots: &mut [&mut dyn ErrorSlot<'a>],
) -> bool {
    let mut matched = false;
    for slot in slots.iter_mut() {
        matched |= fill_slot(err, &mut **slot);
    }
    matched
}

fn fill_slot<'a>(err: &'a (dyn Error + 'static), slot: &mut dyn ErrorSlot<'a>) -> bool {
    if slot.try_fill(err) {
        return true;
    }
    causes(err).into_iter().any(|child| fill_slot(child, slot))
}

// ============================================================================
// Stack probing
// ============================================================================

/// The first non-empty [`Stack`] in `err`'s tree, in pre-order.
///
/// Joined nodes carry no stack of their own, so the first-listed child with
/// one wins. `None` means no error in the tree carries a stack; that is
/// absence, not failure.
pub fn stack_trace<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Stack> {
    if let Some(traced) = err.downcast_ref::<TracedError>() {
        let stack = traced.stack_trace();
        if !stack.is_empty() {
            return Some(stack);
        }
    }
    causes(err).into_iter().find_map(stack_trace)
}
