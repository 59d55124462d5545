//! Stack capture and the stack-exposing contract.

use std::fmt;

use crate::frame::Frame;

/// Maximum number of frames kept per capture.
pub(crate) const MAX_DEPTH: usize = 32;

/// Symbols containing this marker belong to this crate and are treated as
/// capture machinery rather than caller frames.
const CRATE_MARKER: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// Shared zero value, for errors whose own stack lives further down the tree.
pub(crate) static EMPTY_STACK: Stack = Stack::empty();

/// Whether attaching a [`Stack`] replaces one the error already carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackPolicy {
    /// Capture a fresh stack at the call site, shadowing any existing one.
    /// The shadowed stack stays reachable through the cause tree.
    #[default]
    Overwrite,
    /// Keep a stack already present anywhere in the error's cause tree;
    /// capture only when none is found.
    Preserve,
}

/// An ordered call-stack snapshot, innermost frame first.
///
/// A stack may be empty ([`Stack::empty`] is the distinct zero value) and
/// is immutable once captured.
///
/// ## Formatting
///
/// - `{}` is compact: `[<file>:<line> <file>:<line> ...]`; empty renders `[]`
/// - `{:#}` is verbose: one [`Frame`] per entry, newline-separated; empty
///   renders nothing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    /// The zero value: a stack with no frames.
    #[inline]
    pub const fn empty() -> Self {
        Self { frames: Vec::new() }
    }

    /// Whether this stack holds no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The captured frames, innermost first.
    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Walk the current call stack and resolve up to [`MAX_DEPTH`] frames.
    ///
    /// Leading frames are dropped until the walk passes through this crate's
    /// own symbols, then the contiguous run of this-crate frames is dropped
    /// too, so the first kept frame is the caller of whichever public
    /// constructor triggered the capture, however many internal layers sit
    /// in between. `skip` then drops that many additional caller frames, for
    /// wrapper constructors that want to hide themselves.
    ///
    /// Frames the runtime cannot resolve are recorded as zero [`Frame`]s,
    /// never omitted.
    // Never inline: the symbol anchors the machinery filter above.
    #[inline(never)]
    pub(crate) fn capture(skip: usize) -> Self {
        let mut frames = Vec::new();
        let mut to_skip = skip;
        let mut seen_own = false;
        let mut in_machinery = true;

        backtrace::trace(|raw| {
            let frame = Frame::from_raw(raw);
            if in_machinery {
                match frame.function() {
                    Some(name) if name.contains(CRATE_MARKER) => {
                        seen_own = true;
                        return true;
                    }
                    _ if !seen_own => return true,
                    _ => in_machinery = false,
                }
            }
            if to_skip > 0 {
                to_skip -= 1;
                return true;
            }
            frames.push(frame);
            frames.len() < MAX_DEPTH
        });

        Self { frames }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            for (i, frame) in self.frames.iter().enumerate() {
                if i > 0 {
                    f.write_str("\n")?;
                }
                write!(f, "{frame:#}")?;
            }
            Ok(())
        } else {
            f.write_str("[")?;
            for (i, frame) in self.frames.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{frame}")?;
            }
            f.write_str("]")
        }
    }
}

/// Stack-exposing contract, implemented by every error type in this crate.
///
/// Note that cause-tree probing ("does this error, anywhere in its tree,
/// carry a stack?") goes through [`stack_trace`](crate::stack_trace), which
/// also handles errors that merely wrap a stack-carrying cause.
pub trait StackTracer {
    /// The stack for this error. May be empty.
    fn stack_trace(&self) -> &Stack;
}
