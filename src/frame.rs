//! A single resolved call-stack entry.

use std::fmt;
use std::path::{Path, PathBuf};

/// One entry of a captured [`Stack`](crate::Stack): a raw instruction pointer
/// resolved to a source file, line number, and qualified function name.
///
/// A frame the runtime could not resolve keeps its instruction pointer and
/// reports `None` for every resolved field. Such frames are kept in the stack
/// rather than dropped, so frame positions stay meaningful.
///
/// ## Formatting
///
/// - `{}` is compact: `<file basename>:<line>`
/// - `{:#}` is verbose: `<qualified function>` followed by
///   `\t<full path>:<line>` on the next line
///
/// An unresolved frame renders with empty/zero components (`:0` in compact
/// form).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    ip: usize,
    file: Option<PathBuf>,
    line: Option<u32>,
    function: Option<String>,
}

impl Frame {
    /// Resolve a raw frame eagerly. When the frame covers inlined calls, the
    /// outermost symbol is kept: it names the physical function, so a
    /// constructor inlined into its caller still resolves to the caller and
    /// the call-site line, instead of being mistaken for capture machinery.
    pub(crate) fn from_raw(raw: &backtrace::Frame) -> Self {
        let mut frame = Frame {
            ip: raw.ip() as usize,
            file: None,
            line: None,
            function: None,
        };

        // Symbols arrive innermost first; the last one wins.
        backtrace::resolve_frame(raw, |symbol| {
            // `{:#}` drops the trailing disambiguator hash from the
            // demangled name.
            frame.function = symbol.name().map(|name| format!("{name:#}"));
            frame.file = symbol.filename().map(Path::to_path_buf);
            frame.line = symbol.lineno();
        });

        frame
    }

    /// The raw, platform-specific instruction pointer this frame was resolved
    /// from. Opaque; useful only for correlation.
    #[inline]
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Full path of the source file, if the frame resolved.
    #[inline]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Source line number, if the frame resolved.
    #[inline]
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Qualified function name, if the frame resolved.
    #[inline]
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Whether the runtime resolved this frame into file/line/function.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.function.is_some() || self.file.is_some()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            if let Some(function) = &self.function {
                f.write_str(function)?;
            }
            f.write_str("\n\t")?;
            if let Some(file) = &self.file {
                write!(f, "{}", file.display())?;
            }
            write!(f, ":{}", self.line.unwrap_or(0))
        } else {
            let basename = self
                .file
                .as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy());
            if let Some(basename) = basename {
                f.write_str(&basename)?;
            }
            write!(f, ":{}", self.line.unwrap_or(0))
        }
    }
}
