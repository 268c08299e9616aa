use std::error::Error;
use std::fmt;

/// Invalid breakpoint configuration. Fatal: a build must not continue with a
/// degraded bucket set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BreakpointError {
    /// No breakpoints were supplied.
    Empty,
    /// The value at `index` is not an integer.
    NotANumber { index: usize, value: String },
    /// The value at `index` is zero or negative.
    NonPositive { index: usize, value: i64 },
    /// The value at `index` does not fit in a pixel width.
    OutOfRange { index: usize, value: i64 },
}

impl fmt::Display for BreakpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no breakpoints configured, add at least one width"),
            Self::NotANumber { index, value } => write!(
                f,
                "the breakpoint in index position {index} ({value}) is not a valid number"
            ),
            Self::NonPositive { index, value } => write!(
                f,
                "the breakpoint in index position {index} ({value}) is less than or equal to zero"
            ),
            Self::OutOfRange { index, value } => write!(
                f,
                "the breakpoint in index position {index} ({value}) is too large"
            ),
        }
    }
}

impl Error for BreakpointError {}

/// Errors raised while splitting a stylesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitError {
    /// The breakpoint list was rejected.
    Breakpoints(BreakpointError),
    /// A rule matched no bucket while unmatched rules are rejected.
    UnclassifiedRule { index: usize },
    /// Two stylesheets produced an output file with the same name.
    DuplicateOutput { name: String },
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Breakpoints(err) => write!(f, "invalid breakpoints: {err}"),
            Self::UnclassifiedRule { index } => {
                write!(f, "rule {index} does not match any width bucket")
            }
            Self::DuplicateOutput { name } => {
                write!(f, "more than one stylesheet splits into {name}")
            }
        }
    }
}

impl Error for SplitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Breakpoints(err) => Some(err),
            Self::UnclassifiedRule { .. } | Self::DuplicateOutput { .. } => None,
        }
    }
}

impl From<BreakpointError> for SplitError {
    fn from(err: BreakpointError) -> Self {
        Self::Breakpoints(err)
    }
}
