use core::fmt;

/// Inputs rejected before a sweep is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    EmptyImage { width: usize, height: usize },
    InvalidOptions(&'static str),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage { width, height } => {
                write!(f, "image must be non-empty, got {width}x{height}")
            }
            Self::InvalidOptions(reason) => write!(f, "invalid segment options: {reason}"),
        }
    }
}

impl std::error::Error for TraceError {}
