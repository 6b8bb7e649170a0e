#![forbid(unsafe_code)]

//! Layout errors.

/// Errors from solving an accent layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A shape or start column outside its valid range.
    InvalidArgument(String),
}

impl LayoutError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for LayoutError {}
