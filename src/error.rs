use std::path::PathBuf;

/// Every error strsearch can produce. Displayed as user-facing messages.
#[derive(Debug)]
pub enum SearchError {
    /// Patterns must contain at least one symbol.
    EmptyPattern,
    NotFound {
        path: PathBuf,
    },
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Strict decoding hit invalid UTF-8 at `offset` (bytes from start of file).
    DecodeError {
        path: PathBuf,
        offset: usize,
    },
    InvalidArgument {
        name: String,
        reason: String,
    },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "pattern must not be empty"),
            Self::NotFound { path } => write!(f, "not found: {}", path.display()),
            Self::IoError { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Self::DecodeError { path, offset } => {
                write!(
                    f,
                    "{}: invalid UTF-8 at byte {offset} (use --lossy to skip invalid bytes)",
                    path.display()
                )
            }
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid {name}: {reason}")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl SearchError {
    /// Process exit code for the CLI.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } | Self::IoError { .. } => 2,
            Self::EmptyPattern | Self::InvalidArgument { .. } | Self::DecodeError { .. } => 3,
        }
    }
}
