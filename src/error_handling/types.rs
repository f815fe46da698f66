use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    NotInRange(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::NotInRange(e) => write!(f, "Value out of range: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

/// Failures of the external dashboard-session state (the session directory).
///
/// These are transient from the reaper's point of view: a failed cycle is
/// logged and the affected sessions are re-evaluated on the next cycle.
#[derive(Debug, PartialEq, Eq)]
pub enum DirectoryError {
    ConnectionFailed,
    ReadFailed,
    WriteFailed,
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::ConnectionFailed => write!(f, "Session directory connection failed"),
            DirectoryError::ReadFailed => write!(f, "Session directory read failed"),
            DirectoryError::WriteFailed => write!(f, "Session directory write failed"),
        }
    }
}

impl std::error::Error for DirectoryError {}

#[derive(Debug)]
pub enum ReviewError {
    SubmissionNotFound,
    DirectoryError(DirectoryError),
}

impl fmt::Display for ReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewError::SubmissionNotFound => write!(f, "Submission not found"),
            ReviewError::DirectoryError(e) => write!(f, "Directory error: {}", e),
        }
    }
}

impl std::error::Error for ReviewError {}

impl From<DirectoryError> for ReviewError {
    fn from(err: DirectoryError) -> Self {
        ReviewError::DirectoryError(err)
    }
}
