// ABOUTME: Error taxonomy for loading and parsing netrc credential files
// ABOUTME: Messages carry paths and keyword names only, never credential values

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NetrcError {
    #[error("netrc file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("netrc file is not readable: {}", .0.display())]
    Unreadable(PathBuf),

    #[error("failed to read netrc file: {0}")]
    Io(#[from] std::io::Error),

    #[error("no machine entry found")]
    MachineNotFound,

    #[error("missing value for token: {0}")]
    MissingValueForToken(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = NetrcError::FileNotFound(PathBuf::from("/tmp/.netrc"));
        assert_eq!(err.to_string(), "netrc file not found: /tmp/.netrc");

        let err = NetrcError::MissingValueForToken("password".to_string());
        assert_eq!(err.to_string(), "missing value for token: password");
    }
}
