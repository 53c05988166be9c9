//! Error types shared across the core

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::paths::ADR_DIR_NAME;

pub type Result<T> = std::result::Result<T, AdrError>;

#[derive(Debug, Error)]
pub enum AdrError {
    /// No marker directory above the starting directory
    #[error("no {} directory found in {} or any parent directory", ADR_DIR_NAME, .0.display())]
    RootPathNotFound(PathBuf),

    /// A user-specified template path does not exist
    #[error("template file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("bundled template not found: {0}")]
    ResourceNotFound(String),

    #[error("malformed link '{spec}': {reason}")]
    MalformedLink { spec: String, reason: &'static str },

    #[error("invalid record: {0}")]
    Validation(String),

    #[error("directory {} is already initialised for ADRs", .0.display())]
    AlreadyInitialised(PathBuf),

    #[error("invalid configuration in {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialise configuration")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("template archive {}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AdrError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        AdrError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        AdrError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_errors_keep_their_cause() {
        let err = AdrError::io(
            "read",
            "/tmp/x.md",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to read /tmp/x.md");
        assert_eq!(err.source().map(|s| s.to_string()), Some("denied".into()));
    }

    #[test]
    fn root_not_found_names_the_marker() {
        let err = AdrError::RootPathNotFound(PathBuf::from("/home/me"));
        assert!(err.to_string().contains(".adr"));
        assert!(err.to_string().contains("/home/me"));
    }
}
