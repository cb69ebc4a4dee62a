//! Error types for unlog

use crate::strip::ParseFailure;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using unlog's Error
pub type Result<T> = std::result::Result<T, Error>;

/// unlog error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not parse {path}: {source}. Make sure it has no syntax errors and is a JS/TS file")]
    Parse {
        path: String,
        #[source]
        source: ParseFailure,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Process exit status the CLI reports for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Parse { .. } => 2,
            _ => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let parse = Error::Parse {
            path: "app.ts".to_string(),
            source: ParseFailure::Syntax { line: 1, column: 13 },
        };
        assert_eq!(parse.exit_code(), 2);
        assert!(parse.to_string().contains("line 1, column 13"));

        let missing = Error::FileNotFound {
            path: PathBuf::from("nope.ts"),
        };
        assert_eq!(missing.exit_code(), 3);
    }

    #[test]
    fn test_read_failures_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.exit_code(), 3);
    }
}
