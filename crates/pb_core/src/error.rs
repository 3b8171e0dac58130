use thiserror::Error;

/// Failures that abort an export.
///
/// Missing optional data (email, address, sources, contact points) is never
/// one of these; it becomes an empty CSV field.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid document {id}: {reason}")]
    InvalidDocument { id: String, reason: String },

    #[error("Output error: {0}")]
    Output(String),
}

/// Classification of errors for logging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid or missing configuration.
    ConfigError,
    /// The document store could not be read, or a record was malformed.
    DataError,
    /// Writing the CSV document failed (closed pipe, full disk).
    OutputError,
}

impl ExportError {
    /// Returns the broad error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::ConfigError,
            Self::Storage(_) | Self::InvalidDocument { .. } => ErrorCategory::DataError,
            Self::Output(_) => ErrorCategory::OutputError,
        }
    }

    /// Returns a message suitable for the terminal.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration issue: {msg}. Edit ~/.publicbodies/config.json.")
            }
            Self::Storage(msg) => format!("Could not read the document store: {msg}"),
            Self::InvalidDocument { id, reason } => {
                format!("Organization {id} could not be read: {reason}")
            }
            Self::Output(msg) => format!("Export incomplete, output failed: {msg}"),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::ConfigError => 78,
            ErrorCategory::DataError => 65,
            ErrorCategory::OutputError => 74,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(
            ExportError::Config("x".into()).category(),
            ErrorCategory::ConfigError
        );
        assert_eq!(
            ExportError::Storage("x".into()).category(),
            ErrorCategory::DataError
        );
        assert_eq!(
            ExportError::InvalidDocument {
                id: "a".into(),
                reason: "b".into()
            }
            .category(),
            ErrorCategory::DataError
        );
        assert_eq!(
            ExportError::Output("x".into()).category(),
            ErrorCategory::OutputError
        );
    }

    #[test]
    fn display_includes_document_id() {
        let err = ExportError::InvalidDocument {
            id: "org-1".into(),
            reason: "missing field `_id`".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid document org-1: missing field `_id`"
        );
        assert!(err.user_message().contains("org-1"));
    }

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            ExportError::Config(String::new()).exit_code(),
            ExportError::Storage(String::new()).exit_code(),
            ExportError::Output(String::new()).exit_code(),
        ];
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }
}
