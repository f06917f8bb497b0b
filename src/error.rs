//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the dupsweep binary.
///
/// - 0: Success (duplicates found, all requested deletions succeeded)
/// - 1: General error (unexpected failure)
/// - 2: No duplicates found
/// - 3: Partial success (some deletions failed)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Duplicates were found and every requested deletion succeeded.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// The compare folder holds no duplicates.
    NoDuplicates = 2,
    /// At least one deletion failed.
    PartialSuccess = 3,
    /// Interrupted by Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::NoDuplicates => "DS002",
            Self::PartialSuccess => "DS003",
            Self::Interrupted => "DS130",
        }
    }

    /// Map a top-level error to its exit code.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let interrupted = err
            .downcast_ref::<crate::scanner::ScanError>()
            .is_some_and(|e| matches!(e, crate::scanner::ScanError::Interrupted));
        if interrupted {
            Self::Interrupted
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for `--json-errors`.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}
