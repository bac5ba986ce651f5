// Intake failure taxonomy.
//
// Every way an analysis attempt can fail ends up as one of these variants.
// The Display text is the exact message shown to the user, so the rendering
// layer never has to look at raw transport errors.

use thiserror::Error;

/// Coarse grouping of failures by where they happened and how to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected before any network activity; re-select a file.
    ClientValidation,
    /// Backend unreachable or the request did not finish; retry.
    TransportFailure,
    /// Backend answered with a non-2xx status; retry or pick another file.
    ServerRejected,
    /// Backend answered 2xx with a body that does not match the contract.
    ResponseMalformed,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCategory::ClientValidation => "client-validation",
            ErrorCategory::TransportFailure => "transport",
            ErrorCategory::ServerRejected => "server-rejected",
            ErrorCategory::ResponseMalformed => "response-malformed",
        };
        f.write_str(s)
    }
}

/// Fine-grained kind of an [`IntakeError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileTooLarge,
    UnsupportedType,
    Unreachable,
    ServerRejected,
    MalformedResponse,
    Unexpected,
}

/// A failed analysis attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntakeError {
    // ------------------------ Client validation -----------------------------
    #[error("File size exceeds 50MB limit")]
    FileTooLarge { size: u64 },

    #[error("Unsupported file type. Please upload .exe, .zip, .txt, .bin, or .dll files")]
    UnsupportedType { extension: Option<String> },

    // ---------------------------- Transport ---------------------------------
    #[error("Unable to connect to server. Please ensure the backend is running.")]
    Unreachable,

    #[error("An unexpected error occurred")]
    Unexpected { detail: String },

    // ----------------------------- Backend ----------------------------------
    #[error("{}", .message.as_deref().unwrap_or("Server error occurred"))]
    ServerRejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Malformed server response")]
    MalformedResponse { reason: String },
}

impl IntakeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IntakeError::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            IntakeError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            IntakeError::Unreachable => ErrorKind::Unreachable,
            IntakeError::Unexpected { .. } => ErrorKind::Unexpected,
            IntakeError::ServerRejected { .. } => ErrorKind::ServerRejected,
            IntakeError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        use IntakeError::*;
        match self {
            FileTooLarge { .. } | UnsupportedType { .. } => ErrorCategory::ClientValidation,
            Unreachable | Unexpected { .. } => ErrorCategory::TransportFailure,
            ServerRejected { .. } => ErrorCategory::ServerRejected,
            MalformedResponse { .. } => ErrorCategory::ResponseMalformed,
        }
    }

    /// Whether trying the same file again could succeed.
    pub fn is_retryable(&self) -> bool {
        self.category() != ErrorCategory::ResponseMalformed
    }

    /// The human-readable message shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn server_rejected(status: u16, message: Option<String>) -> Self {
        // An empty server message is as good as none.
        let message = message.filter(|m| !m.trim().is_empty());
        Self::ServerRejected { status, message }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected {
            detail: detail.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}
