use std::error::Error;
use std::fmt;

use crate::cleanup::CleanupStep;
use crate::setup::SetupStep;

pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    NotFound,
    AlreadyExists,
    Other,
}

/// A failed call against one of the external services, classified so that
/// callers can tolerate specific kinds without swallowing everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    operation: &'static str,
    kind: ServiceErrorKind,
    message: String,
}

impl ServiceError {
    pub fn new(
        operation: &'static str,
        kind: ServiceErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(operation, ServiceErrorKind::NotFound, message)
    }

    pub fn already_exists(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(operation, ServiceErrorKind::AlreadyExists, message)
    }

    pub fn other(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(operation, ServiceErrorKind::Other, message)
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn kind(&self) -> ServiceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ServiceErrorKind::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind == ServiceErrorKind::AlreadyExists
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.message)
    }
}

impl Error for ServiceError {}

#[derive(Debug)]
pub enum CleanupError {
    Identity { source: ServiceError },
    Prompt { source: std::io::Error },
    Cancelled,
    Step { step: CleanupStep, source: ServiceError },
}

impl CleanupError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CleanupError::Identity { .. } => "IDENTITY_UNAVAILABLE",
            CleanupError::Prompt { .. } => "PROMPT_FAILED",
            CleanupError::Cancelled => "CLEANUP_CANCELLED",
            CleanupError::Step { .. } => "CLEANUP_STEP_FAILED",
        }
    }

    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }

    pub fn is_user_error(&self) -> bool {
        matches!(self, CleanupError::Cancelled)
    }
}

impl fmt::Display for CleanupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupError::Identity { source } => {
                write!(f, "Could not resolve AWS account id: {source}")
            }
            CleanupError::Prompt { source } => {
                write!(f, "Could not read confirmation: {source}")
            }
            CleanupError::Cancelled => f.write_str("Cleanup cancelled"),
            CleanupError::Step { step, source } => {
                write!(f, "Deleting {} failed: {source}", step.label())
            }
        }
    }
}

impl Error for CleanupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CleanupError::Identity { source } | CleanupError::Step { source, .. } => Some(source),
            CleanupError::Prompt { source } => Some(source),
            CleanupError::Cancelled => None,
        }
    }
}

#[derive(Debug)]
pub enum SetupError {
    Identity { source: ServiceError },
    Step { step: SetupStep, source: ServiceError },
}

impl SetupError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SetupError::Identity { .. } => "IDENTITY_UNAVAILABLE",
            SetupError::Step { .. } => "SETUP_STEP_FAILED",
        }
    }

    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Identity { source } => {
                write!(f, "Could not resolve AWS account id: {source}")
            }
            SetupError::Step { step, source } => {
                write!(f, "{} failed: {source}", step.label())
            }
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SetupError::Identity { source } | SetupError::Step { source, .. } => Some(source),
        }
    }
}
