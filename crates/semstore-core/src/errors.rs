use thiserror::Error;

use crate::model::VersionStatus;

/// Result type alias using SemStoreError
pub type Result<T> = std::result::Result<T, SemStoreError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (and the UI layer that
/// translates failures into messages) can match on without parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup / lifecycle
    NotFound,
    InvalidTransition,

    // Validation
    InvalidInput,
    /// A working copy failed the advisory completeness checks
    ValidationFailure,
    /// A ledger state breaks one of the version invariants
    InvariantViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidTransition => "ERR_INVALID_TRANSITION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::ValidationFailure => "ERR_VALIDATION_FAILURE",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, entity) for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (version id, record key, ...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for version store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemStoreError {
    /// No version with this id exists in the ledger
    #[error("Version not found: {version_id}")]
    VersionNotFound { version_id: String },

    /// The operation is not allowed from the version's current lifecycle state
    #[error("Cannot {action} version {version_id} while it is {state}")]
    InvalidTransition {
        version_id: String,
        action: &'static str,
        state: TransitionState,
    },

    /// Working copy failed the completeness checks run before publishing
    #[error("Working copy failed validation (score {score}): {}", .issues.join("; "))]
    ValidationFailed { score: u8, issues: Vec<String> },

    /// A ledger state would break a version invariant
    #[error("Version invariant violated: {details}")]
    InvariantViolation { details: String },

    /// JSON (de)serialization of the persisted record failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Failure reported by the durable record store
    #[error("Storage failure: {0}")]
    Storage(#[from] ExError),
}

/// Lifecycle position reported by [`SemStoreError::InvalidTransition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Status(VersionStatus),
    Active,
}

impl std::fmt::Display for TransitionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionState::Status(status) => write!(f, "{}", status),
            TransitionState::Active => f.write_str("active"),
        }
    }
}

impl SemStoreError {
    /// Stable kind of this error, as exposed by the canonical facility
    pub fn kind(&self) -> ExErrorKind {
        match self {
            SemStoreError::VersionNotFound { .. } => ExErrorKind::NotFound,
            SemStoreError::InvalidTransition { .. } => ExErrorKind::InvalidTransition,
            SemStoreError::ValidationFailed { .. } => ExErrorKind::ValidationFailure,
            SemStoreError::InvariantViolation { .. } => ExErrorKind::InvariantViolation,
            SemStoreError::Serialization { .. } => ExErrorKind::Serialization,
            SemStoreError::Configuration { .. } => ExErrorKind::InvalidInput,
            SemStoreError::Storage(inner) => inner.kind(),
        }
    }

    pub(crate) fn not_found(version_id: &str) -> Self {
        SemStoreError::VersionNotFound {
            version_id: version_id.to_string(),
        }
    }
}

/// Conversion from SemStoreError to ExError
///
/// Engine boundary logging and external callers consume the canonical form.
impl From<SemStoreError> for ExError {
    fn from(err: SemStoreError) -> Self {
        match err {
            SemStoreError::VersionNotFound { version_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(version_id)
                .with_message("Version not found"),

            SemStoreError::InvalidTransition {
                version_id,
                action,
                state,
            } => ExError::new(ExErrorKind::InvalidTransition)
                .with_entity_id(version_id)
                .with_op(action)
                .with_message(format!("not allowed while {}", state)),

            SemStoreError::ValidationFailed { score, issues } => {
                ExError::new(ExErrorKind::ValidationFailure).with_message(format!(
                    "score {}: {}",
                    score,
                    issues.join("; ")
                ))
            }

            SemStoreError::InvariantViolation { details } => {
                ExError::new(ExErrorKind::InvariantViolation).with_message(details)
            }

            SemStoreError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            SemStoreError::Configuration { message } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("load_config")
                    .with_message(message)
            }

            SemStoreError::Storage(inner) => inner,
        }
    }
}

/// Conversion from serde_json::Error to SemStoreError
impl From<serde_json::Error> for SemStoreError {
    fn from(err: serde_json::Error) -> Self {
        SemStoreError::Serialization {
            message: err.to_string(),
        }
    }
}
