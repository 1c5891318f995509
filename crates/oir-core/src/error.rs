//! Error types for the registry services
//!
//! One enum per concern:
//! - [`RegistryError`]: repository and registry invariants
//! - [`DraftError`]: form drafts rejected before they join a batch
//! - [`SubmitError`]: batch submission refused or failed
//! - [`UploadError`]: upload validation and document storage
//! - [`UserError`]: account validation and authentication

use oir_model::{ModelError, UnionCode};

/// Registry and repository failures
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No record with this key
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// A record with this key already exists
    #[error("{kind} already exists: {key}")]
    Duplicate { kind: &'static str, key: String },

    /// Record refers to a union that is not registered
    #[error("no union registered under {0}")]
    UnknownUnion(UnionCode),

    /// Every code from IO-100 to IO-999 is taken
    #[error("union code space exhausted")]
    CodeSpaceExhausted,

    /// Calendar date that does not exist
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Draft failed validation
    #[error("invalid draft: {0}")]
    InvalidDraft(#[from] DraftError),

    /// Model value failed to parse
    #[error("invalid value: {0}")]
    Model(#[from] ModelError),
}

impl RegistryError {
    #[inline]
    pub(crate) fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}

/// Draft rejected by the batch flow
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// Required fields left empty, in form order
    #[error("please fill all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The batch is being submitted or showing success
    #[error("batch is locked while a submission is in progress")]
    BatchLocked,
}

/// Batch submission refused or failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("please add at least one record before submitting")]
    EmptyBatch,

    /// A submission is already running or its success is on display
    #[error("a submission is already in flight")]
    InFlight,

    /// The remote side refused the batch
    #[error("submission failed: {0}")]
    Failed(String),
}

impl From<RegistryError> for SubmitError {
    fn from(err: RegistryError) -> Self {
        Self::Failed(err.to_string())
    }
}

/// Upload validation and storage failures
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Extension outside the accepted set
    #[error("invalid file type: {extension} (accepted: {accepted})")]
    InvalidFileType { extension: String, accepted: String },

    /// File exceeds the upload limit
    #[error("file too large: {size} (max {max_mb}MB)")]
    FileTooLarge { size: String, max_mb: u64 },

    /// Folder code outside the catalog
    #[error("unknown folder: {0}")]
    UnknownFolder(String),

    /// Reference would escape its folder
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// File content is not valid base64
    #[error("invalid file encoding: {0}")]
    Encoding(String),

    /// No stored document at this path
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata serialization error: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Account failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    /// Every violated constraint, one message each
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("email already registered: {0}")]
    EmailTaken(String),

    /// Unknown email or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account inactive")]
    Inactive,

    /// Stored hash is not in a recognised format
    #[error("malformed credential")]
    MalformedCredential,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl UserError {
    /// Messages suitable for a client-facing `details` list
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::Validation(issues) => issues.clone(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_listed_in_order() {
        let err = DraftError::MissingFields(vec!["name", "position"]);
        assert_eq!(err.to_string(), "please fill all required fields: name, position");
    }

    #[test]
    fn validation_details_keep_every_issue() {
        let err = UserError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.details(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(UserError::EmailTaken("x@y.pg".into()).details().len(), 1);
    }
}
