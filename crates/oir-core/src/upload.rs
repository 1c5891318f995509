//! Upload gate applied before a file is attached to a union's records

use crate::error::UploadError;
use oir_model::catalog::format_megabytes;
use oir_model::{FileType, UploadPolicy};
use serde::Serialize;

/// File that passed [`validate_upload`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedUpload {
    pub file_name: String,
    /// Size in megabytes with one decimal, e.g. `"2.0 MB"`
    pub file_size_display: String,
    /// Upper-case extension, e.g. `"PDF"`
    pub file_type_upper: String,
    #[serde(skip)]
    pub file_type: FileType,
    #[serde(skip)]
    pub size_bytes: u64,
}

/// Accepted extensions, comma separated
#[must_use]
pub fn accepted_extensions() -> String {
    FileType::ALL
        .iter()
        .map(|t| t.extension())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a selected file's extension and size
///
/// The extension is whatever follows the last dot, compared without regard
/// to case. A name without a dot has no extension and is rejected.
pub fn validate_upload(
    file_name: &str,
    size_bytes: u64,
    policy: &UploadPolicy,
) -> Result<ValidatedUpload, UploadError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let file_type = FileType::ALL
        .iter()
        .copied()
        .find(|t| t.extension() == extension)
        .ok_or_else(|| UploadError::InvalidFileType {
            extension: extension.clone(),
            accepted: accepted_extensions(),
        })?;

    if !policy.within_limit(size_bytes) {
        return Err(UploadError::FileTooLarge {
            size: format_megabytes(size_bytes),
            max_mb: policy.max_mb(),
        });
    }

    Ok(ValidatedUpload {
        file_name: file_name.to_string(),
        file_size_display: format_megabytes(size_bytes),
        file_type_upper: extension.to_ascii_uppercase(),
        file_type,
        size_bytes,
    })
}
