//! Error types for the record model

/// Parse and lookup failures for model values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Identifier is not a valid ULID
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Union code does not match `IO-###`
    #[error("invalid union code: {0} (expected IO-100..IO-999)")]
    InvalidUnionCode(String),

    /// Industry outside the catalog
    #[error("unknown industry: {0}")]
    UnknownIndustry(String),

    /// Province outside the catalog
    #[error("unknown province: {0}")]
    UnknownProvince(String),

    /// Folder code outside the catalog
    #[error("unknown folder code: {0}")]
    UnknownFolder(String),

    /// File extension not accepted for upload
    #[error("unsupported file type: {0}")]
    UnknownFileType(String),

    /// Value outside a closed enumeration
    #[error("unknown {kind}: {value}")]
    UnknownVariant {
        /// Enumeration name
        kind: &'static str,
        /// Rejected input
        value: String,
    },
}

impl ModelError {
    #[inline]
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_rejected_value() {
        let err = ModelError::UnknownFolder("minutes".to_string());
        assert_eq!(err.to_string(), "unknown folder code: minutes");

        let err = ModelError::unknown("priority", "urgent");
        assert_eq!(err.to_string(), "unknown priority: urgent");
    }
}
