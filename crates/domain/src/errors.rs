//! Error types for record construction and normalization.

use thiserror::Error;

/// Why a single raw record could not be normalized.
///
/// These are per-record failures: the normalizer logs and skips the record,
/// it never aborts the whole batch for one of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Neither `id` nor `_id` was present. IDs are never synthesized
    /// client-side, so the record is unusable.
    #[error("record has neither 'id' nor '_id'")]
    MissingId,

    /// The required email field was absent or empty.
    #[error("record {id} has no email")]
    MissingEmail {
        /// The id of the offending record.
        id: String,
    },

    /// The element was not a JSON object.
    #[error("record is not an object (found {found})")]
    NotAnObject {
        /// JSON type name that was found instead.
        found: &'static str,
    },

    /// The object was present but could not be decoded into the raw shape.
    #[error("record could not be decoded: {detail}")]
    Malformed {
        /// Decoder error detail.
        detail: String,
    },
}

impl RecordError {
    /// Stable error code for logging and diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingId => "RECORD_MISSING_ID",
            Self::MissingEmail { .. } => "RECORD_MISSING_EMAIL",
            Self::NotAnObject { .. } => "RECORD_NOT_OBJECT",
            Self::Malformed { .. } => "RECORD_MALFORMED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RecordError::MissingId.error_code(), "RECORD_MISSING_ID");
        assert_eq!(
            RecordError::MissingEmail { id: "u1".into() }.error_code(),
            "RECORD_MISSING_EMAIL"
        );
        assert_eq!(
            RecordError::NotAnObject { found: "string" }.error_code(),
            "RECORD_NOT_OBJECT"
        );
    }

    #[test]
    fn test_display() {
        let err = RecordError::MissingEmail { id: "u7".into() };
        assert_eq!(err.to_string(), "record u7 has no email");
    }
}
