#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    //Usage
    /// ErrUnexpectedMediaType indicates that a format specific operation was invoked
    /// on SDP parameters of a different media type/encoding name
    #[error("unexpected media type/encoding name: expected {expected}, got {actual}")]
    ErrUnexpectedMediaType { expected: String, actual: String },

    //Format parameters
    #[error("missing format parameter: {0}")]
    ErrMissingFormatParameter(String),
    #[error("invalid format parameter: {name}={value}")]
    ErrInvalidFormatParameter { name: String, value: String },

    //Capabilities
    /// ErrConstraintMismatch indicates that the offered SDP parameters do not satisfy
    /// a receiver capability constraint
    #[error("{0}")]
    ErrConstraintMismatch(ConstraintMismatch),
    #[error("no matching constraint set")]
    ErrNoMatchingConstraintSet,
    #[error("invalid constraint set")]
    ErrInvalidConstraintSet,
    #[error("unexpected format: expected {expected}, got {actual}")]
    ErrUnexpectedFormat { expected: String, actual: String },
    #[error("unsupported media type: {0}")]
    ErrUnsupportedMediaType(String),
    #[error("format already registered: {0}")]
    ErrFormatAlreadyRegistered(String),

    //Resources
    #[error("missing resource field: {0}")]
    ErrMissingResourceField(String),
    #[error("invalid resource field: {0}")]
    ErrInvalidResourceField(String),

    //Third Party Error
    #[error("{0}")]
    Json(#[source] JsonError),
}

impl Error {
    /// Returns true when the error is a caller defect rather than a negotiation outcome.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Error::ErrUnexpectedMediaType { .. })
    }

    pub fn is_malformed_parameter(&self) -> bool {
        matches!(
            self,
            Error::ErrMissingFormatParameter(_) | Error::ErrInvalidFormatParameter { .. }
        )
    }

    pub fn is_constraint_mismatch(&self) -> bool {
        matches!(
            self,
            Error::ErrConstraintMismatch(_) | Error::ErrNoMatchingConstraintSet
        )
    }

    /// The failing capability, if this error is a constraint mismatch.
    pub fn constraint_mismatch(&self) -> Option<&ConstraintMismatch> {
        if let Error::ErrConstraintMismatch(mismatch) = self {
            Some(mismatch)
        } else {
            None
        }
    }
}

/// The first receiver capability that the offered parameters failed to satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintMismatch {
    /// Capability URN, e.g. "urn:x-nmos:cap:format:profile_level_id"
    pub key: String,
    /// The constraint expression as published by the receiver
    pub expected: Value,
    /// The value found in the offered SDP parameters
    pub actual: Value,
}

impl fmt::Display for ConstraintMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "constraint mismatch: {} expected {} actual {}",
            self.key, self.expected, self.actual
        )
    }
}

#[derive(Debug, Error)]
#[error("json error: {0}")]
pub struct JsonError(#[from] pub serde_json::Error);

// Workaround for wanting PartialEq for serde_json::Error.
impl PartialEq for JsonError {
    fn eq(&self, other: &Self) -> bool {
        self.0.classify() == other.0.classify() && self.0.line() == other.0.line()
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(JsonError(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification() {
        let usage = Error::ErrUnexpectedMediaType {
            expected: "video/H264".to_owned(),
            actual: "video/H265".to_owned(),
        };
        assert!(usage.is_usage_error());
        assert!(!usage.is_malformed_parameter());

        let malformed = Error::ErrMissingFormatParameter("profile-id".to_owned());
        assert!(malformed.is_malformed_parameter());
        assert!(!malformed.is_constraint_mismatch());

        let no_match = Error::ErrNoMatchingConstraintSet;
        assert!(no_match.is_constraint_mismatch());
        assert!(no_match.constraint_mismatch().is_none());
        assert!(!Error::ErrInvalidConstraintSet.is_constraint_mismatch());
    }

    #[test]
    fn test_constraint_mismatch_display() {
        let err = Error::ErrConstraintMismatch(ConstraintMismatch {
            key: "urn:x-nmos:cap:format:level_id".to_owned(),
            expected: json!([90, 93]),
            actual: json!(6),
        });

        assert_eq!(
            err.to_string(),
            "constraint mismatch: urn:x-nmos:cap:format:level_id expected [90,93] actual 6"
        );
        assert_eq!(
            err.constraint_mismatch().map(|mismatch| &mismatch.actual),
            Some(&json!(6))
        );
    }

    #[test]
    fn test_json_error() {
        let err: Error = serde_json::from_str::<Value>("{")
            .map_err(Error::from)
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("json error: "));
    }
}
