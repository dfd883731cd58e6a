use std::fmt;

use crate::status::StatusCode;

/// Structured, cross-boundary representation of an application-level
/// failure raised by a service handler.
///
/// Travels the wire as a terminal status (see [`crate::codec`]) and is
/// reconstructed on the calling side with category, originating
/// service, message, and details intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorValue {
    /// Error category; always one of the registered status codes.
    pub code: StatusCode,
    /// Qualifier identifying the originating service or operation.
    pub service: String,
    /// Human-readable message, copied verbatim across the wire.
    pub message: String,
    /// Open-ended detail entries, order-preserving.
    pub details: Vec<ErrorDetail>,
}

/// A single detail entry attached to an [`ErrorValue`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDetail {
    pub key: String,
    pub value: DetailValue,
}

/// Detail values are either text or raw bytes. Modeled explicitly so
/// that encode/decode stays total and deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailValue {
    Text(String),
    Binary(Vec<u8>),
}

impl ErrorValue {
    /// Create a new error value with the given category.
    pub fn new(code: StatusCode, service: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorValue {
            code,
            service: service.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Attach a text detail entry, preserving insertion order.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push(ErrorDetail {
            key: key.into(),
            value: DetailValue::Text(value.into()),
        });
        self
    }

    /// Attach a binary detail entry, preserving insertion order.
    pub fn with_binary_detail(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.details.push(ErrorDetail {
            key: key.into(),
            value: DetailValue::Binary(value.into()),
        });
        self
    }

    /// Look up the first detail entry with the given key.
    pub fn detail(&self, key: &str) -> Option<&DetailValue> {
        self.details
            .iter()
            .find(|d| d.key == key)
            .map(|d| &d.value)
    }
}

// Convenience constructors for the common categories.

impl ErrorValue {
    /// Create a Cancelled error.
    pub fn cancelled(service: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorValue::new(StatusCode::Cancelled, service, message)
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(service: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorValue::new(StatusCode::InvalidArgument, service, message)
    }

    /// Create a NotFound error.
    pub fn not_found(service: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorValue::new(StatusCode::NotFound, service, message)
    }

    /// Create a DeadlineExceeded error.
    pub fn deadline_exceeded(service: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorValue::new(StatusCode::DeadlineExceeded, service, message)
    }

    /// Create an Unimplemented error.
    pub fn unimplemented(service: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorValue::new(StatusCode::Unimplemented, service, message)
    }

    /// Create an Internal error.
    pub fn internal(service: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorValue::new(StatusCode::Internal, service, message)
    }

    /// Create an Unavailable error.
    pub fn unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorValue::new(StatusCode::Unavailable, service, message)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.service.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "{}: {} - {}", self.code, self.service, self.message)
        }
    }
}

impl std::error::Error for ErrorValue {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        let err = ErrorValue::internal("Testing", "Details");
        assert_eq!(err.code, StatusCode::Internal);
        assert_eq!(err.service, "Testing");
        assert_eq!(err.message, "Details");
        assert!(err.details.is_empty());
    }

    #[test]
    fn details_preserve_order() {
        let err = ErrorValue::invalid_argument("Orders", "bad field")
            .with_detail("field", "amount")
            .with_binary_detail("raw", vec![0xde, 0xad])
            .with_detail("hint", "must be positive");

        assert_eq!(err.details.len(), 3);
        assert_eq!(err.details[0].key, "field");
        assert_eq!(err.details[1].key, "raw");
        assert_eq!(err.details[2].key, "hint");
        assert_eq!(
            err.detail("raw"),
            Some(&DetailValue::Binary(vec![0xde, 0xad]))
        );
        assert_eq!(err.detail("missing"), None);
    }

    #[test]
    fn display_carries_service_and_message() {
        let err = ErrorValue::internal("Testing", "Details");
        let s = format!("{err}");
        assert!(s.contains("internal error"));
        assert!(s.contains("Testing"));
        assert!(s.contains("Details"));

        let bare = ErrorValue::new(StatusCode::Unknown, "", "mystery");
        assert_eq!(format!("{bare}"), "unknown error (2): mystery");
    }

    #[test]
    fn convenience_constructors() {
        assert_eq!(ErrorValue::cancelled("s", "m").code, StatusCode::Cancelled);
        assert_eq!(
            ErrorValue::invalid_argument("s", "m").code,
            StatusCode::InvalidArgument
        );
        assert_eq!(ErrorValue::not_found("s", "m").code, StatusCode::NotFound);
        assert_eq!(
            ErrorValue::deadline_exceeded("s", "m").code,
            StatusCode::DeadlineExceeded
        );
        assert_eq!(
            ErrorValue::unimplemented("s", "m").code,
            StatusCode::Unimplemented
        );
        assert_eq!(ErrorValue::internal("s", "m").code, StatusCode::Internal);
        assert_eq!(
            ErrorValue::unavailable("s", "m").code,
            StatusCode::Unavailable
        );
    }
}
