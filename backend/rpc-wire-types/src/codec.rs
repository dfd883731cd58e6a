//! Status codec: converts an [`ErrorValue`] to and from the wire
//! terminal-status representation.
//!
//! Application-error data rides in metadata entries under the reserved
//! `err-` key prefix so it never collides with transport-level
//! metadata. Both directions are pure and deterministic; decode is
//! total and never fails.

use crate::error_value::{DetailValue, ErrorDetail, ErrorValue};
use crate::frame::{MetadataEntry, OutgoingStatus};
use crate::status::StatusCode;

/// Metadata key carrying the originating-service qualifier.
pub const SERVICE_KEY: &str = "err-service";
/// Key prefix for text detail entries.
pub const DETAIL_TEXT_PREFIX: &str = "err-detail-text-";
/// Key prefix for binary detail entries.
pub const DETAIL_BIN_PREFIX: &str = "err-detail-bin-";

/// Encode an error value into a wire-ready terminal status.
pub fn encode(err: &ErrorValue) -> OutgoingStatus {
    let mut metadata = Vec::with_capacity(err.details.len() + 1);
    if !err.service.is_empty() {
        metadata.push(MetadataEntry {
            key: SERVICE_KEY.to_owned(),
            value: err.service.clone().into_bytes(),
        });
    }
    for detail in &err.details {
        let entry = match &detail.value {
            DetailValue::Text(text) => MetadataEntry {
                key: format!("{DETAIL_TEXT_PREFIX}{}", detail.key),
                value: text.clone().into_bytes(),
            },
            DetailValue::Binary(bytes) => MetadataEntry {
                key: format!("{DETAIL_BIN_PREFIX}{}", detail.key),
                value: bytes.clone(),
            },
        };
        metadata.push(entry);
    }
    OutgoingStatus {
        code: err.code.wire_value(),
        message: err.message.clone(),
        metadata,
    }
}

/// Decode a terminal status back into an error value.
///
/// Total by construction: unknown wire codes resolve to
/// [`StatusCode::Unknown`], a missing service qualifier becomes the
/// empty string, metadata entries outside the reserved prefixes are
/// dropped (they belong to the transport layer), and a text detail
/// whose bytes are not valid UTF-8 is preserved as binary rather than
/// failing.
pub fn decode(status: &OutgoingStatus) -> ErrorValue {
    let mut service = String::new();
    let mut details = Vec::new();

    for entry in &status.metadata {
        if entry.key == SERVICE_KEY {
            if let Ok(s) = String::from_utf8(entry.value.clone()) {
                service = s;
            }
        } else if let Some(key) = entry.key.strip_prefix(DETAIL_TEXT_PREFIX) {
            let value = match String::from_utf8(entry.value.clone()) {
                Ok(text) => DetailValue::Text(text),
                Err(e) => DetailValue::Binary(e.into_bytes()),
            };
            details.push(ErrorDetail {
                key: key.to_owned(),
                value,
            });
        } else if let Some(key) = entry.key.strip_prefix(DETAIL_BIN_PREFIX) {
            details.push(ErrorDetail {
                key: key.to_owned(),
                value: DetailValue::Binary(entry.value.clone()),
            });
        }
        // Anything else is transport metadata, not ours.
    }

    ErrorValue {
        code: StatusCode::from_wire(status.code),
        service,
        message: status.message.clone(),
        details,
    }
}

/// Terminal status for a successful call.
pub fn ok_status() -> OutgoingStatus {
    OutgoingStatus {
        code: StatusCode::Ok.wire_value(),
        message: String::new(),
        metadata: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_preserves_everything() {
        let err = ErrorValue::internal("Testing", "Details")
            .with_detail("attempt", "3")
            .with_binary_detail("trace", vec![0x00, 0xff, 0x7f])
            .with_detail("hint", "retry later");

        assert_eq!(decode(&encode(&err)), err);
    }

    #[test]
    fn roundtrip_with_empty_service_and_message() {
        let err = ErrorValue::new(StatusCode::Unavailable, "", "");
        assert_eq!(decode(&encode(&err)), err);
    }

    #[test]
    fn roundtrip_every_status_code() {
        for wire in 0u32..=16 {
            let err = ErrorValue::new(StatusCode::from_wire(wire), "svc", "msg");
            assert_eq!(decode(&encode(&err)), err);
        }
    }

    #[test]
    fn detail_keys_may_contain_prefix_lookalikes() {
        let err = ErrorValue::internal("svc", "msg")
            .with_detail("err-detail-bin-nested", "still text")
            .with_binary_detail("err-service", vec![1, 2, 3]);
        assert_eq!(decode(&encode(&err)), err);
    }

    #[test]
    fn unknown_wire_code_decodes_to_unknown() {
        let status = OutgoingStatus {
            code: 4242,
            message: "weird".into(),
            metadata: vec![],
        };
        let err = decode(&status);
        assert_eq!(err.code, StatusCode::Unknown);
        assert_eq!(err.message, "weird");
    }

    #[test]
    fn foreign_metadata_is_dropped_from_details() {
        let mut status = encode(&ErrorValue::internal("Testing", "Details"));
        status.metadata.push(MetadataEntry {
            key: "x-request-id".into(),
            value: b"abc123".to_vec(),
        });
        status.metadata.push(MetadataEntry {
            key: "content-type".into(),
            value: b"application/grpc".to_vec(),
        });

        let err = decode(&status);
        assert!(err.details.is_empty());
        assert_eq!(err.service, "Testing");
    }

    #[test]
    fn invalid_utf8_text_detail_survives_as_binary() {
        let status = OutgoingStatus {
            code: StatusCode::Internal.wire_value(),
            message: "msg".into(),
            metadata: vec![MetadataEntry {
                key: format!("{DETAIL_TEXT_PREFIX}garbled"),
                value: vec![0xff, 0xfe],
            }],
        };
        let err = decode(&status);
        assert_eq!(
            err.detail("garbled"),
            Some(&DetailValue::Binary(vec![0xff, 0xfe]))
        );
    }

    #[test]
    fn ok_status_is_ok() {
        let status = ok_status();
        assert_eq!(StatusCode::from_wire(status.code), StatusCode::Ok);
        assert!(status.message.is_empty());
        assert!(status.metadata.is_empty());
    }
}
