//! Wire frame messages, hand-written in prost form.
//!
//! A unary call exchanges at most three frames: one request, at most
//! one response payload, and exactly one terminal status closing the
//! call.

/// Opens a unary call: routing key plus the request payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequestFrame {
    #[prost(string, tag = "1")]
    pub service: String,
    #[prost(string, tag = "2")]
    pub method: String,
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

/// The response payload preceding an OK terminal status.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseFrame {
    #[prost(bytes = "vec", tag = "1")]
    pub payload: Vec<u8>,
}

/// Wire-ready terminal status: code, message, and ordered metadata.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OutgoingStatus {
    #[prost(uint32, tag = "1")]
    pub code: u32,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub metadata: Vec<MetadataEntry>,
}

/// One metadata entry: string key, byte-sequence value.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MetadataEntry {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

/// Envelope for everything that crosses the connection.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Frame {
    #[prost(oneof = "frame_body::Body", tags = "1, 2, 3")]
    pub body: Option<frame_body::Body>,
}

pub mod frame_body {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Body {
        #[prost(message, tag = "1")]
        Request(super::RequestFrame),
        #[prost(message, tag = "2")]
        Response(super::ResponseFrame),
        #[prost(message, tag = "3")]
        Trailer(super::OutgoingStatus),
    }
}

impl Frame {
    pub fn request(service: impl Into<String>, method: impl Into<String>, payload: Vec<u8>) -> Self {
        Frame {
            body: Some(frame_body::Body::Request(RequestFrame {
                service: service.into(),
                method: method.into(),
                payload,
            })),
        }
    }

    pub fn response(payload: Vec<u8>) -> Self {
        Frame {
            body: Some(frame_body::Body::Response(ResponseFrame { payload })),
        }
    }

    pub fn trailer(status: OutgoingStatus) -> Self {
        Frame {
            body: Some(frame_body::Body::Trailer(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn request_frame_roundtrip() {
        let frame = Frame::request("Testing", "testErrorResponse", b"WSO2".to_vec());
        let bytes = frame.encode_to_vec();
        let decoded = Frame::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn trailer_frame_roundtrip() {
        let status = OutgoingStatus {
            code: 13,
            message: "Details".into(),
            metadata: vec![MetadataEntry {
                key: "err-service".into(),
                value: b"Testing".to_vec(),
            }],
        };
        let frame = Frame::trailer(status.clone());
        let bytes = frame.encode_to_vec();
        let decoded = Frame::decode(bytes.as_slice()).unwrap();
        match decoded.body {
            Some(frame_body::Body::Trailer(s)) => assert_eq!(s, status),
            other => panic!("expected trailer, got {other:?}"),
        }
    }

    #[test]
    fn empty_frame_decodes_to_no_body() {
        let decoded = Frame::decode(&[][..]).unwrap();
        assert_eq!(decoded.body, None);
    }
}
