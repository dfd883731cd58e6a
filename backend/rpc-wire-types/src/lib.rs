//! Wire-level types shared by the unary RPC server and client: the
//! status code registry, the structured error value model, the status
//! codec, and the framed transport primitives.

pub mod codec;
pub mod error_value;
pub mod frame;
pub mod framing;
pub mod status;

pub use error_value::{DetailValue, ErrorDetail, ErrorValue};
pub use frame::{Frame, MetadataEntry, OutgoingStatus, RequestFrame, ResponseFrame};
pub use status::StatusCode;
