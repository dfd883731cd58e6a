//! Blocking unary RPC client.
//!
//! [`BlockingClient`] issues one unary call at a time with synchronous
//! semantics over an internally asynchronous transport. Callers can
//! pattern-match the [`CallResult`] to get exactly one of: the
//! response payload, a structured application error, or a
//! transport-fault indicator.

pub mod driver;
pub mod transport;

pub use driver::{BlockingClient, CallError, CallResult};
pub use transport::TransportFault;

// Re-export the wire types callers branch on.
pub use rpc_wire_types::{DetailValue, ErrorDetail, ErrorValue, StatusCode};
