//! Server error interceptor: wraps handler execution and normalizes
//! every outcome into exactly one of {payload + OK status,
//! no-payload + non-OK status}. A handler failure never escapes as a
//! connection-level fault.

use std::time::Instant;

use rpc_wire_types::{codec, ErrorValue, OutgoingStatus, RequestFrame};
use uuid::Uuid;

use crate::handler::{HandlerError, HandlerRegistry};
use crate::logger;

/// Normalized result of one intercepted call.
#[derive(Debug)]
pub enum CallOutcome {
    /// Response payload followed by an OK terminal status.
    Response {
        payload: Vec<u8>,
        status: OutgoingStatus,
    },
    /// Non-OK terminal status, no payload.
    Status(OutgoingStatus),
}

/// Execute the handler registered for the request and normalize its
/// outcome.
///
/// The handler future runs on its own task so a panic surfaces as a
/// `JoinError` here instead of tearing down the connection task.
pub async fn intercept(registry: &HandlerRegistry, request: RequestFrame) -> CallOutcome {
    let request_id = Uuid::new_v4();
    let started = Instant::now();
    let service = request.service;
    let method = request.method;

    logger::info!(%request_id, %service, %method, "unary call received");

    let Some(handler) = registry.get(&service, &method) else {
        logger::warn!(%request_id, %service, %method, "no handler registered");
        return CallOutcome::Status(codec::encode(&ErrorValue::unimplemented(
            service.clone(),
            format!("method {service}/{method} is not registered"),
        )));
    };

    let outcome = match tokio::spawn(handler(request.payload)).await {
        Ok(Ok(payload)) => CallOutcome::Response {
            payload,
            status: codec::ok_status(),
        },
        Ok(Err(HandlerError::Status(err))) => {
            logger::warn!(%request_id, %service, %method, code = %err.code, "handler returned error");
            CallOutcome::Status(codec::encode(&err))
        }
        Ok(Err(HandlerError::Unexpected(message))) => {
            logger::error!(%request_id, %service, %method, %message, "unhandled handler failure");
            CallOutcome::Status(codec::encode(&ErrorValue::internal(service.clone(), message)))
        }
        Err(join_err) => {
            let message = if join_err.is_panic() {
                format!("handler panicked: {join_err}")
            } else {
                "handler task was cancelled".to_owned()
            };
            logger::error!(%request_id, %service, %method, %message, "handler did not complete");
            CallOutcome::Status(codec::encode(&ErrorValue::internal(service.clone(), message)))
        }
    };

    logger::info!(
        %request_id,
        %service,
        %method,
        duration_ms = %started.elapsed().as_millis(),
        ok = matches!(outcome, CallOutcome::Response { .. }),
        "unary call completed"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpc_wire_types::{Frame, StatusCode};

    fn request(service: &str, method: &str, payload: &[u8]) -> RequestFrame {
        match Frame::request(service, method, payload.to_vec()).body {
            Some(rpc_wire_types::frame::frame_body::Body::Request(req)) => req,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn success_yields_payload_and_ok_status() {
        let mut registry = HandlerRegistry::new();
        registry.register("Echo", "echo", |req| async move { Ok(req) });

        match intercept(&registry, request("Echo", "echo", b"hi")).await {
            CallOutcome::Response { payload, status } => {
                assert_eq!(payload, b"hi");
                assert_eq!(StatusCode::from_wire(status.code), StatusCode::Ok);
            }
            other => panic!("expected response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_value_is_encoded_into_the_status() {
        let mut registry = HandlerRegistry::new();
        registry.register("Testing", "testErrorResponse", |_| async {
            Err(ErrorValue::internal("Testing", "Details").into())
        });

        match intercept(&registry, request("Testing", "testErrorResponse", b"WSO2")).await {
            CallOutcome::Status(status) => {
                let err = codec::decode(&status);
                assert_eq!(err.code, StatusCode::Internal);
                assert_eq!(err.service, "Testing");
                assert_eq!(err.message, "Details");
            }
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_failure_is_normalized_to_internal() {
        let mut registry = HandlerRegistry::new();
        registry.register("Testing", "boom", |_| async {
            Err(HandlerError::Unexpected("disk on fire".into()))
        });

        match intercept(&registry, request("Testing", "boom", b"")).await {
            CallOutcome::Status(status) => {
                let err = codec::decode(&status);
                assert_eq!(err.code, StatusCode::Internal);
                assert_eq!(err.message, "disk on fire");
                assert!(err.details.is_empty());
            }
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn panicking_handler_is_normalized_to_internal() {
        let mut registry = HandlerRegistry::new();
        registry.register("Testing", "panic", |_| async {
            if true {
                panic!("kaboom");
            }
            Ok(Vec::new())
        });

        match intercept(&registry, request("Testing", "panic", b"")).await {
            CallOutcome::Status(status) => {
                let err = codec::decode(&status);
                assert_eq!(err.code, StatusCode::Internal);
                assert!(err.message.contains("panicked"));
            }
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unregistered_method_yields_unimplemented() {
        let registry = HandlerRegistry::new();

        match intercept(&registry, request("Nope", "missing", b"")).await {
            CallOutcome::Status(status) => {
                let err = codec::decode(&status);
                assert_eq!(err.code, StatusCode::Unimplemented);
                assert!(err.message.contains("Nope/missing"));
            }
            other => panic!("expected status, got {other:?}"),
        }
    }
}
