//! Handler registration: a dispatch table keyed by (service, method)
//! mapping to a uniform async handler signature.

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use rpc_wire_types::ErrorValue;

/// What a handler may fail with: either a structured application
/// error, or an unstructured failure the interceptor will normalize
/// into an `Internal` error value.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    Status(ErrorValue),
    #[error("{0}")]
    Unexpected(String),
}

impl From<ErrorValue> for HandlerError {
    fn from(err: ErrorValue) -> Self {
        HandlerError::Status(err)
    }
}

pub type HandlerResult = Result<Vec<u8>, HandlerError>;
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send>>;

type BoxedHandler = Arc<dyn Fn(Vec<u8>) -> HandlerFuture + Send + Sync>;

/// Immutable-after-setup dispatch table for unary handlers.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<(String, String), BoxedHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under (service, method). A later
    /// registration under the same key replaces the earlier one.
    pub fn register<F, Fut>(&mut self, service: &str, method: &str, handler: F)
    where
        F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handlers.insert(
            (service.to_owned(), method.to_owned()),
            Arc::new(move |request| Box::pin(handler(request))),
        );
    }

    pub fn get(&self, service: &str, method: &str) -> Option<BoxedHandler> {
        self.handlers
            .get(&(service.to_owned(), method.to_owned()))
            .cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
