//! The blocking client call driver.
//!
//! A synchronous wrapper over the async transport: the calling thread
//! is suspended until the terminal status arrives or the deadline
//! expires. The underlying concurrency model is never exposed to
//! callers.

use std::{net::SocketAddr, time::Duration};

use rpc_wire_types::{codec, ErrorValue, StatusCode};

use crate::transport::{TransportFault, UnaryCall};

/// Default per-call deadline.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Why a unary call failed: an application error the server encoded,
/// or a connection-level fault. Exactly one, never both.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// The server explicitly returned this error.
    #[error("call failed with status: {0}")]
    Status(ErrorValue),
    /// The connection failed before a terminal status arrived.
    #[error("transport fault: {0}")]
    Transport(#[from] TransportFault),
}

/// Client-visible result of one unary call.
pub type CallResult = Result<Vec<u8>, CallError>;

/// Per-call lifecycle. Terminal states have no outgoing transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CallState {
    Idle,
    Sent,
    AwaitingStatus,
    Completed,
    Aborted,
}

impl CallState {
    fn is_terminal(self) -> bool {
        matches!(self, CallState::Completed | CallState::Aborted)
    }

    fn transition(&mut self, next: CallState) {
        debug_assert!(
            !self.is_terminal(),
            "call state transition out of terminal state {self:?}"
        );
        tracing::trace!(from = ?self, to = ?next, "call state transition");
        *self = next;
    }
}

/// Blocking unary RPC client.
///
/// Each call dials its own connection, so concurrent calls from
/// different clients (or threads) never share state beyond the
/// read-only status registry. Dropping the call on abort drops the
/// connection, which discards any late-arriving terminal status.
pub struct BlockingClient {
    addr: SocketAddr,
    deadline: Duration,
    runtime: tokio::runtime::Runtime,
}

impl BlockingClient {
    /// Create a client for the given server address.
    pub fn new(addr: SocketAddr) -> Result<Self, TransportFault> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            addr,
            deadline: DEFAULT_DEADLINE,
            runtime,
        })
    }

    /// Override the per-call deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Issue a unary call and block until it completes.
    ///
    /// An OK terminal status yields the response payload. A non-OK
    /// status yields [`CallError::Status`] with the decoded
    /// [`ErrorValue`]. A connection failure or an expired deadline
    /// yields [`CallError::Transport`]; the two failure kinds are
    /// never conflated.
    pub fn call_unary(
        &self,
        service: &str,
        method: &str,
        request: impl Into<Vec<u8>>,
    ) -> CallResult {
        let payload = request.into();
        self.runtime.block_on(async {
            let mut state = CallState::Idle;
            let result =
                tokio::time::timeout(self.deadline, drive_call(self.addr, service, method, payload, &mut state))
                    .await;
            match result {
                Ok(outcome) => outcome,
                Err(_elapsed) => {
                    // The timed-out future is dropped along with its
                    // connection; a late terminal status has nowhere
                    // to land.
                    state.transition(CallState::Aborted);
                    Err(CallError::Transport(TransportFault::DeadlineExpired))
                }
            }
        })
    }
}

async fn drive_call(
    addr: SocketAddr,
    service: &str,
    method: &str,
    payload: Vec<u8>,
    state: &mut CallState,
) -> CallResult {
    let mut call = match UnaryCall::connect(addr).await {
        Ok(call) => call,
        Err(fault) => {
            state.transition(CallState::Aborted);
            return Err(fault.into());
        }
    };

    if let Err(fault) = call.send_request(service, method, payload).await {
        state.transition(CallState::Aborted);
        return Err(fault.into());
    }
    state.transition(CallState::Sent);
    state.transition(CallState::AwaitingStatus);

    let (response, status) = match call.receive_terminal().await {
        Ok(terminal) => terminal,
        Err(fault) => {
            state.transition(CallState::Aborted);
            return Err(fault.into());
        }
    };
    state.transition(CallState::Completed);

    if StatusCode::from_wire(status.code) == StatusCode::Ok {
        match response {
            Some(payload) => Ok(payload),
            // An OK status with no preceding payload would be a
            // spuriously-empty success; report it as a violation.
            None => Err(CallError::Transport(TransportFault::Protocol(
                "OK terminal status without a response payload".into(),
            ))),
        }
    } else {
        Err(CallError::Status(codec::decode(&status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_machine_reaches_completed() {
        let mut state = CallState::Idle;
        state.transition(CallState::Sent);
        state.transition(CallState::AwaitingStatus);
        state.transition(CallState::Completed);
        assert!(state.is_terminal());
    }

    #[test]
    #[should_panic(expected = "terminal state")]
    #[cfg(debug_assertions)]
    fn terminal_states_admit_no_transitions() {
        let mut state = CallState::Aborted;
        state.transition(CallState::Sent);
    }

    #[test]
    fn call_error_distinguishes_status_from_transport() {
        let status = CallError::Status(ErrorValue::internal("Testing", "Details"));
        assert!(matches!(status, CallError::Status(_)));
        assert!(status.to_string().contains("Details"));

        let fault = CallError::Transport(TransportFault::ConnectionClosed);
        assert!(matches!(fault, CallError::Transport(_)));
        assert!(!fault.to_string().contains("status:"));
    }
}
