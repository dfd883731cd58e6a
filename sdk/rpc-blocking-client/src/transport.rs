//! Client side of the unary call transport: send one request, then
//! receive at most one response payload followed by exactly one
//! terminal status.

use std::{io, net::SocketAddr};

use rpc_wire_types::{frame::frame_body::Body, framing::FramedStream, Frame, OutgoingStatus};
use tokio::net::TcpStream;

/// Connection-level failure, reported to callers as a distinct kind
/// from an application error. Never carries an [`ErrorValue`].
///
/// [`ErrorValue`]: rpc_wire_types::ErrorValue
#[derive(Debug, thiserror::Error)]
pub enum TransportFault {
    #[error("io failure on the call connection: {0}")]
    Io(#[from] io::Error),
    #[error("connection closed before the terminal status arrived")]
    ConnectionClosed,
    #[error("call deadline expired before the terminal status arrived")]
    DeadlineExpired,
    #[error("protocol violation: {0}")]
    Protocol(String),
}

/// One in-flight unary call over its own connection.
pub struct UnaryCall {
    framed: FramedStream<TcpStream>,
}

impl UnaryCall {
    pub async fn connect(addr: SocketAddr) -> Result<Self, TransportFault> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            framed: FramedStream::new(stream),
        })
    }

    pub async fn send_request(
        &mut self,
        service: &str,
        method: &str,
        payload: Vec<u8>,
    ) -> Result<(), TransportFault> {
        self.framed
            .send(&Frame::request(service, method, payload))
            .await?;
        Ok(())
    }

    /// Block until the terminal status arrives.
    ///
    /// Returns the optional response payload preceding it. The
    /// transport guarantees at most one payload and exactly one
    /// status per call; anything else is a protocol fault.
    pub async fn receive_terminal(
        &mut self,
    ) -> Result<(Option<Vec<u8>>, OutgoingStatus), TransportFault> {
        let mut payload: Option<Vec<u8>> = None;

        loop {
            let frame = self
                .framed
                .recv()
                .await?
                .ok_or(TransportFault::ConnectionClosed)?;

            match frame.body {
                Some(Body::Response(response)) => {
                    if payload.is_some() {
                        return Err(TransportFault::Protocol(
                            "more than one response payload for a unary call".into(),
                        ));
                    }
                    payload = Some(response.payload);
                }
                Some(Body::Trailer(status)) => return Ok((payload, status)),
                Some(Body::Request(_)) => {
                    return Err(TransportFault::Protocol(
                        "server sent a request frame".into(),
                    ));
                }
                None => {
                    return Err(TransportFault::Protocol("frame without a body".into()));
                }
            }
        }
    }
}
