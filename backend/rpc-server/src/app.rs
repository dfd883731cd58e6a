use std::{future::Future, io, net, sync::Arc};

use rpc_wire_types::{
    frame::frame_body::Body,
    framing::FramedStream,
    Frame,
};
use tokio::net::{TcpListener, TcpStream};

use crate::{
    configs,
    error::ConfigurationError,
    handler::HandlerRegistry,
    interceptor::{self, CallOutcome},
    logger,
};

/// Build and run the server from config, shutting down on ctrl-c.
pub async fn server_builder(
    config: configs::Config,
    registry: HandlerRegistry,
) -> Result<(), ConfigurationError> {
    let socket_addr = config.server.socket_addr()?;
    let server = RpcServer::bind(socket_addr, registry).await?;

    let shutdown_signal = async {
        let output = tokio::signal::ctrl_c().await;
        logger::info!(?output, "shutdown signal received");
    };

    logger::info!(host = %config.server.host, port = %config.server.port, "starting unary rpc service");

    server.serve_with_shutdown(shutdown_signal).await
}

/// A bound unary RPC server. One connection carries one call.
pub struct RpcServer {
    listener: TcpListener,
    registry: Arc<HandlerRegistry>,
}

impl RpcServer {
    pub async fn bind(
        addr: net::SocketAddr,
        registry: HandlerRegistry,
    ) -> Result<Self, ConfigurationError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            registry: Arc::new(registry),
        })
    }

    /// The actual bound address; useful when binding port 0.
    pub fn local_addr(&self) -> io::Result<net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the shutdown future resolves. Each
    /// connection is served on its own task, so concurrent calls stay
    /// fully isolated.
    pub async fn serve_with_shutdown(
        self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), ConfigurationError> {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let registry = Arc::clone(&self.registry);
                            tokio::spawn(async move {
                                if let Err(error) = handle_connection(stream, &registry).await {
                                    logger::warn!(%peer, %error, "connection ended with transport error");
                                }
                            });
                        }
                        Err(error) => {
                            logger::error!(%error, "failed to accept connection");
                        }
                    }
                }
                _ = &mut shutdown => break,
            }
        }

        Ok(())
    }
}

/// Serve one call on one connection: read the request frame, run the
/// interceptor, write the outcome. Handler failures never reach this
/// function; anything that errors here is a transport-level fault on
/// an already-broken connection.
async fn handle_connection(
    stream: TcpStream,
    registry: &HandlerRegistry,
) -> io::Result<()> {
    let mut framed = FramedStream::new(stream);

    let request = match framed.recv().await? {
        Some(Frame {
            body: Some(Body::Request(request)),
        }) => request,
        Some(frame) => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected request frame, got {frame:?}"),
            ));
        }
        // Peer connected and went away without sending a call.
        None => return Ok(()),
    };

    match interceptor::intercept(registry, request).await {
        CallOutcome::Response { payload, status } => {
            framed.send(&Frame::response(payload)).await?;
            framed.send(&Frame::trailer(status)).await
        }
        CallOutcome::Status(status) => framed.send(&Frame::trailer(status)).await,
    }
}
