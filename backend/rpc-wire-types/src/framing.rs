//! Length-prefixed framing for async byte streams.
//!
//! Each frame is a 4-byte big-endian length followed by the
//! prost-encoded [`Frame`]. Generic over the transport type: works
//! with `TcpStream`, `UnixStream`, or any other
//! `AsyncRead + AsyncWrite + Unpin` stream.

use std::io;

use prost::Message;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::frame::Frame;

/// Upper bound on a single frame, guarding against corrupt or hostile
/// length prefixes.
pub const MAX_FRAME_LEN: usize = 4 * 1024 * 1024;

/// A length-prefix framed connection carrying [`Frame`] messages.
pub struct FramedStream<S> {
    stream: S,
}

impl<S: AsyncRead + AsyncWrite + Unpin> FramedStream<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Send one frame over the connection.
    pub async fn send(&mut self, frame: &Frame) -> io::Result<()> {
        let payload = frame.encode_to_vec();
        if payload.len() > MAX_FRAME_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("frame of {} bytes exceeds limit", payload.len()),
            ));
        }
        let len = payload.len() as u32;
        tracing::trace!(len, "sending frame");
        self.stream.write_all(&len.to_be_bytes()).await?;
        self.stream.write_all(&payload).await?;
        self.stream.flush().await
    }

    /// Receive one frame.
    ///
    /// Returns `Ok(None)` on a clean close before the next length
    /// prefix. A close mid-frame or a malformed frame is an error.
    pub async fn recv(&mut self) -> io::Result<Option<Frame>> {
        let mut len_buf = [0u8; 4];
        match self.stream.read_exact(&mut len_buf).await {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e),
        }

        let len = u32::from_be_bytes(len_buf) as usize;
        if len > MAX_FRAME_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("frame length {len} exceeds limit"),
            ));
        }

        let mut buf = vec![0u8; len];
        self.stream.read_exact(&mut buf).await?;

        let frame = Frame::decode(buf.as_slice())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        tracing::trace!(len, "received frame");
        Ok(Some(frame))
    }
}
