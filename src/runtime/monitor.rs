use std::{future::Future, net::SocketAddr, time::Duration};

use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use super::events::{Highlight, MonitorCommand, MonitorEvent};

const MAX_DATAGRAM: usize = 65_536;

/// Monitor transport failures outside the receive path.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The socket could not be bound.
    #[error("binding monitor socket {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Bind failure.
        #[source]
        source: std::io::Error,
    },
    /// No datagram has arrived yet, so there is nowhere to reply.
    #[error("no radio application has contacted the monitor yet")]
    NoPeer,
    /// Sending failed.
    #[error("sending command: {0}")]
    Send(#[from] std::io::Error),
    /// Command encoding failed.
    #[error("encoding command: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Boundary to the radio application.
///
/// `recv` is the only place the session loop waits. Timeouts and transport
/// failures come back as [`MonitorEvent::Timeout`] and
/// [`MonitorEvent::SocketError`] rather than errors.
pub trait Monitor {
    /// Waits for the next event.
    fn recv(&mut self) -> impl Future<Output = MonitorEvent>;
    /// Sends a highlight command.
    fn highlight(&mut self, cmd: &Highlight) -> impl Future<Output = Result<(), MonitorError>>;
}

/// UDP monitor exchanging one JSON event or command per datagram.
///
/// Commands go to whichever peer sent the latest datagram.
pub struct UdpJsonMonitor {
    socket: UdpSocket,
    timeout: Duration,
    peer: Option<SocketAddr>,
    buf: Vec<u8>,
}

impl UdpJsonMonitor {
    /// Binds `addr`; each receive waits at most `timeout`.
    pub async fn bind(addr: SocketAddr, timeout: Duration) -> Result<Self, MonitorError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| MonitorError::Bind { addr, source })?;
        info!(%addr, timeout_s = timeout.as_secs(), "monitor listening");
        Ok(Self {
            socket,
            timeout,
            peer: None,
            buf: vec![0u8; MAX_DATAGRAM],
        })
    }

    /// Bound address.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl Monitor for UdpJsonMonitor {
    async fn recv(&mut self) -> MonitorEvent {
        loop {
            match tokio::time::timeout(self.timeout, self.socket.recv_from(&mut self.buf)).await {
                Err(_) => return MonitorEvent::Timeout,
                Ok(Err(err)) => {
                    return MonitorEvent::SocketError {
                        reason: err.to_string(),
                    };
                }
                Ok(Ok((len, from))) => {
                    self.peer = Some(from);
                    match serde_json::from_slice::<MonitorEvent>(&self.buf[..len]) {
                        Ok(event) => return event,
                        Err(err) => debug!(%from, len, error = %err, "skipping undecodable datagram"),
                    }
                }
            }
        }
    }

    async fn highlight(&mut self, cmd: &Highlight) -> Result<(), MonitorError> {
        let peer = self.peer.ok_or(MonitorError::NoPeer)?;
        let payload = serde_json::to_vec(&MonitorCommand::Highlight(cmd.clone()))?;
        let sent = self.socket.send_to(&payload, peer).await?;
        if sent != payload.len() {
            warn!(sent, expected = payload.len(), "short highlight datagram");
        }
        Ok(())
    }
}
