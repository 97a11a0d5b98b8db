//! Clients that send queries to an upstream server.
use crate::errors::TransportError;
use std::net::SocketAddr;

pub use self::resolver::{Exchange, Resolver};
#[cfg(feature = "udp")]
pub use self::udp::UdpTransport;

mod resolver;
mod stats;
#[cfg(feature = "udp")]
pub mod udp;

/// Default size of the buffer a response is read into.
pub const DEFAULT_RECV_SIZE: usize = 1024;

/// Moves raw messages to and from a single upstream server.
///
/// Each call either completes or fails with a [`TransportError`]; nothing is
/// retried.
pub trait Transport {
    /// Writes one message, returning the number of bytes written.
    fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError>;

    /// Reads one message of at most `max_size` bytes. A response longer than
    /// that is silently truncated.
    fn receive(&mut self, max_size: usize) -> Result<Vec<u8>, TransportError>;

    /// The server this transport talks to.
    fn peer_addr(&self) -> Result<SocketAddr, TransportError>;
}
