use crate::clients::Transport;
use crate::errors::TransportError;
use log::trace;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;
use std::net::SocketAddr;
use std::net::ToSocketAddrs;
use std::net::UdpSocket;
use std::time::Duration;

pub const GOOGLE_IPV4_PRIMARY: &str = "8.8.8.8:53";
pub const GOOGLE_IPV4_SECONDARY: &str = "8.8.4.4:53";

/// How long to wait for a reply before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A UDP transport connected to one DNS server.
///
/// # Example
///
/// ```rust,no_run
/// use minidns::clients::{Transport, UdpTransport};
///
/// fn main() -> Result<(), minidns::Error> {
///     let mut transport = UdpTransport::connect("8.8.8.8:53")?;
///     transport.send(&minidns::build_query("example.com", 1)?)?;
///
///     let resp = transport.receive(1024)?;
///     println!("{}", minidns::Message::from_slice(&resp)?);
///     Ok(())
/// }
/// ```
///
/// See <https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1>
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,

    read_timeout: Option<Duration>,
}

impl UdpTransport {
    /// Connects to the first address `server` resolves to, using the
    /// [`DEFAULT_TIMEOUT`] for reads and writes.
    pub fn connect<A: ToSocketAddrs>(server: A) -> Result<Self, TransportError> {
        UdpTransport::connect_timeout(server, Some(DEFAULT_TIMEOUT))
    }

    /// Connects to `server`. A `timeout` of None blocks forever waiting for
    /// a response.
    pub fn connect_timeout<A: ToSocketAddrs>(
        server: A,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let servers: Vec<SocketAddr> = server.to_socket_addrs()?.collect();
        let first = servers.first().ok_or(TransportError::NoServers)?;

        // Bind to a ephemeral port of the same family as the server.
        let bind_addr = if first.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)?;
        socket.set_read_timeout(timeout)?;
        socket.set_write_timeout(timeout)?;

        // Connect us to the server, meaning recv will only receive directly
        // from the server.
        socket.connect(*first)?;

        trace!("udp socket {} connected to {}", socket.local_addr()?, first);

        Ok(UdpTransport {
            socket,
            read_timeout: timeout,
        })
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        let n = self
            .socket
            .send(buf)
            .map_err(|e| TransportError::from_io(e, self.read_timeout))?;

        trace!("sent {} bytes", n);
        Ok(n)
    }

    fn receive(&mut self, max_size: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0; max_size];
        let len = self
            .socket
            .recv(&mut buf)
            .map_err(|e| TransportError::from_io(e, self.read_timeout))?;

        trace!("received {} bytes", len);
        buf.truncate(len);
        Ok(buf)
    }

    fn peer_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket.peer_addr()?)
    }
}
