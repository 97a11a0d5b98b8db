use crate::clients::stats::StatsBuilder;
use crate::clients::Transport;
use crate::clients::DEFAULT_RECV_SIZE;
use crate::errors::Result;
use crate::query::QueryBuilder;
use crate::Message;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// The raw bytes of one query and its reply, along with the decoded reply.
#[derive(Debug)]
pub struct Exchange {
    pub request: Vec<u8>,
    pub response: Vec<u8>,
    pub message: Message,
}

/// Sends a single query to one upstream server and decodes the reply.
///
/// Each call to [`Resolver::query`] is a strict build, send, receive, decode
/// sequence. The upstream server is trusted to recurse on our behalf, and
/// the reply is not checked against the query.
pub struct Resolver<T, R = StdRng> {
    transport: T,
    builder: QueryBuilder<R>,
    recv_size: usize,
}

#[cfg(feature = "udp")]
impl Resolver<crate::clients::UdpTransport> {
    /// Creates a Resolver talking UDP to `server`, with ids drawn from a
    /// entropy seeded generator.
    pub fn udp<A: std::net::ToSocketAddrs>(server: A) -> Result<Self> {
        let transport = crate::clients::UdpTransport::connect(server)?;
        Ok(Resolver::new(transport, QueryBuilder::from_entropy()))
    }
}

impl<T, R> Resolver<T, R>
where
    T: Transport,
    R: Rng,
{
    pub fn new(transport: T, builder: QueryBuilder<R>) -> Self {
        Resolver {
            transport,
            builder,
            recv_size: DEFAULT_RECV_SIZE,
        }
    }

    /// Sets the size of the buffer responses are read into. Anything the
    /// server sends beyond this is dropped.
    pub fn with_recv_size(mut self, recv_size: usize) -> Self {
        self.recv_size = recv_size;
        self
    }

    /// Gives back the underlying transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Queries the upstream server for `domain` records of `type`.
    ///
    /// Returns the decoded header and question section, with
    /// [`Message::stats`] describing the exchange. Any encode, transport or
    /// decode failure is returned as is.
    pub fn query(&mut self, domain: &str, r#type: u16) -> Result<Message> {
        Ok(self.exchange(domain, r#type)?.message)
    }

    /// Like [`Resolver::query`] but also returns the raw request and response
    /// bytes, useful for debugging.
    pub fn exchange(&mut self, domain: &str, r#type: u16) -> Result<Exchange> {
        let req = self.builder.build_query(domain, r#type)?;

        let server = self.transport.peer_addr()?;

        let stats = StatsBuilder::start(server, req.len());
        let written = self.transport.send(&req)?;
        debug!("wrote {} bytes to {}", written, server);

        let buf = self.transport.receive(self.recv_size)?;
        let stats = stats.end(buf.len());
        debug!("read {} bytes in {:?}", buf.len(), stats.duration);

        let mut message = Message::from_slice(&buf)?;
        message.stats = Some(stats);

        Ok(Exchange {
            request: req,
            response: buf,
            message,
        })
    }
}
