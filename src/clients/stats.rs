use crate::Stats;
use std::net::SocketAddr;
use std::time::{Instant, SystemTime};

/// Times one query/response exchange with a server.
///
/// The clock covers only the time on the wire: start it just before the
/// query is sent and stop it as soon as the reply has been read, before the
/// reply is decoded.
pub(crate) struct StatsBuilder {
    start: SystemTime,
    timer: Instant,
    server: SocketAddr,
    request_size: usize,
}

impl StatsBuilder {
    pub fn start(server: SocketAddr, request_size: usize) -> StatsBuilder {
        StatsBuilder {
            start: SystemTime::now(),
            timer: Instant::now(),
            server,
            request_size,
        }
    }

    /// Stops the clock, recording the size of the reply.
    pub fn end(self, response_size: usize) -> Stats {
        Stats {
            start: self.start,
            duration: self.timer.elapsed(),
            server: self.server,
            request_size: self.request_size,
            response_size,
        }
    }
}
