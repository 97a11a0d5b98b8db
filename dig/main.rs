// Simple dig style command line.
// dig [@server] {domain} {type}
mod util;

use clap::Parser;
use log::debug;
use minidns::clients::udp::GOOGLE_IPV4_PRIMARY;
use minidns::clients::{Resolver, UdpTransport, DEFAULT_RECV_SIZE};
use minidns::{parse_type, type_name, QueryBuilder, Type};
use std::net::{IpAddr, SocketAddr};
use std::process;
use std::time::Duration;

// A simple type alias so as to DRY.
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Sends one DNS query per domain over UDP, and prints the decoded reply.
#[derive(Parser, Debug)]
#[command(name = "dig")]
struct Cli {
    /// Upstream server, as `ip`, `ip:port` or `host:port`.
    #[arg(short, long, env = "DNS_SERVER", default_value = GOOGLE_IPV4_PRIMARY)]
    server: String,

    /// Seconds to wait for a reply, 0 waits forever.
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// Size of the buffer the reply is read into.
    #[arg(long, default_value_t = DEFAULT_RECV_SIZE)]
    bufsize: usize,

    /// Print the raw query and reply bytes.
    #[arg(short = 'x', long)]
    hexdump: bool,

    /// `@server`, domains and a record type, in any order.
    args: Vec<String>,
}

#[derive(Debug, PartialEq)]
struct Args {
    server: String,

    /// Query this type
    r#type: u16,

    /// Across all these domains
    domains: Vec<String>,
}

fn parse_args(server: String, args: impl Iterator<Item = String>) -> Args {
    let mut result = Args {
        server,
        r#type: Type::A.into(),
        domains: Vec::new(),
    };

    let mut found_type = false;

    // To be useful, we allow users to say `dig A example.com` or `dig example.com A`
    for arg in args {
        if let Some(server) = arg.strip_prefix('@') {
            result.server = server.to_string();
            continue;
        }

        if !found_type {
            // Use the first type we found and assume the rest are domains.
            if let Ok(r#type) = parse_type(&arg) {
                result.r#type = r#type;
                found_type = true;
                continue;
            }
        }

        result.domains.push(arg)
    }

    if result.domains.is_empty() {
        // By default query the root domain
        result.domains.push(".".to_string());
        if !found_type {
            result.r#type = Type::NS.into();
        }
    }

    result
}

/// Accepts a bare IP address, defaulting to port 53.
fn server_addr(server: &str) -> String {
    match server.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, 53).to_string(),
        Err(_) => server.to_string(),
    }
}

fn run(cli: Cli) -> Result<()> {
    let args = parse_args(cli.server, cli.args.into_iter());

    let timeout = match cli.timeout {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let server = server_addr(&args.server);
    debug!("using server {} with timeout {:?}", server, timeout);

    let transport = UdpTransport::connect_timeout(server.as_str(), timeout)?;
    let mut resolver =
        Resolver::new(transport, QueryBuilder::from_entropy()).with_recv_size(cli.bufsize);

    for domain in &args.domains {
        println!("; <<>> dig <<>> {} {}", domain, type_name(args.r#type));

        let exchange = resolver.exchange(domain, args.r#type)?;
        println!(";; wrote {} bytes", exchange.request.len());
        println!(";; read {} bytes", exchange.response.len());

        if cli.hexdump {
            println!("query:");
            print!("{}", util::hexdump(&exchange.request));
            println!("response:");
            print!("{}", util::hexdump(&exchange.response));
        }

        println!();
        println!("{}", exchange.message);
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("dig: {}", e);
        process::exit(1);
    }
}
