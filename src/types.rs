use num_traits::FromPrimitive;
use std::net::SocketAddr;
use std::time::Duration;
use std::time::SystemTime;
use strum_macros::{Display, EnumString};

/// The fixed 12 byte header found at the start of every DNS message. See
/// [rfc1035#section-4.1.1].
///
/// The flags are kept as the raw 16 bit field, so any bit pattern read off the
/// wire survives untouched. Use the accessor methods to interpret them.
///
/// [rfc1035#section-4.1.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Header {
    /// 16-bit identifier assigned by the program that generates any kind of
    /// query. This identifier is copied into the corresponding reply and can be
    /// used by the requester to match up replies to outstanding queries.
    pub id: u16,

    /// QR, Opcode, AA, TC, RD, RA, Z and RCODE packed as on the wire.
    pub flags: u16,

    pub num_questions: u16,
    pub num_answers: u16,
    pub num_authorities: u16,
    pub num_additionals: u16,
}

impl Header {
    /// Encoded size of every header.
    pub const LEN: usize = 12;

    pub const QUERY_RESPONSE: u16 = 0b1000_0000_0000_0000;
    pub const AUTHORITATIVE: u16 = 0b0000_0100_0000_0000;
    pub const TRUNCATED: u16 = 0b0000_0010_0000_0000;

    /// Recursion Desired - this bit directs the name server to pursue the query
    /// recursively.
    pub const RECURSION_DESIRED: u16 = 0b0000_0001_0000_0000;
    pub const RECURSION_AVAILABLE: u16 = 0b0000_0000_1000_0000;

    /// Reserved bits. Includes the AD and CD bits from [rfc4035].
    ///
    /// [rfc4035]: https://datatracker.ietf.org/doc/html/rfc4035
    pub const Z: u16 = 0b0000_0000_0111_0000;

    /// Is this message a response?
    pub fn qr(&self) -> bool {
        self.flags & Header::QUERY_RESPONSE != 0
    }

    /// The raw 4 bit opcode.
    pub fn opcode_bits(&self) -> u8 {
        ((self.flags >> 11) & 0x0F) as u8
    }

    /// The opcode, or None if it is unassigned.
    pub fn opcode(&self) -> Option<Opcode> {
        FromPrimitive::from_u8(self.opcode_bits())
    }

    pub fn aa(&self) -> bool {
        self.flags & Header::AUTHORITATIVE != 0
    }

    pub fn tc(&self) -> bool {
        self.flags & Header::TRUNCATED != 0
    }

    pub fn rd(&self) -> bool {
        self.flags & Header::RECURSION_DESIRED != 0
    }

    pub fn ra(&self) -> bool {
        self.flags & Header::RECURSION_AVAILABLE != 0
    }

    pub fn z(&self) -> u8 {
        ((self.flags & Header::Z) >> 4) as u8
    }

    /// The raw 4 bit response code.
    pub fn rcode_bits(&self) -> u8 {
        (self.flags & 0x000F) as u8
    }

    /// The response code, or None if it is unassigned.
    pub fn rcode(&self) -> Option<Rcode> {
        FromPrimitive::from_u8(self.rcode_bits())
    }
}

/// DNS Question.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Question {
    /// Dotted domain name, for example "example.com".
    pub name: String,

    /// Record type. Passed through uninterpreted, see [`Type`] for the
    /// well known values.
    pub r#type: u16,

    /// Record class, normally [`Class::Internet`].
    pub class: u16,
}

impl Question {
    pub fn new(name: &str, r#type: u16, class: u16) -> Question {
        Question {
            name: name.to_string(),
            r#type,
            class,
        }
    }
}

/// Resource Record (RR).
///
/// Records are written when encoding a [`Message`] but never parsed out of a
/// response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Record {
    pub name: String,

    pub r#type: u16,
    pub class: u16,

    /// The number of seconds that the resource record may be cached
    /// before the source of the information should again be consulted.
    pub ttl: i32,

    /// Opaque RDATA.
    pub data: Vec<u8>,
}

/// DNS Message that serves as the root of all DNS requests and responses.
///
/// # Examples
///
/// ```rust
/// use minidns::{Class, Message, Question, Type};
///
/// let mut m = Message::default();
/// m.header.id = 0xbeef;
/// m.questions.push(Question::new("example.com", Type::A.into(), Class::Internet.into()));
///
/// let req = m.to_vec().expect("failed to encode");
/// assert_eq!(req.len(), 12 + 13 + 4);
///
/// let m = Message::from_slice(&req).expect("invalid message");
/// assert_eq!(m.questions[0].name, "example.com");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    /// The header, as decoded. When encoding the section counts are
    /// recomputed from the sections below.
    pub header: Header,

    pub questions: Vec<Question>,

    /// The answer records.
    pub answers: Vec<Record>,

    /// The authoritive records.
    pub authorities: Vec<Record>,

    /// The additional records.
    pub additionals: Vec<Record>,

    /// Timing and size information, filled in when the message was received
    /// by a client.
    pub stats: Option<Stats>,
}

/// Details about the exchange that produced a [`Message`].
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    /// Wall clock time the query was sent.
    pub start: SystemTime,

    /// How long until the response arrived.
    pub duration: Duration,

    /// The server that answered.
    pub server: SocketAddr,

    /// Bytes written.
    pub request_size: usize,

    /// Bytes read.
    pub response_size: usize,
}

/// Specifies kind of query in this message. See [rfc1035], [rfc6895] and <https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-5>
///
/// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
/// [rfc6895]: https://datatracker.ietf.org/doc/html/rfc6895
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u8)] // Really only 4 bits
pub enum Opcode {
    Query = 0,

    /// Inverse Query (OBSOLETE). See [rfc3425].
    ///
    /// [rfc3425]: https://datatracker.ietf.org/doc/html/rfc3425
    IQuery = 1,
    Status = 2,
    Notify = 4,
    Update = 5,
    DSO = 6,
}

/// Response Codes.
/// See [rfc1035] and <https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6>
///
/// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u8)]
pub enum Rcode {
    NoError = 0,
    FormErr = 1,
    ServFail = 2,
    NXDomain = 3,
    NotImp = 4,
    Refused = 5,
    YXDomain = 6,
    YXRRSet = 7,
    NXRRSet = 8,
    NotAuth = 9,
    NotZone = 10,
    DSOTYPENI = 11,
}

/// Well known Resource Record Types, for example, A, CNAME or SOA.
///
/// Wire fields hold a plain `u16`; this enum only names the common values.
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u16)]
pub enum Type {
    /// IPv4 Address.
    A = 1,
    NS = 2,
    CNAME = 5,
    SOA = 6,

    /// Domain name pointer.
    PTR = 12,

    /// Mail exchange.
    MX = 15,

    /// Text strings.
    TXT = 16,

    /// IPv6 Address.
    AAAA = 28,

    /// Server Selection
    SRV = 33,

    /// Any record type. Only valid as a Question Type.
    ANY = 255,
}

impl From<Type> for u16 {
    fn from(t: Type) -> u16 {
        t as u16
    }
}

/// Well known Resource Record Classes.
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[repr(u16)]
pub enum Class {
    /// The Internet (IN), see [rfc1035].
    ///
    /// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
    #[strum(serialize = "IN")]
    Internet = 1,

    #[strum(serialize = "CH")]
    Chaos = 3,

    #[strum(serialize = "HS")]
    Hesiod = 4,

    #[strum(serialize = "*")]
    Any = 255,
}

impl From<Class> for u16 {
    fn from(c: Class) -> u16 {
        c as u16
    }
}
