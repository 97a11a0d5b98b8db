use std::io;
use std::time::Duration;
use thiserror::Error;

/// A crate wide Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed or truncated binary input found while decoding a message.
///
/// Decoding stops at the first problem, and no partially filled value is
/// ever returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid dns header: need 12 bytes but only {0} available")]
    ShortHeader(usize),

    #[error("unexpected end of message at offset {offset} while reading {field}")]
    UnexpectedEof { offset: u64, field: &'static str },

    #[error("compressed names are not supported (pointer at offset {0})")]
    CompressionUnsupported(u64),

    #[error("unsupported label type {0:#04x} at offset {1}")]
    ReservedLabelType(u8, u64),

    #[error("invalid label at offset {0}: must be ascii without dots")]
    InvalidLabel(u64),

    #[error("domain name longer than {} bytes", crate::dns::MAX_NAME_LEN)]
    NameTooLong,
}

/// A value that can not be written in wire format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("empty label in domain name '{0}'")]
    EmptyLabel(String),

    #[error("label '{0}' longer than {} characters", crate::dns::MAX_LABEL_LEN)]
    LabelTooLong(String),

    #[error("label '{0}' must be ascii")]
    InvalidLabel(String),

    #[error("domain name '{0}' longer than {} bytes", crate::dns::MAX_NAME_LEN)]
    NameTooLong(String),

    #[error("record data of {0} bytes does not fit in RDLENGTH")]
    DataTooLong(usize),

    #[error("{count} entries in the {section} section, at most 65535 fit")]
    TooManyEntries { section: &'static str, count: usize },
}

/// Failure talking to the upstream server.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("no server address to connect to")]
    NoServers,

    #[error("timed out after {0:?} waiting for a response")]
    Timeout(Duration),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TransportError {
    /// Classifies an io::Error, turning the platform specific timeout kinds
    /// into [`TransportError::Timeout`].
    pub(crate) fn from_io(e: io::Error, timeout: Option<Duration>) -> Self {
        match (e.kind(), timeout) {
            (io::ErrorKind::WouldBlock, Some(t)) | (io::ErrorKind::TimedOut, Some(t)) => {
                TransportError::Timeout(t)
            }
            _ => TransportError::Io(e),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}
