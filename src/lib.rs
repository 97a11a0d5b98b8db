//! A minimal DNS client.
//!
//! Builds a single question query, sends it to one upstream server over
//! UDP, and decodes the header and question section of the reply. Names are
//! read and written using plain [rfc1035] labels; compressed names are
//! rejected rather than followed.
//!
//! ```rust,no_run
//! use minidns::clients::Resolver;
//! use minidns::Type;
//!
//! fn main() -> Result<(), minidns::Error> {
//!     let mut resolver = Resolver::udp("8.8.8.8:53")?;
//!     let resp = resolver.query("example.com", Type::A.into())?;
//!     println!("{}", resp);
//!     Ok(())
//! }
//! ```
//!
//! [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035

#[macro_use]
extern crate num_derive;

pub mod clients;
mod display;
pub mod dns;
mod errors;
mod from_str;
pub mod io;
mod query;
pub mod types;

pub use crate::display::{class_name, type_name};
pub use crate::dns::{decode_name, encode_name};
pub use crate::errors::{EncodeError, Error, FormatError, Result, TransportError};
pub use crate::from_str::{parse_class, parse_type, FromStrError};
pub use crate::query::{build_query, QueryBuilder};
pub use crate::types::*;

// Pull up the various types that should be on the front page of the docs.
#[doc(inline)]
pub use crate::types::Header;
#[doc(inline)]
pub use crate::types::Message;
#[doc(inline)]
pub use crate::types::Question;
#[doc(inline)]
pub use crate::types::Record;
