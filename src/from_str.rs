//! Parses record types and classes as written on a `dig` style command line.

use crate::Class;
use crate::Type;
use core::num::ParseIntError;
use core::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FromStrError {
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    #[error(transparent)]
    ParseIntError(#[from] ParseIntError),
}

/// Parses a record type given as a mnemonic (`A`, `aaaa`), in the generic
/// `TYPEnnn` form, or as a plain number.
pub fn parse_type(s: &str) -> Result<u16, FromStrError> {
    let upper = s.to_ascii_uppercase();

    if let Ok(t) = Type::from_str(&upper) {
        return Ok(t.into());
    }

    parse_generic(&upper, "TYPE")
}

/// Parses a class given as a mnemonic (`IN`, `CH`), in the generic
/// `CLASSnnn` form, or as a plain number.
pub fn parse_class(s: &str) -> Result<u16, FromStrError> {
    let upper = s.to_ascii_uppercase();

    if let Ok(c) = Class::from_str(&upper) {
        return Ok(c.into());
    }

    parse_generic(&upper, "CLASS")
}

fn parse_generic(s: &str, prefix: &str) -> Result<u16, FromStrError> {
    let digits = s.strip_prefix(prefix).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FromStrError::UnknownMnemonic(s.to_string()));
    }

    Ok(digits.parse()?)
}
