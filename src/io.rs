//! Various traits to help parsing of DNS messages.

use crate::dns::MAX_NAME_LEN;
use crate::errors::FormatError;
use crate::types::{Header, Question};
use byteorder::{ReadBytesExt, BE};
use std::io::Cursor;
use std::io::Read;

pub trait SeekExt {
    /// Returns the number of bytes remaining to be consumed.
    /// This is used as a way to check for malformed input.
    fn remaining(&self) -> u64;
}

impl<'a> SeekExt for Cursor<&'a [u8]> {
    fn remaining(&self) -> u64 {
        (self.get_ref().len() as u64).saturating_sub(self.position())
    }
}

/// Extensions to `Cursor` to read DNS specific types.
///
/// Every method either consumes a complete value or fails with a
/// [`FormatError`] naming the offset where the input ran out.
pub trait DnsReadExt {
    fn read_u8_field(&mut self, field: &'static str) -> Result<u8, FormatError>;

    fn read_u16_field(&mut self, field: &'static str) -> Result<u16, FormatError>;

    /// Reads exactly 12 bytes, leaving the rest of the buffer for later reads.
    fn read_header(&mut self) -> Result<Header, FormatError>;

    /// Reads a uncompressed domain name.
    ///
    /// # Errors
    ///
    /// Fails if the buffer ends before the terminating zero length label, if a
    /// compression pointer or reserved label type is found, or if a label is
    /// not ascii or contains a dot.
    fn read_qname(&mut self) -> Result<String, FormatError>;

    /// Reads a name, followed by the 2 byte type and 2 byte class.
    fn read_question(&mut self) -> Result<Question, FormatError>;
}

impl<'a> DnsReadExt for Cursor<&'a [u8]> {
    fn read_u8_field(&mut self, field: &'static str) -> Result<u8, FormatError> {
        let offset = self.position();
        self.read_u8()
            .map_err(|_| FormatError::UnexpectedEof { offset, field })
    }

    fn read_u16_field(&mut self, field: &'static str) -> Result<u16, FormatError> {
        let offset = self.position();
        if self.remaining() < 2 {
            return Err(FormatError::UnexpectedEof { offset, field });
        }
        self.read_u16::<BE>()
            .map_err(|_| FormatError::UnexpectedEof { offset, field })
    }

    fn read_header(&mut self) -> Result<Header, FormatError> {
        let remaining = self.remaining();
        if remaining < Header::LEN as u64 {
            return Err(FormatError::ShortHeader(remaining as usize));
        }

        Ok(Header {
            id: self.read_u16_field("id")?,
            flags: self.read_u16_field("flags")?,
            num_questions: self.read_u16_field("qdcount")?,
            num_answers: self.read_u16_field("ancount")?,
            num_authorities: self.read_u16_field("nscount")?,
            num_additionals: self.read_u16_field("arcount")?,
        })
    }

    fn read_qname(&mut self) -> Result<String, FormatError> {
        let mut qname = String::new();

        // Bytes consumed so far, counting the terminator we still expect.
        let mut wire_len = 1;

        // Read each label one at a time, to build up the full domain name.
        loop {
            let offset = self.position();
            let len = self.read_u8_field("label length")?;
            if len == 0 {
                break;
            }

            match len & 0xC0 {
                // No compression
                0x00 => (),
                0xC0 => return Err(FormatError::CompressionUnsupported(offset)),
                t => return Err(FormatError::ReservedLabelType(t, offset)),
            }

            wire_len += 1 + len as usize;
            if wire_len > MAX_NAME_LEN {
                return Err(FormatError::NameTooLong);
            }

            let mut label = vec![0; len.into()];
            self.read_exact(&mut label)
                .map_err(|_| FormatError::UnexpectedEof {
                    offset: offset + 1,
                    field: "label",
                })?;

            // A dot can't be told apart from a label separator once joined.
            if !label.is_ascii() || label.contains(&b'.') {
                return Err(FormatError::InvalidLabel(offset));
            }

            if !qname.is_empty() {
                qname.push('.');
            }
            qname.extend(label.iter().map(|&b| b as char));
        }

        if qname.is_empty() {
            qname.push('.') // Root domain
        }

        Ok(qname)
    }

    fn read_question(&mut self) -> Result<Question, FormatError> {
        let name = self.read_qname()?;
        let r#type = self.read_u16_field("qtype")?;
        let class = self.read_u16_field("qclass")?;

        Ok(Question {
            name,
            r#type,
            class,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remaining() {
        let buf = [1, 2, 3, 4];
        let mut cur = Cursor::new(&buf[..]);
        assert_eq!(cur.remaining(), 4);

        cur.set_position(3);
        assert_eq!(cur.remaining(), 1);

        cur.set_position(10);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn test_read_header_leaves_remainder() {
        let buf = hex::decode("abcd0100000100000000000003666f6f00").unwrap();
        let mut cur = Cursor::new(&buf[..]);

        let header = cur.read_header().unwrap();
        assert_eq!(header.id, 0xabcd);
        assert_eq!(header.flags, 0x0100);
        assert_eq!(header.num_questions, 1);
        assert_eq!(cur.position(), 12);
        assert_eq!(cur.read_qname().unwrap(), "foo");
    }

    #[test]
    fn test_read_u16_field_short() {
        let buf = [0x01];
        let mut cur = Cursor::new(&buf[..]);
        assert_eq!(
            cur.read_u16_field("qtype"),
            Err(FormatError::UnexpectedEof {
                offset: 0,
                field: "qtype"
            })
        );
    }

    #[test]
    fn test_read_qname_root() {
        let buf = [0x00];
        let mut cur = Cursor::new(&buf[..]);
        assert_eq!(cur.read_qname().unwrap(), ".");
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn test_read_qname_errors() {
        struct TestCase {
            name: &'static str,
            hex: &'static str,
            want: FormatError,
        }

        let tests = vec![
            TestCase {
                name: "empty buffer",
                hex: "",
                want: FormatError::UnexpectedEof {
                    offset: 0,
                    field: "label length",
                },
            },
            TestCase {
                name: "missing terminator",
                hex: "03666f6f",
                want: FormatError::UnexpectedEof {
                    offset: 4,
                    field: "label length",
                },
            },
            TestCase {
                name: "short label",
                hex: "05666f6f",
                want: FormatError::UnexpectedEof {
                    offset: 1,
                    field: "label",
                },
            },
            TestCase {
                name: "compression pointer",
                hex: "03666f6fc00c",
                want: FormatError::CompressionUnsupported(4),
            },
            TestCase {
                name: "reserved label type",
                hex: "4100",
                want: FormatError::ReservedLabelType(0x40, 0),
            },
            TestCase {
                name: "dot in label",
                hex: "03612e6200",
                want: FormatError::InvalidLabel(0),
            },
            TestCase {
                name: "non ascii",
                hex: "02c3a900",
                want: FormatError::InvalidLabel(0),
            },
        ];

        for test in tests {
            let buf = hex::decode(test.hex).unwrap();
            let mut cur = Cursor::new(&buf[..]);
            assert_eq!(cur.read_qname(), Err(test.want), "{}", test.name);
        }
    }

    #[test]
    fn test_read_qname_too_long() {
        // Five 63 byte labels is 320 bytes on the wire.
        let mut buf = Vec::new();
        for _ in 0..5 {
            buf.push(63);
            buf.extend_from_slice(&[b'a'; 63]);
        }
        buf.push(0);

        let mut cur = Cursor::new(&buf[..]);
        assert_eq!(cur.read_qname(), Err(FormatError::NameTooLong));
    }
}
