use crate::errors::{EncodeError, FormatError};
use crate::io::DnsReadExt;
use crate::types::*;
use log::trace;
use std::convert::TryFrom;
use std::io::Cursor;

/// Restricts the length of a domain label to 63 characters. [RFC1034]
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length of a encoded name, including every length byte and the
/// terminating zero. [RFC1035]
pub const MAX_NAME_LEN: usize = 255;

/// Writes a domain name in wire format into the supplied `Vec<u8>`.
///
/// Each label is written as a single length byte followed by the label's
/// bytes, and the name ends with a zero length byte. `""` and `"."` are the
/// root name, and a single trailing dot is ignored. On error `buf` is left
/// as it was.
// TODO Support compression.
pub fn write_qname(buf: &mut Vec<u8>, domain: &str) -> Result<(), EncodeError> {
    let labels: Vec<&str> = match domain {
        "" | "." => Vec::new(),
        _ => domain.split_terminator('.').collect(),
    };

    // Length byte per label, plus the terminating zero.
    let mut wire_len = 1;
    for label in &labels {
        if label.is_empty() {
            return Err(EncodeError::EmptyLabel(domain.to_string()));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(EncodeError::LabelTooLong(label.to_string()));
        }
        if !label.is_ascii() {
            return Err(EncodeError::InvalidLabel(label.to_string()));
        }
        wire_len += 1 + label.len();
    }

    if wire_len > MAX_NAME_LEN {
        return Err(EncodeError::NameTooLong(domain.to_string()));
    }

    buf.reserve(wire_len);
    for label in labels {
        // Write the length.
        buf.push(label.len() as u8);

        // Then the actual label.
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);

    Ok(())
}

/// Returns the wire format of `domain`. See [`write_qname`].
pub fn encode_name(domain: &str) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(domain.len() + 2);
    write_qname(&mut buf, domain)?;
    Ok(buf)
}

/// Reads one uncompressed name from the start of `buf`.
pub fn decode_name(buf: &[u8]) -> Result<String, FormatError> {
    Cursor::new(buf).read_qname()
}

impl Header {
    /// Returns this header in its fixed 12 byte, big endian, wire format.
    pub fn to_bytes(&self) -> [u8; Header::LEN] {
        let mut out = [0; Header::LEN];
        let fields = [
            self.id,
            self.flags,
            self.num_questions,
            self.num_answers,
            self.num_authorities,
            self.num_additionals,
        ];

        for (chunk, field) in out.chunks_exact_mut(2).zip(fields.iter()) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }

        out
    }

    /// Decodes the first 12 bytes of `buf`. Any trailing bytes are ignored.
    ///
    /// No flag or count is validated, every bit pattern decodes.
    pub fn from_slice(buf: &[u8]) -> Result<Header, FormatError> {
        Cursor::new(buf).read_header()
    }
}

impl Question {
    /// Writes this question (name, type, class) into the supplied `Vec<u8>`.
    pub fn write(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
        write_qname(buf, &self.name)?;
        buf.extend_from_slice(&self.r#type.to_be_bytes());
        buf.extend_from_slice(&self.class.to_be_bytes());
        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::with_capacity(self.name.len() + 6);
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Decodes a single question from the start of `buf`.
    pub fn from_slice(buf: &[u8]) -> Result<Question, FormatError> {
        Cursor::new(buf).read_question()
    }
}

impl Record {
    /// Writes this resource record into the supplied `Vec<u8>`.
    ///
    /// Fails if the name is invalid, or the data is longer than a 16 bit
    /// RDLENGTH can describe.
    pub fn write(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
        let rdlength = u16::try_from(self.data.len())
            .map_err(|_| EncodeError::DataTooLong(self.data.len()))?;

        write_qname(buf, &self.name)?;
        buf.extend_from_slice(&self.r#type.to_be_bytes());
        buf.extend_from_slice(&self.class.to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());
        buf.extend_from_slice(&rdlength.to_be_bytes());
        buf.extend_from_slice(&self.data);
        Ok(())
    }
}

impl Message {
    /// Decodes the header and question section of a DNS message.
    ///
    /// Exactly `num_questions` questions are read; running out of input
    /// first is a [`FormatError`]. The answer, authority and additional
    /// sections are left unparsed, so those vectors stay empty while the
    /// header still reports the counts the sender declared.
    pub fn from_slice(buf: &[u8]) -> Result<Message, FormatError> {
        let mut cur = Cursor::new(buf);

        let header = cur.read_header()?;
        trace!("decoded header {:?}", header);

        let mut questions = Vec::with_capacity(header.num_questions.into());
        for _ in 0..header.num_questions {
            questions.push(cur.read_question()?);
        }

        Ok(Message {
            header,
            questions,
            ..Default::default()
        })
    }

    /// Returns this DNS Message as a Vec<u8> ready to be sent, as defined by [rfc1035](https://datatracker.ietf.org/doc/html/rfc1035).
    ///
    /// The id and flags come from `self.header`, while the four counts are
    /// taken from the lengths of the sections.
    pub fn to_vec(&self) -> Result<Vec<u8>, EncodeError> {
        let mut req = Vec::<u8>::with_capacity(512);

        let header = Header {
            num_questions: count("question", self.questions.len())?,
            num_answers: count("answer", self.answers.len())?,
            num_authorities: count("authority", self.authorities.len())?,
            num_additionals: count("additional", self.additionals.len())?,
            ..self.header
        };
        req.extend_from_slice(&header.to_bytes());

        for question in &self.questions {
            question.write(&mut req)?;
        }

        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            record.write(&mut req)?;
        }

        Ok(req)
    }
}

/// Converts a section length into its 16 bit header count.
fn count(section: &'static str, len: usize) -> Result<u16, EncodeError> {
    u16::try_from(len).map_err(|_| EncodeError::TooManyEntries {
        section,
        count: len,
    })
}
