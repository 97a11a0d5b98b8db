//! Implements the Display trait for the various types, so they output
//! in `dig` style.
// Refer to https://github.com/tigeli/bind-utils/blob/master/bin/dig/dig.c for reference.

use crate::types::*;
use chrono::prelude::*;
use num_traits::FromPrimitive;
use std::convert::TryFrom;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Returns the mnemonic for a record type, or the generic `TYPEnnn` form
/// from [rfc3597] for values without one.
///
/// [rfc3597]: https://datatracker.ietf.org/doc/html/rfc3597#section-5
pub fn type_name(r#type: u16) -> String {
    match Type::from_u16(r#type) {
        Some(t) => t.to_string(),
        None => format!("TYPE{}", r#type),
    }
}

/// Returns the mnemonic for a class, or the generic `CLASSnnn` form.
pub fn class_name(class: u16) -> String {
    match Class::from_u16(class) {
        Some(c) => c.to_string(),
        None => format!("CLASS{}", class),
    }
}

/// Displays this message in a format resembling `dig` output.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.header)?;
        writeln!(f)?;

        // Always display the question section, but optionally
        // display the other sections.
        writeln!(f, ";; QUESTION SECTION:")?;
        for question in &self.questions {
            write!(f, "{}", question)?;
        }
        writeln!(f)?;

        for (title, records) in &[
            ("ANSWER", &self.answers),
            ("AUTHORITY", &self.authorities),
            ("ADDITIONAL", &self.additionals),
        ] {
            if records.is_empty() {
                continue;
            }

            writeln!(f, ";; {} SECTION:", title)?;
            for record in records.iter() {
                write!(f, "{}", record)?;
            }
            writeln!(f)?;
        }

        if let Some(stats) = &self.stats {
            write!(f, "{}", stats)?;
        }

        Ok(())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let opcode = match self.opcode() {
            Some(o) => o.to_string().to_uppercase(),
            None => self.opcode_bits().to_string(),
        };
        let rcode = match self.rcode() {
            Some(r) => r.to_string().to_uppercase(),
            None => self.rcode_bits().to_string(),
        };

        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {opcode}, status: {rcode}, id: {id}",
            opcode = opcode,
            rcode = rcode,
            id = self.id,
        )?;

        let mut flags = String::new();

        if self.qr() {
            flags.push_str(" qr")
        }
        if self.aa() {
            flags.push_str(" aa")
        }
        if self.tc() {
            flags.push_str(" tc")
        }
        if self.rd() {
            flags.push_str(" rd")
        }
        if self.ra() {
            flags.push_str(" ra")
        }

        writeln!(f, ";; flags:{flags}; QUERY: {qd_count}, ANSWER: {an_count}, AUTHORITY: {ns_count}, ADDITIONAL: {ar_count}",
            flags = flags,
            qd_count = self.num_questions,
            an_count = self.num_answers,
            ns_count = self.num_authorities,
            ar_count = self.num_additionals,
        )
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            ";{name:<23} {class:4} {rtype:6}",
            name = self.name,
            class = class_name(self.class),
            rtype = type_name(self.r#type),
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{name:<20} {ttl:>4} {class:4} {rtype:6} ",
            name = self.name,
            ttl = self.ttl,
            class = class_name(self.class),
            rtype = type_name(self.r#type),
        )?;

        let data = self.data.as_slice();
        match Type::from_u16(self.r#type) {
            Some(Type::A) if data.len() == 4 => {
                writeln!(f, "{}", Ipv4Addr::new(data[0], data[1], data[2], data[3]))
            }
            Some(Type::AAAA) if data.len() == 16 => match <[u8; 16]>::try_from(data) {
                Ok(octets) => writeln!(f, "{}", Ipv6Addr::from(octets)),
                Err(_) => Err(fmt::Error),
            },
            _ => {
                // Unknown RDATA, see rfc3597.
                write!(f, "\\# {}", data.len())?;
                if !data.is_empty() {
                    write!(f, " ")?;
                    for b in data {
                        write!(f, "{:02x}", b)?;
                    }
                }
                writeln!(f)
            }
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, ";; Query time: {} msec", self.duration.as_millis())?;
        writeln!(f, ";; SERVER: {}", self.server)?;

        let start: DateTime<Local> = self.start.into();
        // ;; WHEN: Sat Jun 12 12:14:21 PDT 2021
        writeln!(f, ";; WHEN: {}", start.format("%a %b %-d %H:%M:%S %z %-Y"))?;
        writeln!(
            f,
            ";; MSG SIZE sent: {} rcvd: {}",
            self.request_size, self.response_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_and_class_names() {
        assert_eq!(type_name(1), "A");
        assert_eq!(type_name(28), "AAAA");
        assert_eq!(type_name(65), "TYPE65");
        assert_eq!(class_name(1), "IN");
        assert_eq!(class_name(2), "CLASS2");
    }

    #[test]
    fn test_header_display() {
        let header = Header {
            id: 4660,
            flags: 0x8180,
            num_questions: 1,
            num_answers: 2,
            ..Default::default()
        };

        assert_eq!(
            header.to_string(),
            ";; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 4660\n\
             ;; flags: qr rd ra; QUERY: 1, ANSWER: 2, AUTHORITY: 0, ADDITIONAL: 0\n"
        );
    }

    #[test]
    fn test_record_display() {
        let mut record = Record {
            name: "example.com".to_string(),
            r#type: 1,
            class: 1,
            ttl: 300,
            data: vec![93, 184, 216, 34],
        };
        assert!(record.to_string().ends_with("93.184.216.34\n"));

        record.r#type = 99;
        record.data = vec![0xde, 0xad];
        assert!(record.to_string().ends_with("TYPE99 \\# 2 dead\n"));
    }
}
