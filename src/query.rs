//! Builds outbound query messages.

use crate::errors::EncodeError;
use crate::types::{Class, Header, Message, Question};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builds single question, recursion desired, queries.
///
/// The transaction id is drawn from the supplied random source, which makes
/// the output reproducible when a seeded generator is used. The ids are not
/// tracked, so two queries may share an id.
///
/// # Example
///
/// ```rust
/// use minidns::{Message, QueryBuilder, Type};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut builder = QueryBuilder::new(StdRng::seed_from_u64(53));
/// let req = builder.build_query("example.com", Type::A.into()).unwrap();
///
/// let m = Message::from_slice(&req).unwrap();
/// assert!(m.header.rd());
/// assert_eq!(m.questions[0].name, "example.com");
/// ```
pub struct QueryBuilder<R = StdRng> {
    rng: R,
}

impl QueryBuilder<StdRng> {
    /// Creates a QueryBuilder seeded from the operating system.
    pub fn from_entropy() -> Self {
        QueryBuilder::new(StdRng::from_entropy())
    }
}

impl<R: Rng> QueryBuilder<R> {
    pub fn new(rng: R) -> Self {
        QueryBuilder { rng }
    }

    /// Returns the query as a [`Message`] with a fresh random id.
    ///
    /// `r#type` is not checked, any value is passed on to the server.
    pub fn build_message(&mut self, domain: &str, r#type: u16) -> Message {
        let header = Header {
            id: self.rng.gen(),
            flags: Header::RECURSION_DESIRED,
            num_questions: 1,
            ..Default::default()
        };

        Message {
            header,
            questions: vec![Question::new(domain, r#type, Class::Internet.into())],
            ..Default::default()
        }
    }

    /// Returns the encoded query, ready to be sent.
    pub fn build_query(&mut self, domain: &str, r#type: u16) -> Result<Vec<u8>, EncodeError> {
        let m = self.build_message(domain, r#type);
        let req = m.to_vec()?;

        debug!(
            "built query id={:#06x} for {} type {} ({} bytes)",
            m.header.id,
            domain,
            r#type,
            req.len()
        );

        Ok(req)
    }
}

/// Encodes a query for `domain` using the thread local random generator.
pub fn build_query(domain: &str, r#type: u16) -> Result<Vec<u8>, EncodeError> {
    QueryBuilder::new(rand::thread_rng()).build_query(domain, r#type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;
    use pretty_assertions::assert_eq;
    use rand::rngs::mock::StepRng;
    use std::collections::HashSet;

    #[test]
    fn test_build_query_example() {
        let req = build_query("example.com", Type::A.into()).unwrap();

        let header = Header::from_slice(&req).unwrap();
        assert_eq!(header.num_questions, 1);
        assert_ne!(header.flags & 0x0100, 0);
        assert_eq!(header.flags, Header::RECURSION_DESIRED);
        assert_eq!(header.num_answers, 0);
        assert_eq!(header.num_authorities, 0);
        assert_eq!(header.num_additionals, 0);

        let question = Question::from_slice(&req[Header::LEN..]).unwrap();
        assert_eq!(question, Question::new("example.com", 1, 1));
    }

    #[test]
    fn test_build_query_exact_bytes() {
        // StepRng hands out 0x1234 as the low bits of its first value.
        let mut builder = QueryBuilder::new(StepRng::new(0x1234, 1));
        let req = builder.build_query("example.com", Type::AAAA.into()).unwrap();

        assert_eq!(
            hex::encode(&req),
            "123401000001000000000000076578616d706c6503636f6d00001c0001"
        );
    }

    #[test]
    fn test_build_query_passes_type_through() {
        let mut builder = QueryBuilder::new(StdRng::seed_from_u64(0));
        let req = builder.build_query("example.com", 0xabcd).unwrap();
        let m = Message::from_slice(&req).unwrap();
        assert_eq!(m.questions[0].r#type, 0xabcd);
        assert_eq!(m.questions[0].class, 1);
    }

    #[test]
    fn test_build_query_invalid_name() {
        let mut builder = QueryBuilder::from_entropy();
        assert_eq!(
            builder.build_query("bad..name", 1),
            Err(EncodeError::EmptyLabel("bad..name".to_string()))
        );
    }

    #[test]
    fn test_seeded_builders_agree() {
        let mut a = QueryBuilder::new(StdRng::seed_from_u64(99));
        let mut b = QueryBuilder::new(StdRng::seed_from_u64(99));
        for _ in 0..10 {
            assert_eq!(
                a.build_query("example.com", 1),
                b.build_query("example.com", 1)
            );
        }
    }

    #[test]
    fn test_transaction_ids_look_uniform() {
        let mut builder = QueryBuilder::new(StdRng::seed_from_u64(2021));

        let ids: HashSet<u16> = (0..10_000)
            .map(|_| builder.build_message("example.com", 1).header.id)
            .collect();

        // Drawing 10,000 values uniformly from 65,536 leaves about 9,270
        // distinct values, with a standard deviation of roughly 25.
        assert!(
            ids.len() > 9_100 && ids.len() < 9_450,
            "{} distinct ids",
            ids.len()
        );
    }
}
