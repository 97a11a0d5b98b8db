use minidns::{Header, Message, Question};
use pretty_assertions::assert_eq;
use regex::Regex;
use serde::Deserialize;
use std::fs;

const TEST_DATA_FILENAME: &str = "tests/test_data.yaml";

#[derive(Deserialize)]
struct TestCase {
    // Name of the test case.
    name: String,

    // Hex encoded binary string.
    binary: String,

    // Expected Display output of the error, if decoding should fail.
    #[serde(default)]
    error: Option<String>,

    #[serde(default)]
    header: Option<HeaderCase>,

    #[serde(default)]
    questions: Vec<QuestionCase>,

    // Dig-ish formatted output.
    #[serde(default)]
    string: Option<String>,
}

#[derive(Deserialize)]
struct HeaderCase {
    id: u16,
    flags: u16,
    questions: u16,
    answers: u16,
    authorities: u16,
    additionals: u16,
}

#[derive(Deserialize)]
struct QuestionCase {
    name: String,
    r#type: u16,
    class: u16,
}

#[test]
fn tests() {
    let s = fs::read(TEST_DATA_FILENAME).expect("failed read test input");
    let tests: Vec<TestCase> =
        serde_yaml::from_slice(&s).expect("failed to deserialise test input");

    assert!(!tests.is_empty());
    for case in tests {
        test_from_slice(case);
    }
}

fn normalise_whitespace(s: &str) -> String {
    let re = Regex::new(r"[ ]+").unwrap();
    let lines: Vec<String> = s
        .lines()
        .map(|line| re.replace_all(line.trim_end(), " ").to_string())
        .collect();

    lines.join("\n").trim_end().to_string()
}

fn test_from_slice(case: TestCase) {
    let input = match hex::decode(&case.binary) {
        Err(e) => panic!("{}: Invalid test case input: {}", case.name, e),
        Ok(i) => i,
    };

    let m = match (Message::from_slice(&input), &case.error) {
        (Err(e), Some(want)) => {
            assert_eq!(&e.to_string(), want, "{}: wrong error", case.name);
            return;
        }
        (Ok(_), Some(want)) => panic!("{}: parsed but expected '{}'", case.name, want),
        (Err(e), None) => panic!("{}: Unable to parse: {}", case.name, e),
        (Ok(m), None) => m,
    };

    if let Some(want) = &case.header {
        let want = Header {
            id: want.id,
            flags: want.flags,
            num_questions: want.questions,
            num_answers: want.answers,
            num_authorities: want.authorities,
            num_additionals: want.additionals,
        };
        assert_eq!(m.header, want, "{}: header", case.name);

        // The header codec alone should agree with the full message parse.
        assert_eq!(Header::from_slice(&input), Ok(want), "{}", case.name);
    }

    let want: Vec<Question> = case
        .questions
        .iter()
        .map(|q| Question::new(&q.name, q.r#type, q.class))
        .collect();
    assert_eq!(m.questions, want, "{}: questions", case.name);

    // Record sections are never parsed.
    assert!(m.answers.is_empty());
    assert!(m.authorities.is_empty());
    assert!(m.additionals.is_empty());

    if let Some(want) = &case.string {
        // Normalise the formatted output a little (to allow little whitespace changes).
        let got = normalise_whitespace(&format!("{}", m));
        let want = normalise_whitespace(want);

        assert_eq!(got, want, "{}: Formatted string doesn't match", case.name);
    }
}

#[test]
fn test_first_question_from_stream() {
    // A header followed by one question, read without the Message wrapper.
    let input = hex::decode("abcd81800001000100000000076578616d706c6503636f6d0000010001c00c")
        .expect("invalid hex");

    let header = Header::from_slice(&input).expect("invalid header");
    assert_eq!(header.num_questions, 1);

    let question = Question::from_slice(&input[Header::LEN..]).expect("invalid question");
    assert_eq!(question, Question::new("example.com", 1, 1));
}
