#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate minidns;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must encode, and decode again to the same questions.
    if let Ok(m) = minidns::Message::from_slice(data) {
        if let Ok(buf) = m.to_vec() {
            let again = minidns::Message::from_slice(&buf).expect("re-encoded message must parse");
            assert_eq!(again.questions, m.questions);
        }
    }
});
