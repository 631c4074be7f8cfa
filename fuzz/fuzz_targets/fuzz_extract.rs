#![no_main]

use friendly_errors::{detect_shape, extract, humanize_identifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let extracted = extract(text);
    assert_eq!(extracted.shape(), detect_shape(text));
    if !extracted.shape().is_envelope() {
        assert_eq!(extracted.text(), text);
    }

    if let Some(words) = humanize_identifier(extracted.text()) {
        assert!(!words.is_empty());
        assert_eq!(humanize_identifier(&words), None);
    }
});
