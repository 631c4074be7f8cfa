#![no_main]

use friendly_errors::{DiagnosticJournal, MapCatalog, RawError, Translator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let translator = Translator::new(MapCatalog::new()).with_journal(DiagnosticJournal::new(4, 256));
    let err = RawError::new(text);

    for domain in [false, true] {
        let out = translator.normalize(&err, domain, &["Keysend"]);
        assert!(text.is_empty() || !out.friendly().is_empty());

        let mut line = String::new();
        out.log(&err).write_to(&mut line).unwrap();
        assert!(!line.contains('\n'));
    }
});
