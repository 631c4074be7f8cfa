//! Keep raw backend text for a support screen while users see friendly text.
//!
//! Run with: `cargo run --example support_journal`

use friendly_errors::{DiagnosticJournal, MapCatalog, RawError, Stage, Translator};

fn main() {
    let journal = DiagnosticJournal::new(32, 1024);
    let translator = Translator::new(MapCatalog::new()).with_journal(journal.clone());

    for message in [
        "SOCKS: Connection refused",
        "Error: Failed to connect to /10.0.0.2:10009",
        "InvoiceAlreadyPaid",
        "peer sent unexpected\nmessage type 0x21",
    ] {
        let text = translator.translate(&RawError::with_name("GrpcError", message), false, &[]);
        println!("user sees: {}", text);
    }

    println!();
    println!("support view ({} entries):", journal.len());
    for entry in journal.get_all() {
        println!(
            "  {} {:<10} rule={:<26} raw='{}'",
            entry.timestamp,
            entry.stage,
            entry.rule.as_deref().unwrap_or("-"),
            entry.raw
        );
    }

    let unrecognized = journal.get_filtered(|e| e.stage == Stage::PassThrough);
    println!();
    println!("{} message(s) had no friendly rewrite", unrecognized.len());
}
