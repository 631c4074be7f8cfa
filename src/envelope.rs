//! Shape detection and message extraction.
//!
//! Backend errors arrive as a single text field that may carry any of:
//!
//! - a flat JSON envelope: `{"code":2,"message":"...","details":[]}`
//! - a nested JSON envelope: `{"error":{"code":2,"message":"...","details":[]}}`
//! - a native panic diagnostic: ``called `Result::unwrap()` on an `Err` value: ...``
//! - a bare identifier: `FAILURE_REASON_NO_ROUTE`, `ChannelExpiryBlocksTooHigh`
//! - anything else (free text)
//!
//! # Extraction Rules
//!
//! At most one structural unwrap is performed. A top-level `message` string
//! wins over `error.message`; deeper nesting is never followed, and a `message`
//! that itself looks like JSON is NOT re-parsed.
//!
//! Extraction is total. Parse failures, non-object documents, non-string
//! `message` fields and empty messages are all shape misses: the raw text is
//! returned untouched.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Signatures of Rust panic / unwrap diagnostics surfaced by the embedded
/// native subsystems.
const PANIC_SIGNATURES: &[&str] = &[
    "called `Result::unwrap()` on an `Err` value",
    "called `Option::unwrap()` on a `None` value",
    "panicked at",
];

/// Detected shape of a raw error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// JSON object with a top-level string `message`.
    FlatEnvelope,
    /// JSON object whose `error` object carries a string `message`.
    NestedEnvelope,
    /// Rust panic or unwrap diagnostic, possibly wrapped in other text.
    PanicDiagnostic,
    /// Single token made of ASCII letters, digits and underscores.
    Identifier,
    /// Anything else.
    FreeText,
}

impl Shape {
    /// Short label for structured logs.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FlatEnvelope => "flat_envelope",
            Self::NestedEnvelope => "nested_envelope",
            Self::PanicDiagnostic => "panic_diagnostic",
            Self::Identifier => "identifier",
            Self::FreeText => "free_text",
        }
    }

    /// True for both envelope shapes.
    #[inline]
    pub const fn is_envelope(self) -> bool {
        matches!(self, Self::FlatEnvelope | Self::NestedEnvelope)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of extraction: the text to match against plus the shape it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'a> {
    text: Cow<'a, str>,
    shape: Shape,
}

impl<'a> Extracted<'a> {
    /// Text selected for matching. Borrowed unless an envelope was unwrapped.
    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_ref()
    }

    /// Detected shape.
    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Take ownership of the selected text.
    #[inline]
    pub fn into_text(self) -> Cow<'a, str> {
        self.text
    }
}

/// Detect the shape of `raw` and select the text to match against.
///
/// ```rust
/// use friendly_errors::envelope::{extract, Shape};
///
/// let nested = extract(r#"{"error":{"code":2,"message":"invoice is already paid","details":[]}}"#);
/// assert_eq!(nested.text(), "invoice is already paid");
/// assert_eq!(nested.shape(), Shape::NestedEnvelope);
///
/// let plain = extract("Payment timed out");
/// assert_eq!(plain.text(), "Payment timed out");
/// assert_eq!(plain.shape(), Shape::FreeText);
/// ```
pub fn extract(raw: &str) -> Extracted<'_> {
    if let Some((message, shape)) = unwrap_envelope(raw) {
        return Extracted {
            text: Cow::Owned(message),
            shape,
        };
    }

    Extracted {
        text: Cow::Borrowed(raw),
        shape: classify_text(raw),
    }
}

/// Shape of `raw` without keeping the extracted text.
#[inline]
pub fn detect_shape(raw: &str) -> Shape {
    extract(raw).shape()
}

/// One structural unwrap attempt. `None` means "no envelope shape".
fn unwrap_envelope(raw: &str) -> Option<(String, Shape)> {
    // Cheap pre-check: serde_json would reject these anyway.
    if !raw.trim_start().starts_with('{') {
        return None;
    }

    let Value::Object(mut root) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };

    if let Some(message) = take_message(&mut root) {
        return Some((message, Shape::FlatEnvelope));
    }

    match root.get_mut("error") {
        Some(Value::Object(inner)) => {
            take_message(inner).map(|message| (message, Shape::NestedEnvelope))
        }
        _ => None,
    }
}

fn take_message(object: &mut serde_json::Map<String, Value>) -> Option<String> {
    match object.remove("message") {
        Some(Value::String(message)) if !message.is_empty() => Some(message),
        _ => None,
    }
}

fn classify_text(raw: &str) -> Shape {
    if PANIC_SIGNATURES.iter().any(|sig| raw.contains(sig)) {
        Shape::PanicDiagnostic
    } else if is_identifier_token(raw) {
        Shape::Identifier
    } else {
        Shape::FreeText
    }
}

fn is_identifier_token(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
