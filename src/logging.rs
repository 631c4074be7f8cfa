//! Structured record of one normalization for internal diagnostics.
//!
//! # Properties
//!
//! - Borrows from the [`RawError`] and [`Normalization`] that produced it
//! - CANNOT outlive either of them
//! - NO heap allocations in accessors or in [`NormalizationLog::write_to`]
//! - Every field is length-bounded and control characters are neutralized on
//!   output, so hostile backend text cannot forge log lines
//!
//! Raw backend text is for support staff, never for the end user. The short
//! lifetime keeps it from drifting into places that outlive the error.

use crate::envelope::Shape;
use crate::{Normalization, RawError, Stage};
use std::borrow::Cow;
use std::fmt;

/// Maximum length for any individual field in formatted output.
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Borrowed view over a finished normalization.
///
/// # Example
///
/// ```rust
/// use friendly_errors::{RawError, Translator};
///
/// let translator = Translator::new(|key: &str| key.to_owned());
/// let err = RawError::new("SOCKS: Connection refused");
/// let outcome = translator.normalize(&err, false, &[]);
///
/// let mut line = String::new();
/// outcome.log(&err).write_to(&mut line).unwrap();
/// assert!(line.contains("stage=diagnostic"));
/// assert!(line.contains("rule=socks_connection_refused"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NormalizationLog<'a> {
    /// Diagnostic label of the raw error.
    pub name: Option<&'a str>,
    /// Raw backend message.
    pub raw: &'a str,
    /// Text shown to the user.
    pub friendly: &'a str,
    /// Terminating stage.
    pub stage: Stage,
    /// Detected input shape.
    pub shape: Shape,
    /// Matching rule name.
    pub rule: Option<&'static str>,
    /// Context tag that selected an augmentation.
    pub augmentation: Option<&'static str>,
}

impl<'a> NormalizationLog<'a> {
    pub(crate) fn new(error: &'a RawError, outcome: &'a Normalization) -> Self {
        Self {
            name: error.name(),
            raw: error.message(),
            friendly: outcome.friendly(),
            stage: outcome.stage(),
            shape: outcome.shape(),
            rule: outcome.rule(),
            augmentation: outcome.augmentation(),
        }
    }

    /// Stage that produced the friendly text.
    #[inline]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Detected input shape.
    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Matching rule name, if any.
    #[inline]
    pub const fn rule(&self) -> Option<&'static str> {
        self.rule
    }

    /// Context tag that selected an augmentation, if any.
    #[inline]
    pub const fn augmentation(&self) -> Option<&'static str> {
        self.augmentation
    }

    /// Raw backend message. Internal use only.
    #[inline]
    pub const fn raw(&self) -> &'a str {
        self.raw
    }

    /// Text shown to the user.
    #[inline]
    pub const fn friendly(&self) -> &'a str {
        self.friendly
    }

    /// Diagnostic label, if any.
    #[inline]
    pub const fn name(&self) -> Option<&'a str> {
        self.name
    }

    /// True if the user sees something other than the raw text.
    #[inline]
    pub fn was_rewritten(&self) -> bool {
        self.friendly != self.raw
    }

    /// Write the record to a formatter without allocating.
    ///
    /// Format:
    /// `stage=<stage> shape=<shape> [rule=<rule>] [context=<tag>] [name='<name>'] raw='<raw>'`
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "stage={} shape={}", self.stage, self.shape)?;

        if let Some(rule) = self.rule {
            write!(f, " rule={}", rule)?;
        }
        if let Some(tag) = self.augmentation {
            write!(f, " context={}", tag)?;
        }
        if let Some(name) = self.name {
            f.write_str(" name='")?;
            write_bounded(f, name)?;
            f.write_char('\'')?;
        }

        f.write_str(" raw='")?;
        write_bounded(f, self.raw)?;
        f.write_char('\'')
    }

    /// Materialize the record including the friendly text.
    ///
    /// Only available with BOTH the `trusted_debug` feature and debug
    /// assertions, so it cannot ship in a release build by accident.
    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    pub fn format_for_trusted_debug(&self) -> String {
        let mut output = String::new();
        let _ = self.write_to(&mut output);
        output.push_str(" friendly='");
        output.push_str(&truncate_with_indicator(self.friendly));
        output.push('\'');
        output
    }
}

impl fmt::Display for NormalizationLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Write `s` truncated to the field limit, control characters replaced by `?`.
fn write_bounded(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    for c in truncate_with_indicator(s).chars() {
        f.write_char(if c.is_control() { '?' } else { c })?;
    }
    Ok(())
}

/// Truncate a string for output, marking the cut.
///
/// Returns `Cow::Borrowed` when no truncation is needed.
pub(crate) fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
