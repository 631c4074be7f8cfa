//! Bounded journal of recent normalizations.
//!
//! Users only ever see the friendly sentence. Support screens and bug reports
//! still need the raw backend text that produced it; the journal keeps the
//! most recent pairs in a bounded queue with FIFO eviction.
//!
//! # Design Principles
//!
//! - **Bounded memory**: fixed entry count and per-entry byte cap
//! - **FIFO eviction**: oldest entries dropped first
//! - **Sanitized on write**: control characters neutralized before storage
//! - **RwLock-based**: concurrent readers, exclusive writers; poisoning is
//!   recovered rather than propagated
//!
//! # Example
//!
//! ```rust
//! use friendly_errors::{DiagnosticJournal, MapCatalog, RawError, Translator};
//!
//! let journal = DiagnosticJournal::new(100, 1024);
//! let translator = Translator::new(MapCatalog::new()).with_journal(journal.clone());
//!
//! translator.translate(&RawError::new("SOCKS: Connection refused"), false, &[]);
//!
//! let recent = journal.get_recent(1);
//! assert_eq!(recent[0].raw.as_ref(), "SOCKS: Connection refused");
//! assert_eq!(recent[0].rule.as_deref(), Some("socks_connection_refused"));
//! ```

use crate::envelope::Shape;
use crate::logging::NormalizationLog;
use crate::Stage;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Byte cap for the raw text inside one entry.
const RAW_CAP: usize = 768;

/// Byte cap for the friendly text inside one entry.
const FRIENDLY_CAP: usize = 512;

/// A single journal entry with bounded size.
///
/// `Arc<str>` fields make cloning an entry a handful of refcount increments.
#[derive(Clone, Debug)]
pub struct JournalEntry {
    /// Unix timestamp of recording.
    pub timestamp: u64,
    /// Stage that produced the friendly text.
    pub stage: Stage,
    /// Detected input shape.
    pub shape: Shape,
    /// Matching rule name, if a condition matched.
    pub rule: Option<Arc<str>>,
    /// Context tag that selected an augmentation, if any.
    pub augmentation: Option<Arc<str>>,
    /// Raw backend message, sanitized and truncated.
    pub raw: Arc<str>,
    /// Text shown to the user, sanitized and truncated.
    pub friendly: Arc<str>,
    /// Approximate payload size in bytes.
    pub size_bytes: usize,
}

/// Bounded, shareable journal. Clones share the same entries.
pub struct DiagnosticJournal {
    entries: Arc<RwLock<VecDeque<JournalEntry>>>,
    max_entries: usize,
    max_entry_bytes: usize,
    eviction_count: Arc<AtomicU64>,
}

impl DiagnosticJournal {
    /// Create a journal.
    ///
    /// * `max_entries` - entries kept before FIFO eviction (at least 1)
    /// * `max_entry_bytes` - payload cap per entry
    pub fn new(max_entries: usize, max_entry_bytes: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_entries))),
            max_entries,
            max_entry_bytes,
            eviction_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run `f` under the read lock, recovering from poisoning.
    fn snapshot<T>(&self, f: impl FnOnce(&VecDeque<JournalEntry>) -> T) -> T {
        f(&self.entries.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Record a normalization, evicting the oldest entry if full.
    pub fn record(&self, log: &NormalizationLog<'_>) {
        let entry = self.create_entry(log);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.max_entries {
            entries.pop_front();
            self.eviction_count.fetch_add(1, Ordering::Relaxed);
        }
        entries.push_back(entry);
    }

    fn create_entry(&self, log: &NormalizationLog<'_>) -> JournalEntry {
        let mut remaining = self.max_entry_bytes;

        let raw = sanitize(log.raw(), remaining.min(RAW_CAP));
        remaining = remaining.saturating_sub(raw.len());

        let friendly = sanitize(log.friendly(), remaining.min(FRIENDLY_CAP));
        remaining = remaining.saturating_sub(friendly.len());

        let size_bytes = self.max_entry_bytes - remaining;

        JournalEntry {
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_secs()),
            stage: log.stage(),
            shape: log.shape(),
            rule: log.rule().map(Arc::from),
            augmentation: log.augmentation().map(Arc::from),
            raw: Arc::from(raw.as_ref()),
            friendly: Arc::from(friendly.as_ref()),
            size_bytes,
        }
    }

    /// The `count` most recent entries, newest first.
    pub fn get_recent(&self, count: usize) -> Vec<JournalEntry> {
        self.snapshot(|entries| entries.iter().rev().take(count).cloned().collect())
    }

    /// All entries, newest first.
    pub fn get_all(&self) -> Vec<JournalEntry> {
        self.get_recent(usize::MAX)
    }

    /// Entries matching a predicate, oldest first.
    ///
    /// ```rust
    /// # use friendly_errors::{DiagnosticJournal, Stage};
    /// # let journal = DiagnosticJournal::new(10, 256);
    /// let unrecognized = journal.get_filtered(|e| e.stage == Stage::PassThrough);
    /// ```
    pub fn get_filtered<F>(&self, predicate: F) -> Vec<JournalEntry>
    where
        F: Fn(&JournalEntry) -> bool,
    {
        self.snapshot(|entries| entries.iter().filter(|e| predicate(e)).cloned().collect())
    }

    /// Entries currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.snapshot(|entries| entries.len())
    }

    /// True if nothing has been recorded since creation or the last clear.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum entries held before eviction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// True once the next record will evict.
    pub fn is_full(&self) -> bool {
        self.len() >= self.max_entries
    }

    /// Total evictions since creation.
    #[inline]
    pub fn eviction_count(&self) -> u64 {
        self.eviction_count.load(Ordering::Relaxed)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Clone for DiagnosticJournal {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            max_entries: self.max_entries,
            max_entry_bytes: self.max_entry_bytes,
            eviction_count: Arc::clone(&self.eviction_count),
        }
    }
}

impl std::fmt::Debug for DiagnosticJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticJournal")
            .field("len", &self.len())
            .field("capacity", &self.max_entries)
            .field("max_entry_bytes", &self.max_entry_bytes)
            .field("evictions", &self.eviction_count())
            .finish()
    }
}

/// Neutralize control characters, then cap at `max_bytes`.
fn sanitize(s: &str, max_bytes: usize) -> Cow<'_, str> {
    let cleaned = if s.chars().any(char::is_control) {
        Cow::Owned(s.chars().map(|c| if c.is_control() { '?' } else { c }).collect())
    } else {
        Cow::Borrowed(s)
    };

    match cleaned {
        Cow::Borrowed(b) => truncate_to_bytes(b, max_bytes),
        Cow::Owned(o) => Cow::Owned(truncate_to_bytes(&o, max_bytes).into_owned()),
    }
}

/// Truncate to a maximum byte length on a UTF-8 boundary.
fn truncate_to_bytes(s: &str, max_bytes: usize) -> Cow<'_, str> {
    if max_bytes == 0 {
        return Cow::Borrowed("");
    }
    if s.len() <= max_bytes {
        return Cow::Borrowed(s);
    }

    let indicator = "...[TRUNC]";
    if max_bytes <= indicator.len() {
        return Cow::Borrowed(&indicator[..max_bytes]);
    }
    let max_content = max_bytes - indicator.len();

    let mut idx = max_content;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(indicator);
    }

    let mut out = String::with_capacity(idx + indicator.len());
    out.push_str(&s[..idx]);
    out.push_str(indicator);
    Cow::Owned(out)
}
