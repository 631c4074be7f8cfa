//! Known-condition table and matcher.
//!
//! A [`KnownConditionTable`] is an ordered list of [`KnownCondition`]s. Each
//! condition pairs a [`Matcher`] with an [`Outcome`] and, optionally, a list of
//! context [`Augmentation`]s. Lookup walks the table front to back and the
//! first hit wins.
//!
//! # Ordering Invariant
//!
//! Substring needles can contain one another. A specific needle MUST precede
//! any generic needle it contains, otherwise the generic entry swallows it.
//! [`KnownConditionTable::checked_new`] rejects tables where a later condition
//! can never fire because an earlier needle is a substring of all of its own
//! needles, or of its exact identifier.
//!
//! # Matching Domains
//!
//! - [`Matcher::Exact`] only participates when the caller declares the input to
//!   be a failure-reason identifier.
//! - [`Matcher::Contains`] always participates and matches if ANY of its
//!   needles occurs in the text. Multiple needles let one condition absorb
//!   spelling variants shipped by different backend versions.
//!
//! # Example
//!
//! ```rust
//! use friendly_errors::{KnownCondition, KnownConditionTable, Outcome};
//!
//! const TABLE: &[KnownCondition] = &[
//!     KnownCondition::contains("disk_full", &["No space left"], Outcome::Literal("Your device is out of storage.")),
//! ];
//!
//! let table = KnownConditionTable::checked_new(TABLE.to_vec()).unwrap();
//! let hit = table.find("write failed: No space left on device", false, &[]).unwrap();
//! assert_eq!(hit.condition().name(), "disk_full");
//! ```

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// Matcher / Outcome / Augmentation
// ============================================================================

/// How a condition recognizes its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Whole-text, case-sensitive equality with a failure-reason identifier.
    Exact(&'static str),
    /// Substring containment of any listed needle.
    Contains(&'static [&'static str]),
}

impl Matcher {
    /// Test `text` against this matcher.
    #[inline]
    pub fn matches(&self, text: &str, is_identifier_domain: bool) -> bool {
        match self {
            Self::Exact(identifier) => is_identifier_domain && text == *identifier,
            Self::Contains(needles) => needles.iter().any(|needle| text.contains(needle)),
        }
    }

    /// Every needle this matcher tests.
    #[inline]
    pub fn needles(&self) -> &[&'static str] {
        match self {
            Self::Exact(identifier) => std::slice::from_ref(identifier),
            Self::Contains(needles) => *needles,
        }
    }

    const fn is_well_formed(&self) -> bool {
        match self {
            Self::Exact(identifier) => !identifier.is_empty(),
            Self::Contains(needles) => {
                if needles.is_empty() {
                    return false;
                }
                let mut i = 0;
                while i < needles.len() {
                    if needles[i].is_empty() {
                        return false;
                    }
                    i += 1;
                }
                true
            }
        }
    }
}

/// What a matched condition resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Resolve through the translation catalog.
    Key(&'static str),
    /// Use this text verbatim.
    Literal(&'static str),
}

impl Outcome {
    /// Resolve to display text.
    #[inline]
    pub fn resolve<'c, C>(&self, catalog: &'c C) -> Cow<'c, str>
    where
        C: crate::TranslationCatalog + ?Sized,
    {
        match self {
            Self::Key(key) => catalog.lookup(key),
            Self::Literal(text) => Cow::Borrowed(*text),
        }
    }
}

/// A context-specific sentence appended after the base outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Augmentation {
    tag: &'static str,
    outcome: Outcome,
}

impl Augmentation {
    /// Append `outcome` when `tag` is among the caller's context tags.
    pub const fn new(tag: &'static str, outcome: Outcome) -> Self {
        assert!(!tag.is_empty(), "Augmentation tag must not be empty");
        Self { tag, outcome }
    }

    /// Context tag this augmentation recognizes.
    #[inline]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Text appended on recognition.
    #[inline]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}

// ============================================================================
// Known Condition
// ============================================================================

/// One row of the condition table.
///
/// Construct with the const constructors so malformed rows fail the build:
///
/// ```rust,compile_fail
/// use friendly_errors::{KnownCondition, Outcome};
/// const BAD: KnownCondition = KnownCondition::contains("bad", &[""], Outcome::Literal("x"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownCondition {
    name: &'static str,
    matcher: Matcher,
    outcome: Outcome,
    augmentations: &'static [Augmentation],
}

impl KnownCondition {
    /// Condition recognized by exact identifier equality.
    pub const fn exact(name: &'static str, identifier: &'static str, outcome: Outcome) -> Self {
        Self::const_new(name, Matcher::Exact(identifier), outcome)
    }

    /// Condition recognized by substring containment of any needle.
    pub const fn contains(
        name: &'static str,
        needles: &'static [&'static str],
        outcome: Outcome,
    ) -> Self {
        Self::const_new(name, Matcher::Contains(needles), outcome)
    }

    /// Generic const constructor.
    ///
    /// # Panics
    ///
    /// At compile time in const contexts (at runtime otherwise) if `name` is
    /// empty or the matcher has no needles or an empty needle.
    pub const fn const_new(name: &'static str, matcher: Matcher, outcome: Outcome) -> Self {
        assert!(!name.is_empty(), "Condition name must not be empty");
        assert!(matcher.is_well_formed(), "Condition matcher needs non-empty needles");
        Self {
            name,
            matcher,
            outcome,
            augmentations: &[],
        }
    }

    /// Attach context augmentations, scanned in the given order.
    pub const fn with_augmentations(mut self, augmentations: &'static [Augmentation]) -> Self {
        self.augmentations = augmentations;
        self
    }

    /// Stable rule name, used in logs and the diagnostic journal.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// How the condition recognizes text.
    #[inline]
    pub const fn matcher(&self) -> Matcher {
        self.matcher
    }

    /// Base outcome when matched.
    #[inline]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Context augmentations, in priority order.
    #[inline]
    pub const fn augmentations(&self) -> &'static [Augmentation] {
        self.augmentations
    }

    /// First augmentation whose tag appears in `context_tags`.
    ///
    /// Tags the condition does not recognize are ignored.
    pub fn augmentation_for(&self, context_tags: &[&str]) -> Option<&'static Augmentation> {
        let augmentations: &'static [Augmentation] = self.augmentations;
        augmentations
            .iter()
            .find(|aug| context_tags.contains(&aug.tag))
    }
}

// ============================================================================
// Match Result
// ============================================================================

/// A condition hit, with the augmentation selected for the caller's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionMatch {
    condition: KnownCondition,
    augmentation: Option<&'static Augmentation>,
}

impl ConditionMatch {
    /// The condition that matched.
    #[inline]
    pub const fn condition(&self) -> &KnownCondition {
        &self.condition
    }

    /// The augmentation selected by context, if any.
    #[inline]
    pub const fn augmentation(&self) -> Option<&'static Augmentation> {
        self.augmentation
    }

    /// Render the friendly text.
    ///
    /// The base outcome is followed by the augmentation, separated by a single
    /// space. Returns `None` when the catalog yields empty base text.
    pub fn render<C>(&self, catalog: &C) -> Option<String>
    where
        C: crate::TranslationCatalog + ?Sized,
    {
        let base = self.condition.outcome.resolve(catalog);
        if base.is_empty() {
            return None;
        }

        let Some(augmentation) = self.augmentation else {
            return Some(base.into_owned());
        };

        let extra = augmentation.outcome.resolve(catalog);
        if extra.is_empty() {
            return Some(base.into_owned());
        }

        let mut out = String::with_capacity(base.len() + 1 + extra.len());
        out.push_str(&base);
        out.push(' ');
        out.push_str(&extra);
        Some(out)
    }
}

// ============================================================================
// Table
// ============================================================================

/// Ordered, first-match-wins table of known conditions.
#[derive(Debug, Clone)]
pub struct KnownConditionTable {
    conditions: Cow<'static, [KnownCondition]>,
}

impl KnownConditionTable {
    /// The table shipped with this crate. See [`crate::definitions`].
    #[inline]
    pub const fn builtin() -> Self {
        Self {
            conditions: Cow::Borrowed(crate::definitions::BUILTIN_CONDITIONS),
        }
    }

    /// Build a table from runtime-assembled conditions, validating ordering.
    ///
    /// # Errors
    ///
    /// See [`ConditionTableError`].
    pub fn checked_new(conditions: Vec<KnownCondition>) -> Result<Self, ConditionTableError> {
        validate(&conditions)?;
        Ok(Self {
            conditions: Cow::Owned(conditions),
        })
    }

    /// Validate a static table without copying it.
    ///
    /// # Errors
    ///
    /// See [`ConditionTableError`].
    pub fn checked_static(conditions: &'static [KnownCondition]) -> Result<Self, ConditionTableError> {
        validate(conditions)?;
        Ok(Self {
            conditions: Cow::Borrowed(conditions),
        })
    }

    /// Conditions in priority order.
    #[inline]
    pub fn conditions(&self) -> &[KnownCondition] {
        &self.conditions
    }

    /// Number of conditions.
    #[inline]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// True if the table has no conditions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// First condition matching `text`, with its context augmentation.
    ///
    /// Exact conditions participate only when `is_identifier_domain` is set.
    pub fn find(
        &self,
        text: &str,
        is_identifier_domain: bool,
        context_tags: &[&str],
    ) -> Option<ConditionMatch> {
        self.conditions
            .iter()
            .find(|c| c.matcher.matches(text, is_identifier_domain))
            .map(|c| ConditionMatch {
                condition: *c,
                augmentation: c.augmentation_for(context_tags),
            })
    }
}

impl Default for KnownConditionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(conditions: &[KnownCondition]) -> Result<(), ConditionTableError> {
    if conditions.is_empty() {
        return Err(ConditionTableError::EmptyTable);
    }

    for (index, condition) in conditions.iter().enumerate() {
        if condition.matcher.needles().is_empty()
            || condition.matcher.needles().iter().any(|n| n.is_empty())
        {
            return Err(ConditionTableError::EmptyNeedle {
                condition: condition.name,
            });
        }
        if condition.augmentations.iter().any(|a| a.tag.is_empty()) {
            return Err(ConditionTableError::EmptyTag {
                condition: condition.name,
            });
        }

        for earlier in &conditions[..index] {
            if let Some(violation) = shadowing(earlier, condition) {
                return Err(violation);
            }
        }
    }
    Ok(())
}

/// Violation if `earlier` makes `later` unreachable.
fn shadowing(earlier: &KnownCondition, later: &KnownCondition) -> Option<ConditionTableError> {
    match (earlier.matcher, later.matcher) {
        (Matcher::Exact(a), Matcher::Exact(b)) if a == b => {
            Some(ConditionTableError::DuplicateIdentifier {
                identifier: a,
                first: earlier.name,
                second: later.name,
            })
        }
        (Matcher::Contains(needles), Matcher::Exact(identifier))
            if needles.iter().any(|n| identifier.contains(n)) =>
        {
            Some(ConditionTableError::ShadowedCondition {
                earlier: earlier.name,
                later: later.name,
            })
        }
        (Matcher::Contains(shorter), Matcher::Contains(longer)) => {
            let all_covered = longer
                .iter()
                .all(|l| shorter.iter().any(|s| l.contains(s)));
            all_covered.then_some(ConditionTableError::ShadowedCondition {
                earlier: earlier.name,
                later: later.name,
            })
        }
        _ => None,
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Reasons a condition table is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionTableError {
    /// The table has no conditions.
    EmptyTable,
    /// A matcher has no needles or an empty needle.
    EmptyNeedle {
        /// Offending condition.
        condition: &'static str,
    },
    /// An augmentation has an empty tag.
    EmptyTag {
        /// Offending condition.
        condition: &'static str,
    },
    /// Two exact conditions claim the same identifier.
    DuplicateIdentifier {
        /// Identifier claimed twice.
        identifier: &'static str,
        /// Condition that wins.
        first: &'static str,
        /// Condition that can never fire.
        second: &'static str,
    },
    /// Every needle of `later` (or its identifier) contains a needle of
    /// `earlier`, so `later` can never match.
    ShadowedCondition {
        /// Condition that wins.
        earlier: &'static str,
        /// Condition that can never fire.
        later: &'static str,
    },
}

impl fmt::Display for ConditionTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTable => f.write_str("condition table is empty"),
            Self::EmptyNeedle { condition } => {
                write!(f, "condition '{}' has an empty matcher needle", condition)
            }
            Self::EmptyTag { condition } => {
                write!(f, "condition '{}' has an augmentation with an empty tag", condition)
            }
            Self::DuplicateIdentifier {
                identifier,
                first,
                second,
            } => write!(
                f,
                "identifier {} is claimed by both '{}' and '{}'",
                identifier, first, second
            ),
            Self::ShadowedCondition { earlier, later } => write!(
                f,
                "condition '{}' is unreachable: every needle contains a needle of earlier condition '{}'",
                later, earlier
            ),
        }
    }
}

impl std::error::Error for ConditionTableError {}
