//! Partitioning records by breeder
//!
//! Breeder names are normalized through [`NORMALIZATION_RULES`] before
//! bucketing. Each bucket is sorted by variety; chart legends rely on that
//! order staying stable between renders.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{TrialRecord, PRESTOMECH_HEINZ, UNIGEN_SEEDS, UNKNOWN_BREEDER, WALLER_HEINZ};
use crate::types::MetricFamily;

/// Trial location name of the 50-plant Lakitelek subplot
pub const SUBPLOT_LOCATION: &str = "LAKITELEK - 50 TŐVES";

/// Breeder name → records, keys in ascending order
pub type BreederGroups<R> = BTreeMap<String, Vec<R>>;

/// What the grouper knows about the records being grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingContext<'a> {
    pub family: MetricFamily,
    /// Trial location the records were measured at, when grouping one location
    pub location: Option<&'a str>,
}

impl<'a> GroupingContext<'a> {
    pub fn new(family: MetricFamily) -> Self {
        Self {
            family,
            location: None,
        }
    }

    pub fn at_location(family: MetricFamily, location: &'a str) -> Self {
        Self {
            family,
            location: Some(location),
        }
    }
}

/// One breeder-name normalization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationRule {
    /// Variety codes with this prefix belong to `breeder`, whatever the classifier said
    PrefixOverride {
        prefix: &'static str,
        breeder: &'static str,
    },
    /// An old display name replaced by its current one
    LegacyName {
        from: &'static str,
        to: &'static str,
    },
    /// Unclassified varieties of a metric family belong to a named breeder
    UnknownRemap {
        family: MetricFamily,
        to: &'static str,
    },
    /// At one trial location, one breeder's records are folded into another
    LocationMerge {
        location: &'static str,
        from: &'static str,
        into: &'static str,
    },
}

/// Normalization table, applied top to bottom; each rule sees the previous result
pub const NORMALIZATION_RULES: &[NormalizationRule] = &[
    NormalizationRule::PrefixOverride {
        prefix: "UG",
        breeder: UNIGEN_SEEDS,
    },
    NormalizationRule::LegacyName {
        from: "WALLER + Heinz",
        to: WALLER_HEINZ,
    },
    NormalizationRule::UnknownRemap {
        family: MetricFamily::CumulativeYield,
        to: WALLER_HEINZ,
    },
    NormalizationRule::LocationMerge {
        location: SUBPLOT_LOCATION,
        from: WALLER_HEINZ,
        into: PRESTOMECH_HEINZ,
    },
];

impl NormalizationRule {
    /// The replacement breeder name if this rule fires
    pub fn apply(&self, variety: &str, breeder: &str, context: &GroupingContext<'_>) -> Option<&'static str> {
        match *self {
            NormalizationRule::PrefixOverride { prefix, breeder: target } => {
                variety.starts_with(prefix).then_some(target)
            }
            NormalizationRule::LegacyName { from, to } => (breeder == from).then_some(to),
            NormalizationRule::UnknownRemap { family, to } => {
                (breeder == UNKNOWN_BREEDER && context.family == family).then_some(to)
            }
            NormalizationRule::LocationMerge { location, from, into } => {
                (context.location == Some(location) && breeder == from).then_some(into)
            }
        }
    }
}

/// Run a breeder name through the whole normalization table
pub fn normalize_breeder(variety: &str, breeder: &str, context: &GroupingContext<'_>) -> String {
    let mut current = breeder.to_string();
    for rule in NORMALIZATION_RULES {
        if let Some(replacement) = rule.apply(variety, &current, context) {
            current = replacement.to_string();
        }
    }
    current
}

/// Partition records into breeder buckets.
///
/// Returns a fresh mapping; the input is left untouched. An empty input
/// yields an empty mapping.
pub fn group<R>(records: &[R], context: &GroupingContext<'_>) -> BreederGroups<R>
where
    R: TrialRecord + Clone,
{
    let mut groups: BreederGroups<R> = BTreeMap::new();

    for record in records {
        let breeder = normalize_breeder(record.variety(), record.breeder(), context);
        let mut record = record.clone();
        record.set_breeder(breeder.clone());
        groups.entry(breeder).or_default().push(record);
    }

    for bucket in groups.values_mut() {
        // Stable: equal varieties keep input order
        bucket.sort_by(|a, b| locale_cmp(a.variety(), b.variety()));
    }

    groups
}

/// Concatenate buckets back into one list, in key order
pub fn flatten<R: Clone>(groups: &BreederGroups<R>) -> Vec<R> {
    groups.values().flat_map(|bucket| bucket.iter().cloned()).collect()
}

/// Punctuation and symbols in root collation order; all sort before digits
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Primary collation weight: whitespace, punctuation, digits, then letters
fn primary_weight(c: char) -> (u8, u32) {
    let folded = fold_char(c);
    if folded.is_whitespace() {
        (0, folded as u32)
    } else if let Some(index) = PUNCTUATION_ORDER.find(folded) {
        (1, index as u32)
    } else if !folded.is_alphanumeric() {
        (1, 0x100 + folded as u32)
    } else if folded.is_numeric() {
        (2, folded as u32)
    } else {
        (3, folded as u32)
    }
}

/// Locale-aware string order: accent- and case-insensitive first, then
/// accents, then lowercase before uppercase. Punctuation follows the root
/// collation (`-` before `*`) and sorts ahead of digits and letters.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let base = |s: &str| s.chars().map(primary_weight).collect::<Vec<_>>();
    let accent = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<char>>();
    let case = |s: &str| s.chars().map(|c| (c.is_uppercase(), c)).collect::<Vec<_>>();

    base(a)
        .cmp(&base(b))
        .then_with(|| accent(a).cmp(&accent(b)))
        .then_with(|| case(a).cmp(&case(b)))
}

fn fold_char(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'á' | 'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'ő' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ű' => 'u',
        other => other,
    }
}
