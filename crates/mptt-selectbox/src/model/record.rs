//! Option records and tree ordering.
//!
//! An [`OptionRecord`] is one cached entry of a selector. Records are kept in
//! MPTT document order: by tree id first, then by left value, so that nodes
//! of several independent trees sharing one control stay grouped and each
//! tree reads top-down.

use std::cmp::Ordering;
use std::fmt;

use super::control::ControlOption;
use crate::config::SelectorConfig;

/// An ordering key as read from an option attribute.
///
/// The raw attribute text is kept verbatim so it can be written back on
/// redisplay. Its integer interpretation takes the leading integer of the
/// text (`"12px"` is 12); text without one has no value and is unorderable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrderKey {
    raw: String,
    value: Option<i64>,
}

impl OrderKey {
    /// Creates a key from raw attribute text.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = parse_leading_int(&raw);
        Self { raw, value }
    }

    /// Creates a key for a missing attribute.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Returns the raw attribute text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the integer value, if the text has one.
    pub fn value(&self) -> Option<i64> {
        self.value
    }

    /// Returns `true` if this key can take part in ordering comparisons.
    pub fn is_orderable(&self) -> bool {
        self.value.is_some()
    }
}

impl From<i64> for OrderKey {
    fn from(value: i64) -> Self {
        Self {
            raw: value.to_string(),
            value: Some(value),
        }
    }
}

impl From<i32> for OrderKey {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<&str> for OrderKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for OrderKey {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parses the leading integer of `raw`: optional whitespace, optional sign,
/// then ASCII digits up to the first non-digit.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Result of comparing two records in tree order.
///
/// Unlike [`Ordering`], a comparison involving a key without an integer
/// value is reported as [`TreeOrdering::Unorderable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOrdering {
    /// The left record comes first.
    Less,
    /// Both records have the same position.
    Equal,
    /// The left record comes last.
    Greater,
    /// At least one of the keys needed for the comparison is malformed.
    Unorderable,
}

impl TreeOrdering {
    /// Converts to a total [`Ordering`], treating unorderable as equal.
    pub fn to_ordering(self) -> Ordering {
        match self {
            Self::Less => Ordering::Less,
            Self::Greater => Ordering::Greater,
            Self::Equal | Self::Unorderable => Ordering::Equal,
        }
    }

    /// Returns `true` for [`TreeOrdering::Unorderable`].
    pub fn is_unorderable(self) -> bool {
        self == Self::Unorderable
    }
}

impl From<Ordering> for TreeOrdering {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Less,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::Greater,
        }
    }
}

/// One entry in a selector cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRecord {
    /// Opaque identifier, unique within one cache.
    pub value: String,
    /// Display label.
    pub text: String,
    /// Whether the record is rendered in the bound control.
    pub displayed: bool,
    /// Tree the node belongs to.
    pub tree_id: OrderKey,
    /// Pre-order left bound of the node within its tree.
    pub left_val: OrderKey,
}

impl OptionRecord {
    /// Creates a displayed record.
    pub fn new(
        value: impl Into<String>,
        text: impl Into<String>,
        tree_id: impl Into<OrderKey>,
        left_val: impl Into<OrderKey>,
    ) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            displayed: true,
            tree_id: tree_id.into(),
            left_val: left_val.into(),
        }
    }

    /// Builds a displayed record from a control option, reading the tree
    /// metadata from the attributes named in `config`.
    pub fn from_control_option(option: &ControlOption, config: &SelectorConfig) -> Self {
        let key = |name: &str| {
            option
                .attribute(name)
                .map(OrderKey::new)
                .unwrap_or_else(OrderKey::missing)
        };
        Self {
            value: option.value.clone(),
            text: option.text.clone(),
            displayed: true,
            tree_id: key(&config.tree_id_attribute),
            left_val: key(&config.left_value_attribute),
        }
    }

    /// Creates an unselected control option carrying this record's tree
    /// metadata.
    pub fn to_control_option(&self, config: &SelectorConfig) -> ControlOption {
        ControlOption::new(self.value.clone(), self.text.clone())
            .with_attribute(config.tree_id_attribute.clone(), self.tree_id.as_str())
            .with_attribute(config.left_value_attribute.clone(), self.left_val.as_str())
    }

    /// Returns `(tree_id, left_val)` when both keys are orderable.
    pub fn sort_key(&self) -> Option<(i64, i64)> {
        Some((self.tree_id.value()?, self.left_val.value()?))
    }

    /// Compares two records in tree order.
    pub fn tree_order(&self, other: &Self) -> TreeOrdering {
        let (Some(a), Some(b)) = (self.tree_id.value(), other.tree_id.value()) else {
            return TreeOrdering::Unorderable;
        };
        match a.cmp(&b) {
            Ordering::Equal => match (self.left_val.value(), other.left_val.value()) {
                (Some(a), Some(b)) => a.cmp(&b).into(),
                _ => TreeOrdering::Unorderable,
            },
            ordering => ordering.into(),
        }
    }
}

/// Stable-sorts records by `(tree_id, left_val)`.
///
/// Records whose comparison is unorderable keep their relative position.
/// When every key is well formed the standard library's stable sort is used;
/// otherwise the comparator is not a total order (std sorts may panic on
/// those), so an insertion sort moves each record left only past neighbours
/// that are strictly greater.
pub fn sort_tree_order(records: &mut [OptionRecord]) {
    if records.iter().all(|record| record.sort_key().is_some()) {
        records.sort_by_key(OptionRecord::sort_key);
        return;
    }

    for i in 1..records.len() {
        let mut j = i;
        while j > 0 && records[j - 1].tree_order(&records[j]) == TreeOrdering::Greater {
            records.swap(j - 1, j);
            j -= 1;
        }
    }
}
