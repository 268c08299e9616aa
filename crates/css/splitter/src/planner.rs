//! Width buckets derived from a breakpoint list.
//!
//! For breakpoints `[b0, .., bn-1]` the planner yields n + 1 buckets:
//!
//! | bucket | suffix | predicates |
//! |---|---|---|
//! | base | none | `NoWidthCondition`, `WidthRange { min_until: b0 - 1 }` |
//! | `bi` | `bi` | `WidthRange { min: bi, min_until: bi+1 - 1 }` |
//! | `bn-1` | `bn-1` | `WidthRange { min: bn-1 }` |
//!
//! Lower bounds are inclusive and `min_until` is a strict upper test, so a
//! rule whose `min-width` equals a breakpoint lands in the bucket starting at
//! that breakpoint.

use crate::breakpoints::Breakpoints;
use css_media_queries::WidthCondition;

/// Numeric bounds tested against a rule's width condition. An absent bound
/// always passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidthRange {
    /// The rule's `min-width` must be present and at least this.
    pub min: Option<u32>,
    /// The rule's `min-width`, when present, must be below this.
    pub min_until: Option<u32>,
    /// The rule's `max-width`, when present, must be below this.
    pub max: Option<u32>,
}

impl WidthRange {
    pub fn contains(&self, width: WidthCondition) -> bool {
        let meets_min = self
            .min
            .is_none_or(|min| width.min.is_some_and(|rule_min| rule_min >= min));
        let meets_min_until = match (self.min_until, width.min) {
            (Some(until), Some(rule_min)) => rule_min < until,
            _ => true,
        };
        let meets_max = match (self.max, width.max) {
            (Some(max), Some(rule_max)) => rule_max < max,
            _ => true,
        };
        meets_min && meets_min_until && meets_max
    }
}

/// A test deciding whether a rule belongs in a bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaPredicate {
    /// Matches every rule.
    All,
    /// Matches rules without a width condition.
    NoWidthCondition,
    /// Matches width-conditioned rules inside the range.
    WidthRange(WidthRange),
}

impl MediaPredicate {
    pub fn matches(&self, width: Option<WidthCondition>) -> bool {
        match self {
            Self::All => true,
            Self::NoWidthCondition => width.is_none(),
            Self::WidthRange(range) => width.is_some_and(|condition| range.contains(condition)),
        }
    }
}

/// One output partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    /// `None` for the unconditioned base bucket, otherwise its breakpoint.
    pub suffix: Option<u32>,
    /// Tested in order; the first match places the rule.
    pub predicates: Vec<MediaPredicate>,
}

impl Bucket {
    /// Whether any predicate accepts a rule with this width condition.
    pub fn matches(&self, width: Option<WidthCondition>) -> bool {
        self.predicates
            .iter()
            .any(|predicate| predicate.matches(width))
    }

    /// The first width range among the predicates.
    pub fn width_range(&self) -> Option<WidthRange> {
        self.predicates.iter().find_map(|predicate| match predicate {
            MediaPredicate::WidthRange(range) => Some(*range),
            MediaPredicate::All | MediaPredicate::NoWidthCondition => None,
        })
    }
}

/// Compute the bucket chain for a breakpoint list, smallest range first.
pub fn plan(breakpoints: &Breakpoints) -> Vec<Bucket> {
    let widths = breakpoints.as_slice();
    let sentinel = breakpoints.smallest().saturating_sub(1);

    let mut buckets = Vec::with_capacity(widths.len() + 1);
    buckets.push(Bucket {
        suffix: None,
        predicates: vec![
            MediaPredicate::NoWidthCondition,
            MediaPredicate::WidthRange(WidthRange {
                min_until: Some(sentinel),
                ..WidthRange::default()
            }),
        ],
    });
    for (index, &width) in widths.iter().enumerate() {
        let min_until = widths.get(index + 1).map(|next| next.saturating_sub(1));
        buckets.push(Bucket {
            suffix: Some(width),
            predicates: vec![MediaPredicate::WidthRange(WidthRange {
                min: Some(width),
                min_until,
                max: None,
            })],
        });
    }
    buckets
}
