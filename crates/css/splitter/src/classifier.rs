//! Assigning top-level rules to width buckets.

use crate::error::SplitError;
use crate::naming::output_identifier;
use crate::planner::Bucket;
use css_media_queries::{WidthCondition, parse_width_condition};
use css_syntax::Rule;
use log::debug;

/// What the classifier needs to know about a rule.
pub trait SplitRule {
    fn is_comment(&self) -> bool;

    /// Condition text when the rule is an `@media` rule.
    fn media_condition(&self) -> Option<&str>;

    /// Pixel width bounds of the rule's media condition, if it has any.
    fn width_condition(&self) -> Option<WidthCondition> {
        self.media_condition().and_then(parse_width_condition)
    }
}

impl SplitRule for Rule {
    #[inline]
    fn is_comment(&self) -> bool {
        Self::is_comment(self)
    }

    #[inline]
    fn media_condition(&self) -> Option<&str> {
        Self::media_condition(self)
    }
}

/// Handling of rules that match no bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmatchedRules {
    /// Leave the rule out of every output.
    #[default]
    Drop,
    /// Fail with [`SplitError::UnclassifiedRule`].
    Reject,
}

/// Rules destined for one output file, in source order.
#[derive(Debug, PartialEq, Eq)]
pub struct OutputGroup<'rule, R> {
    /// `base` or `base.<breakpoint>`, without extension.
    pub identifier: String,
    /// Breakpoint of the bucket, `None` for the base bucket.
    pub breakpoint: Option<u32>,
    pub rules: Vec<&'rule R>,
}

/// Width used to classify each rule. Comments borrow the width of the next
/// non-comment rule so they stay next to the rule they annotate.
fn classification_widths<R: SplitRule>(rules: &[R]) -> Vec<Option<WidthCondition>> {
    let mut widths = vec![None; rules.len()];
    let mut following = None;
    for (slot, rule) in widths.iter_mut().zip(rules).rev() {
        if rule.is_comment() {
            *slot = following;
        } else {
            following = rule.width_condition();
            *slot = following;
        }
    }
    widths
}

pub struct RuleClassifier {
    base_name: String,
    buckets: Vec<Bucket>,
    unmatched: UnmatchedRules,
}

impl RuleClassifier {
    pub fn new(base_name: impl Into<String>, buckets: Vec<Bucket>) -> Self {
        Self {
            base_name: base_name.into(),
            buckets,
            unmatched: UnmatchedRules::default(),
        }
    }

    #[must_use]
    pub const fn with_unmatched(mut self, unmatched: UnmatchedRules) -> Self {
        self.unmatched = unmatched;
        self
    }

    #[inline]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Group `rules` by destination file.
    ///
    /// Every rule is tested against every bucket, so overlapping buckets may
    /// both receive it. Buckets left empty produce no group; groups follow
    /// bucket order.
    ///
    /// # Errors
    /// With [`UnmatchedRules::Reject`], fails on the first rule no bucket
    /// accepts.
    pub fn handle<'rule, R: SplitRule>(
        &self,
        rules: &'rule [R],
    ) -> Result<Vec<OutputGroup<'rule, R>>, SplitError> {
        let widths = classification_widths(rules);
        let mut lists: Vec<Vec<&'rule R>> = vec![Vec::new(); self.buckets.len()];

        for (index, (rule, width)) in rules.iter().zip(widths).enumerate() {
            let mut placed = false;
            for (bucket, list) in self.buckets.iter().zip(lists.iter_mut()) {
                if bucket.matches(width) {
                    list.push(rule);
                    placed = true;
                }
            }
            if placed {
                continue;
            }
            match self.unmatched {
                UnmatchedRules::Drop => {
                    debug!("rule {index} with width {width:?} matches no bucket, dropping it");
                }
                UnmatchedRules::Reject => return Err(SplitError::UnclassifiedRule { index }),
            }
        }

        Ok(self
            .buckets
            .iter()
            .zip(lists)
            .filter(|(_, list)| !list.is_empty())
            .map(|(bucket, list)| OutputGroup {
                identifier: output_identifier(&self.base_name, bucket.suffix),
                breakpoint: bucket.suffix,
                rules: list,
            })
            .collect())
    }
}
