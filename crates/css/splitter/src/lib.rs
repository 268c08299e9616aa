//! Splitting a stylesheet into per-viewport-width stylesheets.
//!
//! A breakpoint list is turned into a chain of width buckets by [`plan`].
//! [`RuleClassifier::handle`] then assigns every top-level rule of a
//! stylesheet to the bucket matching its `@media` width condition, and the
//! [`pipeline`] serializes one file per non-empty bucket. A page can then
//! load each file behind a `media="(min-width: Npx)"` link.

mod breakpoints;
mod classifier;
pub mod config;
mod error;
pub mod inject;
pub mod naming;
pub mod pipeline;
mod planner;
mod run;

pub use breakpoints::{BreakpointValue, Breakpoints};
pub use classifier::{OutputGroup, RuleClassifier, SplitRule, UnmatchedRules};
pub use config::SplitConfig;
pub use error::{BreakpointError, SplitError};
pub use inject::{LinkTag, inject_link_tags};
pub use pipeline::{EmittedAsset, MediaSplitter, SplitReport, StylesheetAsset};
pub use planner::{Bucket, MediaPredicate, WidthRange, plan};
pub use run::run;
