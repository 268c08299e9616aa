//! Splitting the stylesheet assets of a build.

use crate::breakpoints::Breakpoints;
use crate::classifier::{RuleClassifier, UnmatchedRules};
use crate::error::SplitError;
use crate::inject::LinkTag;
use crate::naming::{base_name, is_stylesheet_asset, stylesheet_file_name};
use crate::planner::plan;
use css_syntax::{parse_stylesheet, serialize_rules};
use log::{debug, info};
use rayon::prelude::*;
use std::collections::HashSet;

/// A named build output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylesheetAsset {
    /// Path-like asset name, e.g. `styles/main.1a2b.css`.
    pub name: String,
    pub contents: String,
}

impl StylesheetAsset {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// One stylesheet produced by a split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedAsset {
    pub name: String,
    pub source: String,
    /// Bucket breakpoint, `None` for unconditioned rules.
    pub breakpoint: Option<u32>,
    /// The emitted name equals the input asset's name, so this output
    /// overwrites it instead of adding a file.
    pub replaces_source: bool,
}

impl EmittedAsset {
    pub fn link_tag(&self) -> LinkTag {
        LinkTag::for_file(&self.name, self.breakpoint)
    }
}

/// Everything a split of a set of assets produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Emitted assets, grouped by input asset in input order.
    pub assets: Vec<EmittedAsset>,
    /// Names of emitted assets that are new files and need a `<link>` tag.
    pub files_to_inject: Vec<String>,
}

impl SplitReport {
    /// Tags for every file in `files_to_inject`.
    pub fn link_tags(&self) -> Vec<LinkTag> {
        self.assets
            .iter()
            .filter(|asset| !asset.replaces_source)
            .map(EmittedAsset::link_tag)
            .collect()
    }
}

/// Splits stylesheets along a fixed breakpoint list.
#[derive(Clone, Debug)]
pub struct MediaSplitter {
    breakpoints: Breakpoints,
    unmatched: UnmatchedRules,
}

impl MediaSplitter {
    pub fn new(breakpoints: Breakpoints) -> Self {
        Self {
            breakpoints,
            unmatched: UnmatchedRules::default(),
        }
    }

    #[must_use]
    pub fn with_unmatched(mut self, unmatched: UnmatchedRules) -> Self {
        self.unmatched = unmatched;
        self
    }

    #[inline]
    pub const fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Split one stylesheet into one asset per non-empty bucket.
    ///
    /// # Errors
    /// Fails only when unmatched rules are rejected and one is found.
    pub fn split_asset(&self, asset: &StylesheetAsset) -> Result<Vec<EmittedAsset>, SplitError> {
        let sheet = parse_stylesheet(&asset.contents);
        let classifier = RuleClassifier::new(base_name(&asset.name), plan(&self.breakpoints))
            .with_unmatched(self.unmatched);
        let groups = classifier.handle(&sheet.rules)?;
        debug!(
            "{}: {} rule(s) into {} file(s)",
            asset.name,
            sheet.rules.len(),
            groups.len()
        );

        Ok(groups
            .into_iter()
            .map(|group| {
                let name = stylesheet_file_name(&group.identifier);
                EmittedAsset {
                    replaces_source: name == asset.name,
                    source: serialize_rules(group.rules.iter().copied()),
                    breakpoint: group.breakpoint,
                    name,
                }
            })
            .collect())
    }

    /// Split every stylesheet among `assets`; other assets are skipped.
    ///
    /// Stylesheets are processed in parallel.
    ///
    /// # Errors
    /// Returns the error of the first failing stylesheet in input order, or
    /// [`SplitError::DuplicateOutput`] when two outputs share a name.
    pub fn split_assets(&self, assets: &[StylesheetAsset]) -> Result<SplitReport, SplitError> {
        let stylesheets: Vec<&StylesheetAsset> = assets
            .iter()
            .filter(|asset| is_stylesheet_asset(&asset.name))
            .collect();
        let per_asset: Vec<Result<Vec<EmittedAsset>, SplitError>> = stylesheets
            .par_iter()
            .map(|asset| self.split_asset(asset))
            .collect();

        let mut emitted = Vec::new();
        let mut names = HashSet::new();
        for result in per_asset {
            for asset in result? {
                if !names.insert(asset.name.clone()) {
                    return Err(SplitError::DuplicateOutput { name: asset.name });
                }
                emitted.push(asset);
            }
        }

        let files_to_inject = emitted
            .iter()
            .filter(|asset| !asset.replaces_source)
            .map(|asset| asset.name.clone())
            .collect();
        info!(
            "split {} stylesheet asset(s) into {} file(s)",
            stylesheets.len(),
            emitted.len()
        );
        Ok(SplitReport {
            assets: emitted,
            files_to_inject,
        })
    }
}
