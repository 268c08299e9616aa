//! JSON configuration for splitting stylesheets on disk.
//!
//! ```json
//! {
//!   "breakpoints": [576, "992px", 1200],
//!   "stylesheets": ["dist/main.css"],
//!   "out_dir": "dist/split",
//!   "html": "public/index.html",
//!   "strict": false
//! }
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use crate::breakpoints::{BreakpointValue, Breakpoints};
use crate::classifier::UnmatchedRules;
use crate::error::BreakpointError;
use crate::pipeline::MediaSplitter;
use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitConfig {
    /// Raw breakpoint values, validated by [`Self::breakpoints`].
    pub breakpoints: Vec<BreakpointValue>,
    /// Stylesheets to split.
    pub stylesheets: Vec<PathBuf>,
    /// Directory receiving the split files.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// HTML template to receive `<link>` tags for the new files.
    #[serde(default)]
    pub html: Option<PathBuf>,
    /// Fail on rules that match no bucket instead of dropping them.
    #[serde(default)]
    pub strict: bool,
    /// Directory the paths were resolved against; asset names are taken
    /// relative to it.
    #[serde(skip)]
    pub root: PathBuf,
}

impl SplitConfig {
    /// Parse a configuration from JSON text. Paths are kept as written.
    ///
    /// # Errors
    /// Returns an error if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid split configuration")
    }

    /// Read a configuration file, resolving its relative paths against the
    /// file's directory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        let root = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolved_against(root))
    }

    /// Join every relative path onto `root`.
    #[must_use]
    pub fn resolved_against(mut self, root: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            }
        };
        self.stylesheets = self.stylesheets.iter().map(|path| resolve(path)).collect();
        self.out_dir = resolve(&self.out_dir);
        self.html = self.html.as_deref().map(resolve);
        self.root = root.to_path_buf();
        self
    }

    /// Validated breakpoint list.
    ///
    /// # Errors
    /// Returns an error naming the position of the first invalid value.
    pub fn breakpoints(&self) -> Result<Breakpoints, BreakpointError> {
        Breakpoints::from_values(&self.breakpoints)
    }

    pub const fn unmatched_rules(&self) -> UnmatchedRules {
        if self.strict {
            UnmatchedRules::Reject
        } else {
            UnmatchedRules::Drop
        }
    }

    /// A splitter configured from this file.
    ///
    /// # Errors
    /// Returns an error if the breakpoints are invalid.
    pub fn splitter(&self) -> Result<MediaSplitter, BreakpointError> {
        Ok(MediaSplitter::new(self.breakpoints()?).with_unmatched(self.unmatched_rules()))
    }
}
