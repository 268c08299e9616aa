//! Splitting the stylesheets named by a [`SplitConfig`] on disk.

use crate::config::SplitConfig;
use crate::inject::inject_link_tags;
use crate::pipeline::{SplitReport, StylesheetAsset};
use anyhow::{Context as _, Result, anyhow};
use log::info;
use std::fs::{create_dir_all, read_to_string, write};
use std::path::{Component, Path};

/// Asset name for `path`: its location under `root` with `/` separators, or
/// just its file name when it lies outside `root`.
fn asset_name(path: &Path, root: &Path) -> Result<String> {
    let relative = match path.strip_prefix(root) {
        Ok(relative) => relative,
        Err(_) => path
            .file_name()
            .map(Path::new)
            .ok_or_else(|| anyhow!("stylesheet path {} has no file name", path.display()))?,
    };
    let parts = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| anyhow!("stylesheet path {} is not valid UTF-8", path.display()))?;
    if parts.is_empty() {
        return Err(anyhow!("stylesheet path {} has no file name", path.display()));
    }
    Ok(parts.join("/"))
}

fn read_asset(path: &Path, root: &Path) -> Result<StylesheetAsset> {
    let name = asset_name(path, root)?;
    let contents = read_to_string(path)
        .with_context(|| format!("failed to read stylesheet {}", path.display()))?;
    Ok(StylesheetAsset::new(name, contents))
}

/// Split every configured stylesheet into `out_dir`, then write the HTML
/// template (if any) with link tags for the new files next to them.
///
/// # Errors
/// Returns an error on invalid breakpoints, unreadable inputs, unwritable
/// outputs, or an unmatched rule in strict mode.
pub fn run(config: &SplitConfig) -> Result<SplitReport> {
    let splitter = config.splitter()?;
    let assets = config
        .stylesheets
        .iter()
        .map(|path| read_asset(path, &config.root))
        .collect::<Result<Vec<_>>>()?;
    let report = splitter.split_assets(&assets)?;

    create_dir_all(&config.out_dir)
        .with_context(|| format!("failed to create {}", config.out_dir.display()))?;
    for asset in &report.assets {
        let path = config.out_dir.join(&asset.name);
        if let Some(parent) = path.parent() {
            create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        write(&path, &asset.source)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    if let Some(template) = &config.html {
        let html = read_to_string(template)
            .with_context(|| format!("failed to read template {}", template.display()))?;
        let file_name = template
            .file_name()
            .ok_or_else(|| anyhow!("template path {} has no file name", template.display()))?;
        let path = config.out_dir.join(file_name);
        write(&path, inject_link_tags(&html, &report.link_tags()))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(
            "injected {} link tag(s) into {}",
            report.files_to_inject.len(),
            path.display()
        );
    }

    Ok(report)
}
