//! Command line front end for splitting stylesheets by media query width.
//!
//! Reads a JSON configuration (see [`css_splitter::SplitConfig`]), writes
//! one stylesheet per width bucket and optionally an HTML page linking them.

use anyhow::{Result, anyhow};
use css_splitter::{SplitConfig, run};
use log::info;
use std::env;
use std::io::{Write as _, stderr};
use std::path::PathBuf;

/// Configuration file read when none is given.
const DEFAULT_CONFIG: &str = "css-split.json";

/// Print usage information to stderr.
fn print_usage() {
    drop(writeln!(
        stderr(),
        "Usage:\n  css_split [CONFIG]\n\nCONFIG defaults to {DEFAULT_CONFIG}."
    ));
}

/// Pick the configuration path out of the command line.
///
/// # Errors
/// Returns an error on unknown flags or more than one path.
fn config_path(args: &[String]) -> Result<Option<PathBuf>> {
    match args {
        [] => Ok(Some(PathBuf::from(DEFAULT_CONFIG))),
        [flag] if flag == "-h" || flag == "--help" => Ok(None),
        [flag] if flag.starts_with('-') => Err(anyhow!("unknown option {flag}")),
        [path] => Ok(Some(PathBuf::from(path))),
        [_, extra, ..] => Err(anyhow!("unexpected argument {extra}")),
    }
}

/// Main entry point for the `css_split` tool.
///
/// # Errors
/// Returns an error if the arguments, configuration, or split are invalid.
fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    let path = match config_path(&args) {
        Ok(Some(path)) => path,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            print_usage();
            return Err(err);
        }
    };

    let config = SplitConfig::load(&path)?;
    let report = run(&config)?;
    info!(
        "{} file(s) written to {}, {} new",
        report.assets.len(),
        config.out_dir.display(),
        report.files_to_inject.len()
    );
    Ok(())
}
