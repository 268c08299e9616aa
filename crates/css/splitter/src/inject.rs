//! `<link>` tags for split stylesheets and their injection into an HTML head.

use crate::naming::breakpoint_from_file_name;
use css_media_queries::min_width_query;
use log::warn;
use std::fmt;

/// A `<link rel="stylesheet">` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTag {
    /// Root-relative URL, always starting with a single `/`.
    pub href: String,
    /// `(min-width: Npx)` for breakpoint files, `all` otherwise.
    pub media: String,
}

impl LinkTag {
    /// Tag for an emitted file whose bucket breakpoint is known.
    pub fn for_file(file_name: &str, breakpoint: Option<u32>) -> Self {
        let href = format!("/{}", file_name.trim_matches('/'));
        let media = breakpoint.map_or_else(|| "all".to_owned(), min_width_query);
        Self { href, media }
    }

    /// Tag for a file name alone, recovering the breakpoint from the name.
    pub fn from_file_name(file_name: &str) -> Self {
        Self::for_file(file_name, breakpoint_from_file_name(file_name))
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

impl fmt::Display for LinkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<link href=\"{}\" rel=\"stylesheet\" media=\"{}\">",
            escape_attribute(&self.href),
            escape_attribute(&self.media)
        )
    }
}

/// One tag per line.
pub fn render_link_tags(tags: &[LinkTag]) -> String {
    tags.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Insert `tags` right before the first `</head>` of `html`.
///
/// Documents without a head are returned unchanged.
pub fn inject_link_tags(html: &str, tags: &[LinkTag]) -> String {
    if tags.is_empty() {
        return html.to_owned();
    }
    let Some(position) = html.to_ascii_lowercase().find("</head>") else {
        warn!("no </head> found, {} link tag(s) not injected", tags.len());
        return html.to_owned();
    };
    let (head, tail) = html.split_at(position);
    format!("{head}{}\n{tail}", render_link_tags(tags))
}
