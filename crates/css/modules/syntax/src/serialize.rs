//! Printing rule lists back to stylesheet text.

use crate::{AtRule, AtRuleBlock, Declaration, Rule, StyleBlock, StyleRule};
use std::fmt;

const INDENT: &str = "  ";

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.important {
            write!(f, "{}: {} !important", self.name, self.value)
        } else {
            write!(f, "{}: {}", self.name, self.value)
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_rule(&mut out, self, 0);
        f.write_str(out.trim_end())
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Write `head {` with a single space separator, or just `{` for an empty head.
fn open_block(out: &mut String, head: &str) {
    if !head.is_empty() {
        out.push_str(head);
        out.push(' ');
    }
    out.push('{');
}

/// Write `head { text }`, or `head {}` for empty text.
fn write_raw_block(out: &mut String, head: &str, text: &str) {
    open_block(out, head);
    if !text.is_empty() {
        out.push(' ');
        out.push_str(text);
        out.push(' ');
    }
    out.push_str("}\n");
}

fn write_style_rule(out: &mut String, rule: &StyleRule, depth: usize) {
    match &rule.block {
        StyleBlock::Raw(text) => write_raw_block(out, &rule.prelude, text),
        StyleBlock::Declarations(declarations) => {
            open_block(out, &rule.prelude);
            out.push('\n');
            for declaration in declarations {
                push_indent(out, depth + 1);
                out.push_str(&declaration.to_string());
                out.push_str(";\n");
            }
            push_indent(out, depth);
            out.push_str("}\n");
        }
    }
}

fn write_at_rule(out: &mut String, rule: &AtRule, depth: usize) {
    let mut head = format!("@{}", rule.name);
    if !rule.prelude.is_empty() {
        head.push(' ');
        head.push_str(&rule.prelude);
    }
    match &rule.block {
        None => {
            out.push_str(&head);
            out.push_str(";\n");
        }
        Some(AtRuleBlock::Raw(text)) => write_raw_block(out, &head, text),
        Some(AtRuleBlock::Rules(rules)) => {
            open_block(out, &head);
            out.push('\n');
            for nested in rules {
                write_rule(out, nested, depth + 1);
            }
            push_indent(out, depth);
            out.push_str("}\n");
        }
    }
}

fn write_rule(out: &mut String, rule: &Rule, depth: usize) {
    push_indent(out, depth);
    match rule {
        Rule::Comment(comment) => {
            out.push_str("/*");
            out.push_str(&comment.text);
            out.push_str("*/\n");
        }
        Rule::Style(style) => write_style_rule(out, style, depth),
        Rule::At(at_rule) => write_at_rule(out, at_rule, depth),
    }
}

/// Print a rule list as a standalone stylesheet.
///
/// Parsing the returned text yields the same rules in the same order.
pub fn serialize_rules<'rule, I>(rules: I) -> String
where
    I: IntoIterator<Item = &'rule Rule>,
{
    let mut out = String::new();
    for rule in rules {
        write_rule(&mut out, rule, 0);
    }
    out
}
