//! CSS Syntax Module Level 3: parsing a stylesheet into a rule tree.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! The tree keeps top-level comments as nodes so that tools rearranging
//! rules can carry them along. Blocks of conditional group rules (`@media`,
//! `@supports`, ...) are parsed recursively; the blocks of every other
//! at-rule are kept as raw text.
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::SourcePosition;
use cssparser::Token;
use log::debug;

mod serialize;

pub use serialize::serialize_rules;

/// At-rules whose block holds a nested rule list.
const GROUP_AT_RULES: [&str; 7] = [
    "media",
    "supports",
    "container",
    "layer",
    "document",
    "scope",
    "starting-style",
];

/// A single CSS declaration (property: value [!important]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, lowercased unless it is a custom property.
    pub name: String,
    /// Raw value text (without trailing !important).
    pub value: String,
    /// Whether the declaration was marked as `!important`.
    pub important: bool,
}

/// A `/* ... */` comment found between rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    /// Text between the comment delimiters, untrimmed.
    pub text: String,
}

/// Contents of a style rule block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleBlock {
    /// Every item of the block was a plain `name: value` declaration.
    Declarations(Vec<Declaration>),
    /// Block text kept verbatim, trimmed. Used when the block holds comments,
    /// nested rules or anything else that is not a plain declaration.
    Raw(String),
}

/// A single style rule with a raw prelude.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Raw prelude text (typically the selector list).
    pub prelude: String,
    pub block: StyleBlock,
}

/// Contents of an at-rule block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AtRuleBlock {
    /// Nested rules of a conditional group rule.
    Rules(Vec<Rule>),
    /// Unparsed block text, trimmed.
    Raw(String),
}

/// An at-rule such as `@media`, `@import` or `@font-face`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRule {
    /// Lowercased name without the `@`.
    pub name: String,
    /// Raw prelude text, trimmed.
    pub prelude: String,
    /// `None` for statement at-rules ending in `;`.
    pub block: Option<AtRuleBlock>,
}

/// One node of a rule list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    Comment(Comment),
    Style(StyleRule),
    At(AtRule),
}

impl Rule {
    #[inline]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// The condition text of an `@media` rule.
    pub fn media_condition(&self) -> Option<&str> {
        match self {
            Self::At(at_rule) if at_rule.name == "media" => Some(at_rule.prelude.as_str()),
            Self::Comment(_) | Self::Style(_) | Self::At(_) => None,
        }
    }
}

/// A parsed stylesheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Top-level rules in source order.
    pub rules: Vec<Rule>,
}

/// Parse `!important` at the end of a value, returning (`value_without_important`, `important_flag`).
fn split_important_tail(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    if let Some(prefix) = trimmed.strip_suffix("!important") {
        return (prefix.trim_end().to_owned(), true);
    }
    (trimmed.to_owned(), false)
}

/// Accepts declarations only. At-rules and anything else that fails to parse
/// as `name: value` come back as errors from the default trait methods.
struct DeclarationListParser;

impl<'i> CssDeclarationParser<'i> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let (value, important) = split_important_tail(input.slice_from(start));
        if value.is_empty() {
            return Err(input.new_error(BasicParseErrorKind::EndOfInput));
        }
        // Custom property names are case-sensitive.
        let name = if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        };
        Ok(Declaration {
            name,
            value,
            important,
        })
    }
}

impl CssAtRuleParser<'_> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl CssQualifiedRuleParser<'_> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl CssRuleBodyItemParser<'_, Declaration, ()> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Parse a rule block as a declaration list, or `None` at the first item
/// that is not a plain declaration.
fn parse_declarations_from_block(block: &mut Parser) -> Option<Vec<Declaration>> {
    let mut out = Vec::new();
    let mut body = DeclarationListParser;
    for item in CssRuleBodyParser::new(block, &mut body) {
        match item {
            Ok(declaration) => out.push(declaration),
            Err((err, text)) => {
                debug!("keeping style block verbatim at {:?}: {:?}", text.trim(), err.kind);
                return None;
            }
        }
    }
    Some(out)
}

/// Read a style block as declarations when every item is one, otherwise keep
/// its text. Leaves `block` exhausted.
fn read_style_block(block: &mut Parser<'_, '_>) -> StyleBlock {
    let start = block.state();
    let mut nested = false;
    while let Ok(token) = block.next_including_whitespace_and_comments() {
        if matches!(token, Token::Comment(_) | Token::CurlyBracketBlock) {
            nested = true;
        }
    }
    let text = block.slice_from(start.position()).trim().to_owned();
    if nested {
        debug!("keeping style block verbatim, it holds a comment or nested block");
        return StyleBlock::Raw(text);
    }

    block.reset(&start);
    let declarations = parse_declarations_from_block(block);
    while block.next_including_whitespace_and_comments().is_ok() {}
    declarations.map_or_else(|| StyleBlock::Raw(text), StyleBlock::Declarations)
}

/// Consume the block whose `{` was just returned as the body of a style rule.
fn parse_style_block<'i>(input: &mut Parser<'i, '_>, prelude: String) -> Rule {
    let block = input
        .parse_nested_block(|block| Ok::<_, ParseError<'i, ()>>(read_style_block(block)))
        .unwrap_or_else(|_| StyleBlock::Raw(String::new()));
    Rule::Style(StyleRule { prelude, block })
}

/// Consume the block whose `{` was just returned and keep its text verbatim.
fn consume_block_text<'i>(input: &mut Parser<'i, '_>) -> String {
    input
        .parse_nested_block(|block| {
            let start = block.position();
            while block.next_including_whitespace_and_comments().is_ok() {}
            Ok::<_, ParseError<'i, ()>>(block.slice_from(start).trim().to_owned())
        })
        .unwrap_or_default()
}

/// Consume the prelude of a qualified rule that began at `start`, then its block.
fn parse_qualified_rule(input: &mut Parser<'_, '_>, start: SourcePosition) -> Option<Rule> {
    loop {
        let before = input.position();
        match input.next_including_whitespace_and_comments() {
            Ok(Token::CurlyBracketBlock) => {
                let prelude = input.slice(start..before).trim().to_owned();
                return Some(parse_style_block(input, prelude));
            }
            Ok(_) => {}
            Err(_) => {
                debug!(
                    "dropping qualified rule without a block: {}",
                    input.slice_from(start).trim()
                );
                return None;
            }
        }
    }
}

/// Consume the prelude and optional block of an at-rule whose keyword was just returned.
fn parse_at_rule<'i>(input: &mut Parser<'i, '_>, name: &str) -> Rule {
    let name = name.to_ascii_lowercase();
    let start = input.position();
    loop {
        let before = input.position();
        match input.next_including_whitespace_and_comments() {
            Ok(Token::CurlyBracketBlock) => {
                let prelude = input.slice(start..before).trim().to_owned();
                let block = if GROUP_AT_RULES.contains(&name.as_str()) {
                    AtRuleBlock::Rules(
                        input
                            .parse_nested_block(|nested| {
                                Ok::<_, ParseError<'i, ()>>(parse_rule_list(nested))
                            })
                            .unwrap_or_default(),
                    )
                } else {
                    AtRuleBlock::Raw(consume_block_text(input))
                };
                return Rule::At(AtRule {
                    name,
                    prelude,
                    block: Some(block),
                });
            }
            Ok(Token::Semicolon) => {
                let prelude = input.slice(start..before).trim().to_owned();
                return Rule::At(AtRule {
                    name,
                    prelude,
                    block: None,
                });
            }
            Ok(_) => {}
            Err(_) => {
                let prelude = input.slice_from(start).trim().to_owned();
                return Rule::At(AtRule {
                    name,
                    prelude,
                    block: None,
                });
            }
        }
    }
}

/// Parse a list of rules until the parser (or the enclosing block) is exhausted.
fn parse_rule_list(input: &mut Parser<'_, '_>) -> Vec<Rule> {
    let mut rules = Vec::new();
    loop {
        let start = input.position();
        let Ok(token) = input.next_including_whitespace_and_comments() else {
            break;
        };
        let rule = match token.clone() {
            Token::WhiteSpace(_) | Token::CDO | Token::CDC | Token::Semicolon => None,
            Token::Comment(text) => Some(Rule::Comment(Comment {
                text: text.to_owned(),
            })),
            Token::AtKeyword(name) => Some(parse_at_rule(input, &name)),
            Token::CurlyBracketBlock => Some(parse_style_block(input, String::new())),
            _ => parse_qualified_rule(input, start),
        };
        rules.extend(rule);
    }
    rules
}

/// Parse a full stylesheet into a `Stylesheet` using cssparser.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    Stylesheet {
        rules: parse_rule_list(&mut parser),
    }
}
