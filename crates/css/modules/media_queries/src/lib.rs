//! Media Queries Level 4: viewport width features.
//! Spec: <https://www.w3.org/TR/mediaqueries-4/#width>
//!
//! Only the pixel forms of `min-width` and `max-width` are understood. Any
//! other feature, unit or range syntax is ignored, so a condition such as
//! `print and (orientation: landscape)` carries no width constraint at all.
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::Token;

/// Pixel bounds extracted from a media condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidthCondition {
    /// Value of the first `(min-width: Npx)` feature, if any.
    pub min: Option<u32>,
    /// Value of the first `(max-width: Npx)` feature, if any.
    pub max: Option<u32>,
}

impl WidthCondition {
    /// Whether at least one bound was found.
    #[inline]
    pub const fn is_constrained(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Record a feature value; the first occurrence of each feature wins.
    fn record(&mut self, feature: WidthFeature, px: u32) {
        let slot = match feature {
            WidthFeature::Min => &mut self.min,
            WidthFeature::Max => &mut self.max,
        };
        if slot.is_none() {
            *slot = Some(px);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WidthFeature {
    Min,
    Max,
}

/// Extract the pixel `min-width`/`max-width` bounds from the text of a media
/// condition (the prelude of an `@media` rule).
///
/// Returns `None` when neither bound is present. Unparsable text is treated
/// the same way.
pub fn parse_width_condition(media: &str) -> Option<WidthCondition> {
    let mut input = ParserInput::new(media);
    let mut parser = Parser::new(&mut input);
    let mut condition = WidthCondition::default();
    collect_width_features(&mut parser, &mut condition);
    condition.is_constrained().then_some(condition)
}

/// The media condition text selecting viewports at least `px` wide.
pub fn min_width_query(px: u32) -> String {
    format!("(min-width: {px}px)")
}

/// Walk every parenthesised block, descending into nested groups such as
/// `((min-width: 10px))` or `not ((max-width: 20px))`.
fn collect_width_features<'i>(input: &mut Parser<'i, '_>, condition: &mut WidthCondition) {
    while let Ok(token) = input.next() {
        if !matches!(token, Token::ParenthesisBlock) {
            continue;
        }
        input
            .parse_nested_block(|block| {
                match block.try_parse(parse_width_feature) {
                    Ok((feature, px)) => condition.record(feature, px),
                    Err(_) => collect_width_features(block, condition),
                }
                Ok::<_, ParseError<'i, ()>>(())
            })
            .unwrap_or_default();
    }
}

/// Parse the inside of `( <name> : <int>px )`.
fn parse_width_feature<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<(WidthFeature, u32), ParseError<'i, ()>> {
    let name = input.expect_ident()?.clone();
    let feature = if name.eq_ignore_ascii_case("min-width") {
        WidthFeature::Min
    } else if name.eq_ignore_ascii_case("max-width") {
        WidthFeature::Max
    } else {
        return Err(input.new_custom_error(()));
    };
    input.expect_colon()?;
    let px = match input.next()? {
        Token::Dimension {
            has_sign: false,
            int_value: Some(value),
            unit,
            ..
        } if unit.eq_ignore_ascii_case("px") => u32::try_from(*value).ok(),
        _ => None,
    };
    let Some(px) = px else {
        return Err(input.new_custom_error(()));
    };
    input.expect_exhausted()?;
    Ok((feature, px))
}
