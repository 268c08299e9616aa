//! Breakpoint list validation.

use crate::error::BreakpointError;
use log::warn;
use serde::Deserialize;
use std::fmt;

/// A breakpoint as written in configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BreakpointValue {
    Integer(i64),
    /// Truncated toward zero.
    Float(f64),
    /// An integer with an optional `px` suffix, e.g. `"992"` or `"992px"`.
    Text(String),
}

impl fmt::Display for BreakpointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

impl From<u32> for BreakpointValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for BreakpointValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Parse `[+-]digits[px]`, ignoring surrounding whitespace.
fn parse_integer_text(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();
    let number = lower.strip_suffix("px").unwrap_or(&lower).trim_end();
    let digits = number.strip_prefix(['+', '-']).unwrap_or(number);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}

impl BreakpointValue {
    /// Validate this value as the breakpoint at `index`.
    ///
    /// # Errors
    /// Returns an error naming `index` if the value is not a positive integer.
    pub fn to_width(&self, index: usize) -> Result<u32, BreakpointError> {
        let parsed = match self {
            Self::Integer(value) => Some(*value),
            Self::Float(value) => value.is_finite().then(|| value.trunc() as i64),
            Self::Text(text) => parse_integer_text(text),
        };
        let Some(value) = parsed else {
            return Err(BreakpointError::NotANumber {
                index,
                value: self.to_string(),
            });
        };
        if value <= 0 {
            return Err(BreakpointError::NonPositive { index, value });
        }
        u32::try_from(value).map_err(|_| BreakpointError::OutOfRange { index, value })
    }
}

/// Ascending, de-duplicated, non-empty list of positive pixel widths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breakpoints {
    widths: Vec<u32>,
}

impl Breakpoints {
    /// Validate widths, then sort them ascending and drop duplicates.
    ///
    /// # Errors
    /// Returns an error if the list is empty or a width is zero.
    pub fn new(widths: impl IntoIterator<Item = u32>) -> Result<Self, BreakpointError> {
        let widths: Vec<u32> = widths.into_iter().collect();
        if let Some(index) = widths.iter().position(|width| *width == 0) {
            return Err(BreakpointError::NonPositive { index, value: 0 });
        }
        Self::from_validated(widths)
    }

    /// Validate raw configuration values; errors carry the position in `values`.
    ///
    /// # Errors
    /// Returns the first invalid value's error, or [`BreakpointError::Empty`].
    pub fn from_values(values: &[BreakpointValue]) -> Result<Self, BreakpointError> {
        let widths = values
            .iter()
            .enumerate()
            .map(|(index, value)| value.to_width(index))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_validated(widths)
    }

    fn from_validated(mut widths: Vec<u32>) -> Result<Self, BreakpointError> {
        if widths.is_empty() {
            return Err(BreakpointError::Empty);
        }
        widths.sort_unstable();
        let before = widths.len();
        widths.dedup();
        if widths.len() != before {
            warn!("ignoring duplicate breakpoints, using {widths:?}");
        }
        Ok(Self { widths })
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.widths
    }

    /// The smallest breakpoint.
    #[inline]
    pub fn smallest(&self) -> u32 {
        self.widths.first().copied().unwrap_or(1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_and_dedups() {
        let breakpoints = Breakpoints::new([992, 576, 1200, 576]);
        assert_eq!(breakpoints.map(|list| list.as_slice().to_vec()), Ok(vec![576, 992, 1200]));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Breakpoints::new(Vec::<u32>::new()), Err(BreakpointError::Empty));
        assert_eq!(Breakpoints::from_values(&[]), Err(BreakpointError::Empty));
    }

    #[test]
    fn zero_reports_position() {
        assert_eq!(
            Breakpoints::new([576, 0]),
            Err(BreakpointError::NonPositive { index: 1, value: 0 })
        );
    }

    #[test]
    fn raw_values() {
        let values = [
            BreakpointValue::from("992px"),
            BreakpointValue::Float(576.9),
            BreakpointValue::from(" 1200 "),
        ];
        assert_eq!(
            Breakpoints::from_values(&values).map(|list| list.as_slice().to_vec()),
            Ok(vec![576, 992, 1200])
        );
    }

    #[test]
    fn non_numeric_value_reports_position() {
        let values = [BreakpointValue::from(576), BreakpointValue::from("wide")];
        let err = Breakpoints::from_values(&values).unwrap_err();
        assert_eq!(
            err,
            BreakpointError::NotANumber {
                index: 1,
                value: "\"wide\"".to_owned()
            }
        );
        assert_eq!(
            err.to_string(),
            "the breakpoint in index position 1 (\"wide\") is not a valid number"
        );
    }

    #[test]
    fn negative_value_reports_position() {
        let values = [BreakpointValue::Integer(-10)];
        assert_eq!(
            Breakpoints::from_values(&values),
            Err(BreakpointError::NonPositive {
                index: 0,
                value: -10
            })
        );
        assert_eq!(
            BreakpointValue::from("-3px").to_width(4),
            Err(BreakpointError::NonPositive { index: 4, value: -3 })
        );
    }

    #[test]
    fn oversized_and_nan() {
        assert_eq!(
            BreakpointValue::Integer(i64::from(u32::MAX) + 1).to_width(0),
            Err(BreakpointError::OutOfRange {
                index: 0,
                value: i64::from(u32::MAX) + 1
            })
        );
        assert!(matches!(
            BreakpointValue::Float(f64::NAN).to_width(2),
            Err(BreakpointError::NotANumber { index: 2, .. })
        ));
    }

    #[test]
    fn deserializes_mixed_list() {
        let values: Vec<BreakpointValue> =
            serde_json::from_str(r#"[576, "992px", 1200.0]"#).unwrap();
        assert_eq!(
            values,
            vec![
                BreakpointValue::Integer(576),
                BreakpointValue::Text("992px".to_owned()),
                BreakpointValue::Float(1200.0),
            ]
        );
    }
}
