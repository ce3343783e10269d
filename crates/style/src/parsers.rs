//! nom parsers for dimension strings such as `"12pt"`, `"50%"` and `"auto"`.

use crate::dimension::{Dimension, DimensionUnit};
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, map, opt, value};
use nom::number::complete::double;
use nom::sequence::{delimited, terminated};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur while parsing style values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

/// A dimension before range validation.
fn raw_dimension(input: &str) -> IResult<&str, (DimensionUnit, f64)> {
    alt((
        value((DimensionUnit::Auto, 0.0), tag_no_case("auto")),
        map(terminated(double, char('%')), |v| {
            (DimensionUnit::Fraction, v / 100.0)
        }),
        map(terminated(double, opt(tag_no_case("pt"))), |v| {
            (DimensionUnit::Points, v)
        }),
    ))
    .parse(input)
}

/// Parses a dimension string. An empty string is `auto`, a bare number is points.
pub fn parse_dimension(input: &str) -> Result<Dimension, StyleParseError> {
    if input.trim().is_empty() {
        return Ok(Dimension::AUTO);
    }
    let (_, (unit, v)) = all_consuming(delimited(multispace0, raw_dimension, multispace0))
        .parse(input)
        .map_err(|e| StyleParseError::Parse(format!("'{}': {}", input, e)))?;
    Dimension::try_new(unit, v)
}
