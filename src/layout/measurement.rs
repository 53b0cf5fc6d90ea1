// SPDX-License-Identifier: MPL-2.0
//! Parsing of user-supplied layout lengths.
//!
//! Component props such as `width` accept either a bare number (pixels) or a
//! string with a `px`/`%` suffix, plus the `auto` keyword:
//!
//! ```
//! use omni_notify::layout::{parse_measurement, Measurement};
//!
//! assert_eq!(parse_measurement("10px").unwrap(), Measurement::Px(10.0));
//! assert_eq!(parse_measurement("50%").unwrap(), Measurement::Percent(50.0));
//! assert_eq!(parse_measurement("auto").unwrap(), Measurement::Auto);
//! assert_eq!(parse_measurement(20).unwrap(), Measurement::Px(20.0));
//! assert!(parse_measurement("abc").is_err());
//! ```

use crate::error::ParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Signed decimal immediately followed by a unit, anchored at both ends.
static MEASUREMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+(\.\d+)?)(px|%)$").expect("measurement regex should compile")
});

const AUTO_KEYWORD: &str = "auto";

/// A parsed layout length.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "MeasurementInput", into = "MeasurementInput")]
pub enum Measurement {
    /// Let the layout engine decide.
    #[default]
    Auto,
    /// Absolute length in pixels.
    Px(f64),
    /// Length relative to the containing block.
    Percent(f64),
}

impl Measurement {
    /// Unit tag: `"auto"`, `"px"` or `"%"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Measurement::Auto => "auto",
            Measurement::Px(_) => "px",
            Measurement::Percent(_) => "%",
        }
    }

    /// Numeric magnitude; `auto` reports zero.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Measurement::Auto => 0.0,
            Measurement::Px(v) | Measurement::Percent(v) => *v,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Auto => write!(f, "{AUTO_KEYWORD}"),
            Measurement::Px(v) => write!(f, "{v}px"),
            Measurement::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for Measurement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == AUTO_KEYWORD {
            return Ok(Measurement::Auto);
        }

        let captures = MEASUREMENT_PATTERN
            .captures(s)
            .ok_or_else(|| ParseError::InvalidMeasurement(s.to_string()))?;
        // The pattern only admits digits, so the float parse cannot fail on a match.
        let value: f64 = captures[1]
            .parse()
            .map_err(|_| ParseError::InvalidMeasurement(s.to_string()))?;

        match &captures[3] {
            "px" => Ok(Measurement::Px(value)),
            _ => Ok(Measurement::Percent(value)),
        }
    }
}

/// Raw measurement as written by the user: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementInput {
    Number(f64),
    Text(String),
}

impl From<f64> for MeasurementInput {
    fn from(value: f64) -> Self {
        MeasurementInput::Number(value)
    }
}

impl From<i32> for MeasurementInput {
    fn from(value: i32) -> Self {
        MeasurementInput::Number(f64::from(value))
    }
}

impl From<&str> for MeasurementInput {
    fn from(value: &str) -> Self {
        MeasurementInput::Text(value.to_string())
    }
}

impl From<String> for MeasurementInput {
    fn from(value: String) -> Self {
        MeasurementInput::Text(value)
    }
}

impl From<Measurement> for MeasurementInput {
    fn from(value: Measurement) -> Self {
        match value {
            Measurement::Px(px) => MeasurementInput::Number(px),
            other => MeasurementInput::Text(other.to_string()),
        }
    }
}

impl TryFrom<MeasurementInput> for Measurement {
    type Error = ParseError;

    fn try_from(input: MeasurementInput) -> Result<Self, Self::Error> {
        match input {
            MeasurementInput::Number(value) if value.is_finite() => Ok(Measurement::Px(value)),
            MeasurementInput::Number(value) => {
                Err(ParseError::InvalidMeasurement(value.to_string()))
            }
            MeasurementInput::Text(text) => text.parse(),
        }
    }
}

/// Parses a number or a `px`/`%`/`auto` string into a [`Measurement`].
///
/// Finite numbers are taken as pixels with their sign preserved. Any string
/// other than `auto` or a full `<number>px` / `<number>%` match is rejected.
pub fn parse_measurement(input: impl Into<MeasurementInput>) -> Result<Measurement, ParseError> {
    Measurement::try_from(input.into())
}
