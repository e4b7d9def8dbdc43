// Percentage calculators
pub mod percentage_change;
pub mod percentage_difference;
pub mod percentage_of;
pub mod what_percentage;

pub use percentage_change::PercentageChange;
pub use percentage_difference::PercentageDifference;
pub use percentage_of::PercentageOf;
pub use what_percentage::WhatPercentage;

use regex::Regex;
use shared::models::{CalculationMode, CalculationResult};
use std::sync::OnceLock;

pub const INVALID_NUMBER: &str = "Please enter a valid number";
pub const NUMBER_TOO_LARGE: &str = "Number is too large";

// Common trait for all percentage modes
pub trait PercentageCalculator: Send + Sync {
    fn mode(&self) -> CalculationMode;

    fn name(&self) -> &str {
        self.mode().label()
    }

    /// Operands are taken in the order the mode's form presents them.
    fn calculate(&self, first: f64, second: f64) -> CalculationResult;
}

/// Checks an operand that has already been parsed into a number.
pub fn validate_number(value: f64) -> Result<f64, &'static str> {
    if value.is_nan() {
        return Err(INVALID_NUMBER);
    }
    if value.is_infinite() {
        return Err(NUMBER_TOO_LARGE);
    }
    Ok(value)
}

/// Parses user text leniently: leading whitespace is skipped and the longest
/// numeric prefix is used, so `"12abc"` reads as 12. Text with no numeric
/// prefix reads as NaN; overflowing text such as `1e999` reads as infinity.
pub fn parse_number_text(text: &str) -> f64 {
    static NUMBER_PREFIX: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = NUMBER_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").ok()
    });

    pattern
        .as_ref()
        .and_then(|re| re.find(text.trim_start()))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

pub fn validate_number_text(text: &str) -> Result<f64, &'static str> {
    validate_number(parse_number_text(text))
}

pub(crate) fn operand(role: &str, value: f64) -> Result<f64, CalculationResult> {
    validate_number(value).map_err(|error| CalculationResult::failure(format!("{}: {}", role, error)))
}

pub(crate) fn evaluate(
    body: impl FnOnce() -> Result<CalculationResult, CalculationResult>,
) -> CalculationResult {
    body().unwrap_or_else(|failure| failure)
}

/// Calculator instance for a mode. `is_increase` only matters for
/// percentage change.
pub fn calculator_for(mode: CalculationMode, is_increase: bool) -> Box<dyn PercentageCalculator> {
    match mode {
        CalculationMode::PercentageOf => Box::new(PercentageOf),
        CalculationMode::WhatPercentage => Box::new(WhatPercentage),
        CalculationMode::PercentageChange => Box::new(PercentageChange::new(is_increase)),
        CalculationMode::PercentageDifference => Box::new(PercentageDifference),
    }
}

pub fn calculate(mode: CalculationMode, first: f64, second: f64, is_increase: bool) -> CalculationResult {
    let result = calculator_for(mode, is_increase).calculate(first, second);
    if let Some(error) = &result.error {
        tracing::debug!(%mode, first, second, error = %error, "Calculation rejected");
    }
    result
}

pub fn percentage_of(percentage: f64, base: f64) -> CalculationResult {
    PercentageOf.calculate(percentage, base)
}

pub fn what_percentage(value: f64, base: f64) -> CalculationResult {
    WhatPercentage.calculate(value, base)
}

pub fn percentage_change(base: f64, percentage: f64, is_increase: bool) -> CalculationResult {
    PercentageChange::new(is_increase).calculate(base, percentage)
}

pub fn percentage_difference(first: f64, second: f64) -> CalculationResult {
    PercentageDifference.calculate(first, second)
}
