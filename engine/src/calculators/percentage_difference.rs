// Percentage difference from a first value to a second
use super::{evaluate, operand, PercentageCalculator};
use shared::models::{CalculationMode, CalculationResult};
use shared::utils::format_result;

pub const ZERO_FIRST_VALUE: &str =
    "Cannot calculate percentage difference when first value is zero";

pub struct PercentageDifference;

impl PercentageCalculator for PercentageDifference {
    fn mode(&self) -> CalculationMode {
        CalculationMode::PercentageDifference
    }

    fn calculate(&self, first: f64, second: f64) -> CalculationResult {
        evaluate(|| {
            let first = operand("First value", first)?;
            let second = operand("Second value", second)?;
            if first == 0.0 {
                return Err(CalculationResult::failure(ZERO_FIRST_VALUE));
            }

            let difference = second - first;
            let result = (difference / first) * 100.0;
            // Only the magnitude is shown; the raw value keeps its sign.
            Ok(CalculationResult::success(
                result,
                format!("{}%", format_result(result.abs())),
            ))
        })
    }
}
