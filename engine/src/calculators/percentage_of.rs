// "What is X% of Y?"
use super::{evaluate, operand, PercentageCalculator};
use shared::models::{CalculationMode, CalculationResult};
use shared::utils::format_result;

pub struct PercentageOf;

impl PercentageCalculator for PercentageOf {
    fn mode(&self) -> CalculationMode {
        CalculationMode::PercentageOf
    }

    fn calculate(&self, percentage: f64, base: f64) -> CalculationResult {
        evaluate(|| {
            let percentage = operand("Percentage", percentage)?;
            let base = operand("Base value", base)?;

            let result = (percentage / 100.0) * base;
            Ok(CalculationResult::success(result, format_result(result)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_of_two_hundred() {
        let result = PercentageOf.calculate(25.0, 200.0);
        assert!(result.is_valid);
        assert_eq!(result.value, 50.0);
        assert_eq!(result.formatted, "50");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_fractional_result() {
        let result = PercentageOf.calculate(33.3, 10.0);
        assert_eq!(result.formatted, "3.33");
    }

    #[test]
    fn test_invalid_percentage_is_labelled() {
        let result = PercentageOf.calculate(f64::NAN, 200.0);
        assert!(!result.is_valid);
        assert!(result.formatted.is_empty());
        assert_eq!(result.error.as_deref(), Some("Percentage: Please enter a valid number"));
    }

    #[test]
    fn test_infinite_base_is_labelled() {
        let result = PercentageOf.calculate(10.0, f64::INFINITY);
        assert_eq!(result.error.as_deref(), Some("Base value: Number is too large"));
    }

    #[test]
    fn test_first_operand_reported_first() {
        let result = PercentageOf.calculate(f64::INFINITY, f64::NAN);
        assert_eq!(result.error.as_deref(), Some("Percentage: Number is too large"));
    }
}
