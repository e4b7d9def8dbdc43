// "What percentage is X of Y?"
use super::{evaluate, operand, PercentageCalculator};
use shared::models::{CalculationMode, CalculationResult};
use shared::utils::format_result;

pub const DIVIDE_BY_ZERO: &str = "Cannot divide by zero";

pub struct WhatPercentage;

impl PercentageCalculator for WhatPercentage {
    fn mode(&self) -> CalculationMode {
        CalculationMode::WhatPercentage
    }

    fn calculate(&self, value: f64, base: f64) -> CalculationResult {
        evaluate(|| {
            let value = operand("Value", value)?;
            let base = operand("Base value", base)?;
            if base == 0.0 {
                return Err(CalculationResult::failure(DIVIDE_BY_ZERO));
            }

            let result = (value / base) * 100.0;
            Ok(CalculationResult::success(result, format!("{}%", format_result(result))))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifty_of_two_hundred() {
        let result = WhatPercentage.calculate(50.0, 200.0);
        assert!(result.is_valid);
        assert_eq!(result.value, 25.0);
        assert_eq!(result.formatted, "25%");
    }

    #[test]
    fn test_zero_base_fails() {
        for value in [0.0, 1.0, -7.5, 1e300] {
            let result = WhatPercentage.calculate(value, 0.0);
            assert!(!result.is_valid);
            assert!(result.formatted.is_empty());
            assert!(result.error.unwrap().to_lowercase().contains("divide by zero"));
        }
    }

    #[test]
    fn test_negative_zero_base_fails() {
        assert!(!WhatPercentage.calculate(5.0, -0.0).is_valid);
    }

    #[test]
    fn test_invalid_value_is_labelled() {
        let result = WhatPercentage.calculate(f64::NAN, 0.0);
        assert_eq!(result.error.as_deref(), Some("Value: Please enter a valid number"));
    }

    #[test]
    fn test_recurring_fraction() {
        let result = WhatPercentage.calculate(1.0, 3.0);
        assert_eq!(result.formatted, "33.333333%");
    }
}
