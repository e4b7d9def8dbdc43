// "X increased/decreased by Y%"
use super::{evaluate, operand, PercentageCalculator};
use shared::models::{CalculationMode, CalculationResult};
use shared::utils::format_result;

pub struct PercentageChange {
    is_increase: bool,
}

impl PercentageChange {
    pub fn new(is_increase: bool) -> Self {
        Self { is_increase }
    }

    pub fn increase() -> Self {
        Self::new(true)
    }

    pub fn decrease() -> Self {
        Self::new(false)
    }
}

impl Default for PercentageChange {
    fn default() -> Self {
        Self::increase()
    }
}

impl PercentageCalculator for PercentageChange {
    fn mode(&self) -> CalculationMode {
        CalculationMode::PercentageChange
    }

    fn calculate(&self, base: f64, percentage: f64) -> CalculationResult {
        evaluate(|| {
            let base = operand("Base value", base)?;
            let percentage = operand("Percentage", percentage)?;

            let change = (percentage / 100.0) * base;
            let result = if self.is_increase { base + change } else { base - change };
            Ok(CalculationResult::success(result, format_result(result)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase() {
        let result = PercentageChange::increase().calculate(200.0, 25.0);
        assert_eq!(result.value, 250.0);
        assert_eq!(result.formatted, "250");
    }

    #[test]
    fn test_decrease() {
        let result = PercentageChange::decrease().calculate(200.0, 25.0);
        assert_eq!(result.value, 150.0);
        assert_eq!(result.formatted, "150");
    }

    #[test]
    fn test_default_is_increase() {
        assert_eq!(PercentageChange::default().calculate(100.0, 10.0).value, 110.0);
    }

    #[test]
    fn test_base_validated_before_percentage() {
        let result = PercentageChange::increase().calculate(f64::NAN, f64::INFINITY);
        assert_eq!(result.error.as_deref(), Some("Base value: Please enter a valid number"));
        let result = PercentageChange::increase().calculate(1.0, f64::INFINITY);
        assert_eq!(result.error.as_deref(), Some("Percentage: Number is too large"));
    }

    #[test]
    fn test_overflowing_result_renders_infinity() {
        let result = PercentageChange::increase().calculate(f64::MAX, 100.0);
        assert!(result.is_valid);
        assert_eq!(result.formatted, "∞");
    }
}
