// Display formatting shared by the calculators and the shell.

const SMALL_LIMIT: f64 = 0.0001;
const LARGE_LIMIT: f64 = 1e12;

/// Renders a calculation result for display.
///
/// Very small (but non-zero) and very large magnitudes switch to scientific
/// notation with two fractional digits; everything else is rounded to six
/// decimal places with trailing zeros dropped.
pub fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return "∞".to_string();
    }

    let magnitude = value.abs();
    if (magnitude < SMALL_LIMIT && value != 0.0) || magnitude >= LARGE_LIMIT {
        return to_exponential(value, 2);
    }

    let rounded = round_half_up(value * 1e6) / 1e6;
    // -0 would otherwise render as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

/// Nearest integer, with halves going toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    if value - value.floor() == 0.5 {
        value.ceil()
    } else {
        value.round()
    }
}

/// Scientific notation in the `1.23e+4` / `1.23e-5` style. An exact tie
/// rounds away from zero (`1.125e12` gives `1.13e+12`).
pub fn to_exponential(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // 767 significant digits hold the exact decimal expansion of any f64.
    let exact = format!("{:.767e}", value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return exact;
    };
    let Ok(mut exponent) = exponent.parse::<i32>() else {
        return exact;
    };

    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect();
    let mut kept = all[..=digits.min(all.len() - 1)].to_vec();
    if all.get(kept.len()).is_some_and(|&next| next >= 5) {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
            kept.pop();
            exponent += 1;
        }
    }

    let mut text = String::new();
    if value.is_sign_negative() && value != 0.0 {
        text.push('-');
    }
    text.push((b'0' + kept[0]) as char);
    if kept.len() > 1 {
        text.push('.');
        text.extend(kept[1..].iter().map(|&d| (b'0' + d) as char));
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    text.push_str(&format!("e{}{}", sign, exponent.abs()));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integers_and_decimals() {
        assert_eq!(format_result(50.0), "50");
        assert_eq!(format_result(0.5), "0.5");
        assert_eq!(format_result(-2.0 / 3.0), "-0.666667");
        assert_eq!(format_result(1234.5678901), "1234.56789");
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(-0.0), "0");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_result(f64::INFINITY), "∞");
        assert_eq!(format_result(f64::NEG_INFINITY), "∞");
        assert_eq!(format_result(f64::NAN), "∞");
    }

    #[test]
    fn test_format_small_values_use_exponent() {
        assert_eq!(format_result(0.00001234), "1.23e-5");
        assert_eq!(format_result(-0.00005), "-5.00e-5");
        // 0.0001 itself is not below the threshold
        assert_eq!(format_result(0.0001), "0.0001");
    }

    #[test]
    fn test_format_large_values_use_exponent() {
        assert_eq!(format_result(1e12), "1.00e+12");
        assert_eq!(format_result(-2.5e15), "-2.50e+15");
        assert_eq!(format_result(999_999_999_999.0), "999999999999");
    }

    #[test]
    fn test_halves_round_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
    }

    #[test]
    fn test_exponent_ties_round_away_from_zero() {
        assert_eq!(format_result(1.125e12), "1.13e+12");
        assert_eq!(format_result(-1.125e12), "-1.13e+12");
        assert_eq!(format_result(9.995e12), "1.00e+13");
        assert_eq!(to_exponential(0.0, 2), "0.00e+0");
        assert_eq!(to_exponential(12345.0, 0), "1e+4");
    }

    #[test]
    fn test_format_round_trips_within_tolerance() {
        let samples = [
            0.0, 1.0, -1.0, 0.1, 0.000123, 3.14159265, -42.4242424, 123456.789, 99999999.999999,
            0.00004321, -0.00000009,
        ];
        for value in samples {
            let text = format_result(value);
            assert!(!text.is_empty());
            let parsed: f64 = text.parse().unwrap();
            assert!(
                (parsed - value).abs() < 1e-6,
                "{} rendered as {} parsed back as {}",
                value,
                text,
                parsed
            );
        }
    }
}
