use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a single percentage calculation.
///
/// An invalid result always carries an error and an empty `formatted`
/// string; use [`CalculationResult::success`] and
/// [`CalculationResult::failure`] to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub value: f64,
    pub formatted: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationResult {
    pub fn success(value: f64, formatted: String) -> Self {
        Self {
            value,
            formatted,
            is_valid: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            value: 0.0,
            formatted: String::new(),
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationMode {
    PercentageOf,
    WhatPercentage,
    PercentageChange,
    PercentageDifference,
}

impl CalculationMode {
    pub const ALL: [CalculationMode; 4] = [
        CalculationMode::PercentageOf,
        CalculationMode::WhatPercentage,
        CalculationMode::PercentageChange,
        CalculationMode::PercentageDifference,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CalculationMode::PercentageOf => "percentage-of",
            CalculationMode::WhatPercentage => "what-percentage",
            CalculationMode::PercentageChange => "percentage-change",
            CalculationMode::PercentageDifference => "percentage-difference",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalculationMode::PercentageOf => "What is X% of Y?",
            CalculationMode::WhatPercentage => "What percentage is X of Y?",
            CalculationMode::PercentageChange => "Percentage increase/decrease",
            CalculationMode::PercentageDifference => "Percentage difference",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CalculationMode::PercentageOf => "Calculate a percentage of a number",
            CalculationMode::WhatPercentage => "Find what percentage one number is of another",
            CalculationMode::PercentageChange => "Calculate the result after a percentage change",
            CalculationMode::PercentageDifference => {
                "Calculate the percentage difference between two numbers"
            }
        }
    }

    pub fn example(&self) -> &'static str {
        match self {
            CalculationMode::PercentageOf => "What is 25% of 200? = 50",
            CalculationMode::WhatPercentage => "What percentage is 50 of 200? = 25%",
            CalculationMode::PercentageChange => "200 increased by 25% = 250",
            CalculationMode::PercentageDifference => "Difference from 200 to 250 = 25%",
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CalculationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalculationMode::ALL
            .into_iter()
            .find(|mode| mode.id() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown calculation mode: {}", s))
    }
}

/// A named timer persisted by the countdown store.
///
/// Dates are kept as the ISO-8601 strings the user supplied so the stored
/// layout stays a flat array of plain records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub id: String,
    pub name: String,
    pub target_date: String,
    pub created_at: String,
}

/// Fields an update may touch. `id` and `created_at` are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownTime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub is_expired: bool,
}

impl CountdownTime {
    pub fn expired() -> Self {
        Self {
            is_expired: true,
            ..Self::default()
        }
    }
}

impl fmt::Display for CountdownTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_expired {
            return f.write_str("expired");
        }
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Humanized category of a JSON parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JsonErrorKind {
    Empty,
    SingleQuotes,
    MissingClosing,
    UnexpectedCharacter,
    Incomplete,
    TrailingComma,
    DuplicateKey,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<JsonErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_column: Option<usize>,
}

impl JsonValidationResult {
    pub fn valid(parsed: serde_json::Value) -> Self {
        Self {
            is_valid: true,
            parsed: Some(parsed),
            error: None,
            error_kind: None,
            error_line: None,
            error_column: None,
        }
    }

    pub fn invalid(error: impl Into<String>, kind: JsonErrorKind) -> Self {
        Self {
            is_valid: false,
            parsed: None,
            error: Some(error.into()),
            error_kind: Some(kind),
            error_line: None,
            error_column: None,
        }
    }

    pub fn at(mut self, line: Option<usize>, column: Option<usize>) -> Self {
        self.error_line = line;
        self.error_column = column;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFormatOptions {
    pub indent: usize,
    pub sort_keys: bool,
}

impl Default for JsonFormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            sort_keys: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonStats {
    pub size: usize,
    pub lines: usize,
    pub keys: usize,
    pub arrays: usize,
    pub objects: usize,
    pub nulls: usize,
    pub booleans: usize,
    pub numbers: usize,
    pub strings: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonViewMode {
    Tree,
    Formatted,
    Minified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlProcessResult {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UrlProcessResult {
    pub fn ok(result: String) -> Self {
        Self { result, error: None }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            result: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlMode {
    Encode,
    Decode,
}
