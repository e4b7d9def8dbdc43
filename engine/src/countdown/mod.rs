// Countdown timers: persisted store, storage backends and time arithmetic
pub mod storage;
pub mod store;
pub mod time;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{CountdownStore, MAX_COUNTDOWNS, STORAGE_KEY};
pub use time::{parse_date, time_remaining, time_remaining_at, validate_future_date};

use crate::error::{EngineError, Result};

/// Form-level checks run before a countdown is added or edited.
/// Returns the trimmed name to store.
pub fn validate_draft(name: &str, target_date: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::InvalidInput("Please enter a countdown name".to_string()));
    }
    if target_date.trim().is_empty() {
        return Err(EngineError::InvalidInput("Please select a date and time".to_string()));
    }
    if !validate_future_date(target_date) {
        return Err(EngineError::InvalidInput(
            "Please select a future date and time".to_string(),
        ));
    }
    Ok(name.to_string())
}
