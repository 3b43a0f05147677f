use crate::distribution::{MAX_GOAL, MIN_GOAL, STEP};
use crate::errors::AppError;
use serde::Deserialize;

pub const DEFAULT_GOAL: u32 = 10_000;

/// Goal as sent by clients: JSON callers may pass a number, form and text
/// inputs arrive as strings. Anything else (fractions, overflowing numbers,
/// `null`) lands in `Other` and is rejected when resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GoalInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl GoalInput {
    pub fn resolve(&self) -> Result<u32, AppError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(raw) => sanitize_goal_input(raw)
                .and_then(|value| i64::try_from(value).ok())
                .ok_or_else(not_a_whole_number)?,
            Self::Other(_) => return Err(not_a_whole_number()),
        };
        validate_goal(value)
    }
}

fn not_a_whole_number() -> AppError {
    AppError::bad_request("goal must be a whole number")
}

/// Keeps only ASCII digits and drops leading zeros. `"1,825"` becomes 1825,
/// `"000"` becomes 0, input without digits yields `None`.
pub fn sanitize_goal_input(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse().ok()
}

pub fn validate_goal(goal: i64) -> Result<u32, AppError> {
    if goal < i64::from(MIN_GOAL) {
        return Err(AppError::bad_request(format!(
            "goal must be at least {MIN_GOAL}"
        )));
    }
    if goal > i64::from(MAX_GOAL) {
        return Err(AppError::bad_request(format!(
            "goal must be at most {MAX_GOAL}"
        )));
    }
    if goal % i64::from(STEP) != 0 {
        return Err(AppError::bad_request(format!(
            "goal must be a multiple of {STEP}"
        )));
    }
    u32::try_from(goal).map_err(|_| AppError::bad_request("goal out of range"))
}
