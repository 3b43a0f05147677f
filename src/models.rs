use crate::goal::GoalInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub goal: GoalInput,
}

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub goal: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSummary {
    pub goal: Option<u32>,
    pub amounts: Vec<u32>,
    pub selected: Vec<usize>,
    pub saved_total: u32,
    pub remaining: u32,
    pub saved_days: usize,
    pub progress: f64,
}
