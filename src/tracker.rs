use crate::distribution::{DAYS, MAX_AMOUNT, MIN_AMOUNT, STEP, distribute};
use crate::errors::AppError;
use crate::goal::validate_goal;
use crate::models::TrackerSummary;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::warn;

/// Goal, allocation and selection for one savings year.
///
/// `amounts` is either empty or a full allocation summing to `goal`, and
/// `selected` only ever holds indices into `amounts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracker {
    goal: Option<u32>,
    amounts: Vec<u32>,
    selected: BTreeSet<usize>,
}

impl Tracker {
    /// Rebuilds a tracker from persisted values, discarding anything that
    /// would break the allocation invariants.
    pub fn restore(goal: Option<u32>, amounts: Vec<u32>, selected: Vec<usize>) -> Self {
        let goal = goal.filter(|&goal| validate_goal(i64::from(goal)).is_ok());
        let mut tracker = Self {
            goal,
            ..Self::default()
        };

        if amounts.is_empty() {
            return tracker;
        }

        match goal {
            Some(goal) if is_valid_allocation(&amounts, goal) => {
                tracker.amounts = amounts;
            }
            _ => {
                warn!(
                    len = amounts.len(),
                    ?goal,
                    "discarding persisted allocation that does not match the goal"
                );
                return tracker;
            }
        }

        let before = selected.len();
        tracker.selected = selected
            .into_iter()
            .filter(|&index| index < DAYS)
            .collect();
        if tracker.selected.len() != before {
            warn!(
                dropped = before - tracker.selected.len(),
                "dropped invalid persisted selection entries"
            );
        }

        tracker
    }

    pub fn goal(&self) -> Option<u32> {
        self.goal
    }

    pub fn amounts(&self) -> &[u32] {
        &self.amounts
    }

    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    pub fn is_generated(&self) -> bool {
        !self.amounts.is_empty()
    }

    /// Replaces the allocation with a fresh one for `goal` and clears the
    /// selection. The tracker is left untouched when the goal is rejected.
    pub fn regenerate<R: Rng>(&mut self, goal: i64, rng: &mut R) -> Result<(), AppError> {
        let goal = validate_goal(goal)?;
        let amounts = distribute(i64::from(goal), rng);
        if amounts.is_empty() {
            return Err(AppError::bad_request(format!(
                "unable to distribute {goal} across {DAYS} days"
            )));
        }

        self.goal = Some(goal);
        self.amounts = amounts;
        self.selected.clear();
        Ok(())
    }

    /// Flips `index` in the selection and reports whether it is now selected.
    pub fn toggle(&mut self, index: usize) -> Result<bool, AppError> {
        if !self.is_generated() {
            return Err(AppError::bad_request("no allocation has been generated yet"));
        }
        if index >= self.amounts.len() {
            return Err(AppError::bad_request(format!(
                "index must be below {}",
                self.amounts.len()
            )));
        }

        if self.selected.remove(&index) {
            Ok(false)
        } else {
            self.selected.insert(index);
            Ok(true)
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn saved_total(&self) -> u32 {
        self.selected.iter().map(|&index| self.amounts[index]).sum()
    }

    pub fn summary(&self) -> TrackerSummary {
        let saved_total = self.saved_total();
        let (remaining, progress) = match self.goal {
            Some(goal) if self.is_generated() => {
                let progress = f64::from(saved_total) / f64::from(goal) * 100.0;
                (
                    goal.saturating_sub(saved_total),
                    (progress * 10.0).round() / 10.0,
                )
            }
            _ => (0, 0.0),
        };

        TrackerSummary {
            goal: self.goal,
            amounts: self.amounts.clone(),
            selected: self.selected().collect(),
            saved_total,
            remaining,
            saved_days: self.selected.len(),
            progress,
        }
    }
}

fn is_valid_allocation(amounts: &[u32], goal: u32) -> bool {
    amounts.len() == DAYS
        && amounts
            .iter()
            .all(|&amount| (MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) && amount % STEP == 0)
        && amounts.iter().sum::<u32>() == goal
}
