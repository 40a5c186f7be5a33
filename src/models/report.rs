use chrono::{DateTime, Utc};

/// A timestamp observed for one target during the current cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Target identifier the timestamp belongs to
    pub target: String,

    /// Modification time the listing reported for the tracked file
    pub timestamp: DateTime<Utc>,
}

/// Outcome of evaluating one observation against recorded state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// The observed time advanced past the recorded one
    pub is_new: bool,

    /// Value the state snapshot carries forward for this target
    pub record: DateTime<Utc>,
}

/// Signal that a target's index advanced past its recorded state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEvent {
    pub target: String,
    pub timestamp: DateTime<Utc>,
}

/// One successfully checked target
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub observation: Observation,
    pub is_new: bool,
}

/// A target that produced no observation this cycle
#[derive(Debug, Clone)]
pub struct TargetFailure {
    pub target: String,
    pub reason: String,
}

impl TargetFailure {
    pub fn new(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            reason: reason.into(),
        }
    }
}

/// Everything one pass over the configured targets produced
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Targets that were fetched, parsed and evaluated
    pub checks: Vec<CheckOutcome>,

    /// Targets skipped this cycle (fetch or extraction failure)
    pub failures: Vec<TargetFailure>,
}

impl CycleReport {
    /// Updates detected this cycle, in target order
    pub fn updates(&self) -> Vec<UpdateEvent> {
        self.checks
            .iter()
            .filter(|check| check.is_new)
            .map(|check| UpdateEvent {
                target: check.observation.target.clone(),
                timestamp: check.observation.timestamp,
            })
            .collect()
    }

    pub fn has_updates(&self) -> bool {
        self.checks.iter().any(|check| check.is_new)
    }
}
