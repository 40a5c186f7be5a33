pub mod report;
pub mod target;

pub use report::{CheckOutcome, CycleReport, Decision, Observation, TargetFailure, UpdateEvent};
pub use target::{FirstSeenPolicy, Target};
