//! Update decisions and check-cycle orchestration
//!
//! The tracker compares each observed timestamp against the persisted state,
//! decides whether it is a new update, and stages the value the snapshot
//! carries forward. One atomic state write happens per cycle, after every
//! target has been evaluated.

mod cycle;

pub use cycle::{evaluate, run_cycle};
