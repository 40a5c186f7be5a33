//! Persisted monitor state
//!
//! One JSON snapshot maps each target name to the last recorded modification
//! time. The snapshot is replaced atomically as a whole after every check
//! cycle, so a crash mid-cycle leaves the previous snapshot intact.

mod store;

pub use store::{StateError, StateStore};
