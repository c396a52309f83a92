//! Learning loop handlers.

mod run_revision_cycle;

pub use run_revision_cycle::{
    RunRevisionCycleCommand, RunRevisionCycleHandler, RunRevisionCycleResult,
};
