mod operations;
mod presentation;
mod state;

pub use operations::{analyze, upload};
pub use presentation::{present, Presentation, StatusView, Verdict, FAILURE_MESSAGE};
pub use state::{ensure_single, Applied, Completion, CycleId, Workflow, WorkflowStatus};

#[cfg(test)]
#[path = "tests/scenario_tests.rs"]
mod scenario_tests;
