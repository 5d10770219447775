pub mod engine;
pub mod inclusion;
pub mod outcome;

pub use engine::{ProjectionEngine, ProjectionOptions};
pub use inclusion::project_inclusion;
pub use outcome::{FetchReason, ProjectionOutcome};
