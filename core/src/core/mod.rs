pub mod step;

// Re-export key types for easier access from other conveyor modules (and potentially lib.rs)
pub use step::{SharedStep, Step, StepFuture};
