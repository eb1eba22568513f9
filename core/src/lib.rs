// src/lib.rs

//! Conveyor: an ASYNC ordered step-execution engine for Rust.
//!
//! Conveyor chains value-transforming steps into pipelines
//! with features like:
//!  - Steps added at either end of the processing queue.
//!  - Synchronous steps that run inline on the calling thread.
//!  - Spawned steps submitted to a tokio runtime's blocking pool.
//!  - Eager hand-off: a step starts working when it receives its input,
//!    not when the deferred result is awaited.
//!  - Error short-circuiting that preserves the failing step's error as-is.
//!  - Whole pipelines nesting inside other pipelines as single steps.

// Declare modules according to the planned structure
pub mod core;
pub mod pipeline;
pub mod error;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::core::step::{self, AsyncStep, SharedStep, Step, StepFuture, SyncStep};

// The main Pipeline struct
pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{ConveyorError, ConveyorResult};

// Example of a high-level comment explaining a core concept if needed.
/*
    Core Workflow:
    1. Pick the value type `T` your process transforms.
    2. Create a `Pipeline<T>` (or `Pipeline<T, MyError>` for a custom error type;
       spawned steps and `process_join` need `MyError: From<ConveyorError>`).
    3. Wrap transformations into steps:
       - `step::sync` / `step::sync_map` for work that stays on the calling thread.
       - `step::spawn` / `step::spawn_map`, with a `tokio::runtime::Handle`, for
         work that should run on the runtime's blocking pool.
    4. Insert them with `pipeline.add_last(...)` / `pipeline.add_first(...)`.
    5. Call `pipeline.process(value).await` from async code, or
       `pipeline.process_join(value)` from synchronous code.
*/
