// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use conveyor::step;
use conveyor::{ConveyorError, SharedStep};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("Conveyor engine error: {0:?}")] // Use :? for ConveyorError as it doesn't impl PartialEq
  Conveyor(String), // Store as String for Eq comparison

  #[error("Test step failed: {0}")]
  Step(String),
}

impl From<ConveyorError> for TestError {
  fn from(ce: ConveyorError) -> Self {
    // Simple conversion for testing, might lose some detail but good for Eq.
    TestError::Conveyor(format!("{:?}", ce))
  }
}

// --- Shared Execution Log ---

/// Steps append their tag here, so tests can assert on ordering and
/// short-circuiting even when steps hop between threads.
pub type ExecutionLog = Arc<Mutex<Vec<String>>>;

pub fn new_execution_log() -> ExecutionLog {
  Arc::new(Mutex::new(Vec::new()))
}

// --- Common Step Creators ---

/// Synchronous step that records `tag` and passes the value through unchanged.
pub fn tagging_sync_step(tag: &'static str, log: ExecutionLog) -> SharedStep<String, TestError> {
  step::sync_map(move |value: String| {
    log.lock().push(tag.to_string());
    tracing::debug!(target: "test_steps", step = %tag, "executed, value: '{}'", value);
    value
  })
}

/// Spawned step that records `tag` and passes the value through unchanged.
pub fn tagging_spawn_step(runtime: Handle, tag: &'static str, log: ExecutionLog) -> SharedStep<String, TestError> {
  step::spawn_map(runtime, move |value: String| {
    log.lock().push(tag.to_string());
    tracing::debug!(target: "test_steps", step = %tag, "executed off-thread, value: '{}'", value);
    value
  })
}

/// Synchronous step that always fails with `TestError::Step(message)`.
pub fn failing_sync_step(message: &'static str) -> SharedStep<String, TestError> {
  step::sync(move |_value: String| Err(TestError::Step(message.to_string())))
}

/// Spawned step that always fails with `TestError::Step(message)`.
pub fn failing_spawn_step(runtime: Handle, message: &'static str) -> SharedStep<String, TestError> {
  step::spawn(runtime, move |_value: String| Err(TestError::Step(message.to_string())))
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Worker Runtime for Non-Async Tests ---

/// Runtime whose handle feeds spawned steps in tests that drive pipelines
/// through `process_join` instead of an async test body.
pub fn worker_runtime() -> tokio::runtime::Runtime {
  tokio::runtime::Runtime::new().expect("failed to build test worker runtime")
}
