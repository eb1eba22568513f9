// conveyor/examples/error_handling.rs

use conveyor::{step, ConveyorError, Pipeline};
use tokio::runtime::Handle;
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("A custom application error occurred: {0}")]
  CustomError(String),

  #[error("Conveyor engine error during pipeline execution: {0}")]
  Engine(#[from] ConveyorError), // Allows ConveyorError to be converted into ExampleAppError
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: a step returns a custom error
  info!("Scenario 1: a step returns a custom error");
  run_pipeline_with_step_error().await;

  // Scenario 2: engine error (a spawned step dies before completing)
  info!("Scenario 2: engine error from a spawned step");
  run_pipeline_with_scheduling_error().await;
}

// The processed value is a trail of step names, so the value itself shows
// how far the pipeline got before failing.
async fn run_pipeline_with_step_error() {
  let mut pipeline = Pipeline::<Vec<String>, ExampleAppError>::new();

  pipeline.add_last(step::sync_map(|mut trail: Vec<String>| {
    info!("Executing step_one");
    trail.push("step_one".to_string());
    trail
  }));

  pipeline.add_last(step::sync(|_trail: Vec<String>| {
    info!("Executing step_two_fails - this will error");
    Err(ExampleAppError::CustomError(
      "Something went wrong in step_two!".to_string(),
    ))
  }));

  pipeline.add_last(step::sync_map(|mut trail: Vec<String>| {
    info!("Executing step_three (should not be reached)");
    trail.push("step_three".to_string());
    trail
  }));

  match pipeline.process(Vec::new()).await {
    Ok(trail) => {
      error!("Pipeline unexpectedly succeeded: {:?}", trail);
    }
    Err(e) => {
      info!("Pipeline failed as expected: {}", e);
      match e {
        ExampleAppError::CustomError(msg) => {
          assert!(msg.contains("Something went wrong in step_two!"));
        }
        _ => error!("Unexpected error type: {:?}", e),
      }
    }
  }
}

async fn run_pipeline_with_scheduling_error() {
  let mut pipeline = Pipeline::<Vec<String>, ExampleAppError>::new();

  pipeline.add_last(step::sync_map(|mut trail: Vec<String>| {
    info!("Executing step_alpha");
    trail.push("step_alpha".to_string());
    trail
  }));

  // This transformation panics on the blocking pool; the engine reports the
  // dead task as a Scheduling error rather than a step error.
  pipeline.add_last(step::spawn_map(
    Handle::current(),
    |_trail: Vec<String>| -> Vec<String> { panic!("spawned transformation panicked") },
  ));

  match pipeline.process(Vec::new()).await {
    Err(ExampleAppError::Engine(engine_err)) => {
      info!("Wrapped ConveyorError: {:?}", engine_err);
      assert!(matches!(engine_err, ConveyorError::Scheduling { .. }));
    }
    Err(e) => error!("Expected Engine error, got {:?}", e),
    Ok(_) => error!("Expected Engine error, but pipeline completed"),
  }
}
