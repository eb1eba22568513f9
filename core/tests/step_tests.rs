// tests/step_tests.rs
mod common; // Reference the common module

use common::*;
use conveyor::step;
use conveyor::{AsyncStep, ConveyorError, SharedStep, SyncStep};
use tokio::runtime::Handle;

#[tokio::test]
async fn test_sync_step_runs_on_the_calling_thread() {
  setup_tracing();
  let calling_thread = std::thread::current().id();
  let squares: SharedStep<i32, TestError> = step::sync_map(move |value| {
    assert_eq!(std::thread::current().id(), calling_thread);
    value * value
  });

  assert_eq!(squares.handle(9).await.unwrap(), 81);
  assert_eq!(squares.handle(-2).await.unwrap(), 4);
}

#[tokio::test]
async fn test_spawned_step_runs_off_the_calling_thread() {
  setup_tracing();
  let calling_thread = std::thread::current().id();
  let squares: SharedStep<i32, TestError> = step::spawn_map(Handle::current(), move |value| {
    assert_ne!(std::thread::current().id(), calling_thread);
    value * value
  });

  assert_eq!(squares.handle(9).await.unwrap(), 81);
  assert_eq!(squares.handle(-2).await.unwrap(), 4);
}

#[tokio::test]
async fn test_sync_step_propagates_transformation_error() {
  setup_tracing();
  let validator: SharedStep<i32, TestError> = step::sync(|value| {
    if value < 0 {
      Err(TestError::Step("negative input".to_string()))
    } else {
      Ok(value + 1)
    }
  });

  assert_eq!(validator.handle(1).await.unwrap(), 2);
  assert_eq!(
    validator.handle(-1).await.err().unwrap(),
    TestError::Step("negative input".to_string())
  );
}

#[tokio::test]
async fn test_spawned_step_propagates_transformation_error() {
  setup_tracing();
  let validator: SharedStep<i32, TestError> = step::spawn(Handle::current(), |value| {
    if value < 0 {
      Err(TestError::Step("negative input".to_string()))
    } else {
      Ok(value + 1)
    }
  });

  assert_eq!(validator.handle(1).await.unwrap(), 2);
  assert_eq!(
    validator.handle(-1).await.err().unwrap(),
    TestError::Step("negative input".to_string())
  );
}

#[tokio::test]
async fn test_spawned_panic_surfaces_as_scheduling_error() {
  setup_tracing();
  let exploding: SharedStep<String, ConveyorError> =
    step::spawn_map(Handle::current(), |_value: String| -> String { panic!("transformation blew up") });

  let error = exploding.handle("data".to_string()).await.err().unwrap();
  match error {
    ConveyorError::Scheduling { source } => assert!(source.is_panic()),
    other => panic!("Expected ConveyorError::Scheduling, got {:?}", other),
  }
}

#[test]
fn test_step_adapters_have_debug_output() {
  let inline = SyncStep::new(|value: i32| Ok::<_, ConveyorError>(value));
  assert!(format!("{:?}", inline).contains("SyncStep"));

  let worker = worker_runtime();
  let offloaded = AsyncStep::new(worker.handle().clone(), |value: i32| Ok::<_, ConveyorError>(value));
  assert!(format!("{:?}", offloaded).contains("AsyncStep"));
}
