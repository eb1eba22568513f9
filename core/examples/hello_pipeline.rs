// conveyor/examples/hello_pipeline.rs

use conveyor::{step, ConveyorError, Pipeline};
use tokio::runtime::Handle;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ConveyorError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Hello Pipeline Example ---");

  // 1. Create a pipeline over String values.
  //    Pipeline<T, Err> defaults Err to ConveyorError.
  let mut pipeline = Pipeline::<String>::new();

  // 2. Insert steps. Spawned steps run on the runtime's blocking pool and
  //    take a handle to it; synchronous steps run inline on whichever
  //    thread drives the pipeline.
  pipeline.add_last(step::spawn_map(Handle::current(), |greeting: String| {
    format!("{}!", greeting)
  }));
  pipeline.add_last(step::spawn_map(Handle::current(), |greeting: String| {
    greeting.to_uppercase()
  }));
  pipeline.add_first(step::sync_map(|name: String| format!("Hello, {}", name)));

  info!("Pipeline assembled: {:?}", pipeline);

  // 3. Process a value. The deferred result is awaited like any future;
  //    synchronous callers could use `process_join` instead.
  let greeting = pipeline.process("World".to_string()).await?;
  info!("Processed greeting: {}", greeting);

  // Prefix first (added to the front), then punctuation, then uppercase.
  assert_eq!(greeting, "HELLO, WORLD!");

  Ok(())
}
