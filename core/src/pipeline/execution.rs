// conveyor/src/pipeline/execution.rs

//! Contains the `Pipeline::process()` family of methods, responsible for
//! running a value through the pipeline's steps in order.

use crate::core::step::{SharedStep, Step, StepFuture};
use crate::error::ConveyorError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, span, Instrument, Level};

impl<T, Err> Pipeline<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
{
  /// Runs `data` through every step in order and returns the deferred result.
  ///
  /// The first step is invoked before this method returns, matching the
  /// eager hand-off contract of `Step::handle`; each later step starts as
  /// its predecessor's future resolves, receiving the predecessor's output.
  /// The first step failure short-circuits the chain and becomes the
  /// future's error. An empty pipeline yields the input back unchanged.
  ///
  /// The returned future owns clones of the step handles, so it is `'static`
  /// and can outlive the pipeline or be driven from another task.
  pub fn process(&self, data: T) -> StepFuture<T, Err> {
    let mut remaining = self.steps.iter().cloned();
    let first = match remaining.next() {
      Some(step) => step,
      None => {
        event!(Level::TRACE, "Pipeline is empty; returning input unchanged.");
        return Box::pin(std::future::ready(Ok(data)));
      }
    };
    let rest: Vec<SharedStep<T, Err>> = remaining.collect();

    let process_span = span!(
      Level::DEBUG,
      "pipeline_process",
      value_type = %std::any::type_name::<T>(),
      num_steps = self.steps.len(),
    );

    // The first hand-off happens on the caller's thread, inside the span.
    let head = {
      let _span_guard = process_span.enter();
      event!(Level::DEBUG, "Pipeline processing starting.");
      first.handle(data)
    };

    Box::pin(
      async move {
        let mut value = match head.await {
          Ok(value) => value,
          Err(error) => {
            event!(Level::ERROR, error = %error, step_index = 0_usize, "Pipeline step failed.");
            return Err(error);
          }
        };

        for (offset, step) in rest.into_iter().enumerate() {
          match step.handle(value).await {
            Ok(next) => value = next,
            Err(error) => {
              event!(Level::ERROR, error = %error, step_index = offset + 1, "Pipeline step failed.");
              return Err(error);
            }
          }
        }

        event!(Level::DEBUG, "Pipeline processing completed successfully.");
        Ok(value)
      }
      .instrument(process_span),
    )
  }
}

// Blocking entry point. The extra From<ConveyorError> bound lets a failure
// to stand up the bridge runtime surface through the pipeline's own error
// type, the same conversion spawned steps rely on.
impl<T, Err> Pipeline<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + From<ConveyorError> + Send + Sync + 'static,
{
  /// Runs `data` through the pipeline and blocks the calling thread until
  /// the result is ready.
  ///
  /// A throwaway current-thread runtime drives the chain, so this must be
  /// called from synchronous code only; calling it inside an async context
  /// panics, as tokio refuses to block a runtime thread. Spawned steps are
  /// unaffected, since they execute on their own runtime's blocking pool.
  pub fn process_join(&self, data: T) -> Result<T, Err> {
    let bridge = tokio::runtime::Builder::new_current_thread()
      .build()
      .map_err(|io_err| Err::from(ConveyorError::Runtime { source: io_err }))?;
    bridge.block_on(self.process(data))
  }
}

// A pipeline is itself a step, so a whole pipeline can be inserted into
// another pipeline as a single stage.
impl<T, Err> Step<T, Err> for Pipeline<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
{
  fn handle(&self, input: T) -> StepFuture<T, Err> {
    self.process(input)
  }
}
