// conveyor/src/core/step.rs

//! Defines the `Step` contract plus the two built-in step kinds: inline
//! synchronous steps and steps spawned onto a tokio runtime.

use crate::error::ConveyorError;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{event, Level};

// --- Step Contract ---

/// Type alias for the deferred outcome of a step: a boxed future resolving
/// to the transformed value, or to the pipeline's error type.
pub type StepFuture<T, Err> = Pin<Box<dyn Future<Output = Result<T, Err>> + Send>>;

/// A cloneable, type-erased step handle. Pipelines store these, and the same
/// step instance may be inserted into any number of pipelines.
pub type SharedStep<T, Err> = Arc<dyn Step<T, Err>>;

/// A single unit of work: consumes a value of type `T` and produces a
/// deferred value of the same type.
///
/// `handle` starts the work before returning wherever it can. A synchronous
/// step runs its transformation on the calling thread and hands back an
/// already-settled future; a spawned step submits the transformation to its
/// runtime immediately, and the returned future merely observes completion.
pub trait Step<T, Err>: Send + Sync
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
{
  /// Begins processing `input` and returns the deferred result.
  fn handle(&self, input: T) -> StepFuture<T, Err>;
}

// --- Synchronous Steps ---

/// A step that applies a fallible transformation inline, on whichever thread
/// calls `handle`.
pub struct SyncStep<T, Err, F>
where
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  transform: F,
  _phantom_t: PhantomData<fn() -> T>,
  _phantom_err: PhantomData<fn() -> Err>,
}

impl<T, Err, F> SyncStep<T, Err, F>
where
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  pub fn new(transform: F) -> Self {
    Self {
      transform,
      _phantom_t: PhantomData,
      _phantom_err: PhantomData,
    }
  }
}

impl<T, Err, F> Step<T, Err> for SyncStep<T, Err, F>
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  fn handle(&self, input: T) -> StepFuture<T, Err> {
    // The transformation has already run by the time the future exists.
    let outcome = (self.transform)(input);
    Box::pin(std::future::ready(outcome))
  }
}

impl<T, Err, F> std::fmt::Debug for SyncStep<T, Err, F>
where
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SyncStep").finish_non_exhaustive()
  }
}

// --- Spawned Steps ---

/// A step whose transformation runs on a tokio runtime's blocking pool
/// instead of the calling thread.
///
/// Submission happens inside `handle` itself, so by the time the caller holds
/// the returned future the work is already queued. If the task dies before
/// producing a result (a panic in the transformation, or runtime shutdown),
/// the future resolves to `ConveyorError::Scheduling` converted into `Err`;
/// an `Err` value returned by the transformation itself passes through
/// untouched.
pub struct AsyncStep<T, Err, F>
where
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  runtime: Handle,
  transform: Arc<F>,
  _phantom_t: PhantomData<fn() -> T>,
}

impl<T, Err, F> AsyncStep<T, Err, F>
where
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  /// Creates a step that offloads `transform` through the given runtime handle.
  pub fn new(runtime: Handle, transform: F) -> Self {
    Self {
      runtime,
      transform: Arc::new(transform),
      _phantom_t: PhantomData,
    }
  }
}

impl<T, Err, F> Step<T, Err> for AsyncStep<T, Err, F>
where
  T: Send + 'static,
  Err: std::error::Error + From<ConveyorError> + Send + Sync + 'static,
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  fn handle(&self, input: T) -> StepFuture<T, Err> {
    let transform = Arc::clone(&self.transform);
    // Submitted now, not when the returned future is first polled.
    let join = self.runtime.spawn_blocking(move || transform(input));
    Box::pin(async move {
      match join.await {
        // The task ran; its own Ok/Err outcome is the step's outcome.
        Ok(outcome) => outcome,
        Err(join_err) => {
          event!(Level::DEBUG, error = %join_err, "Spawned step did not run to completion.");
          Err(Err::from(ConveyorError::from(join_err)))
        }
      }
    })
  }
}

impl<T, Err, F> std::fmt::Debug for AsyncStep<T, Err, F>
where
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AsyncStep")
      .field("runtime", &self.runtime)
      .finish_non_exhaustive()
  }
}

// --- Factory Functions ---

/// Wraps a fallible transformation into a shared synchronous step.
pub fn sync<T, Err, F>(transform: F) -> SharedStep<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  Arc::new(SyncStep::new(transform))
}

/// Wraps an infallible transformation into a shared synchronous step.
pub fn sync_map<T, Err, F>(transform: F) -> SharedStep<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
  F: Fn(T) -> T + Send + Sync + 'static,
{
  sync(move |value| Ok(transform(value)))
}

/// Wraps a fallible transformation into a shared step that runs on
/// `runtime`'s blocking pool.
pub fn spawn<T, Err, F>(runtime: Handle, transform: F) -> SharedStep<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + From<ConveyorError> + Send + Sync + 'static,
  F: Fn(T) -> Result<T, Err> + Send + Sync + 'static,
{
  Arc::new(AsyncStep::new(runtime, transform))
}

/// Wraps an infallible transformation into a shared step that runs on
/// `runtime`'s blocking pool.
pub fn spawn_map<T, Err, F>(runtime: Handle, transform: F) -> SharedStep<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + From<ConveyorError> + Send + Sync + 'static,
  F: Fn(T) -> T + Send + Sync + 'static,
{
  spawn(runtime, move |value| Ok(transform(value)))
}
