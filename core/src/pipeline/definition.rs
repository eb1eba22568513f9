// conveyor/src/pipeline/definition.rs

//! Contains the `Pipeline<T, Err>` struct definition and the methods for its
//! construction and structural modification.

use crate::core::step::SharedStep;
use crate::error::ConveyorError;
use std::collections::VecDeque;
use std::sync::Arc;

/// The core pipeline type: an ordered queue of shared steps, every one of
/// them consuming and producing the same value type `T`.
///
/// A pipeline is assembled up front with `add_first` / `add_last`, which take
/// `&mut self`. Once built it never changes shape, so it can be processed
/// from any number of tasks concurrently; the steps themselves are shared
/// handles and may simultaneously belong to other pipelines.
///
/// `Err` is the error type the pipeline's steps return. It defaults to
/// `ConveyorError`, and any custom error works as long as it satisfies the
/// struct bounds (spawned steps and blocking joins additionally need
/// `Err: From<ConveyorError>` so engine-level failures can surface).
pub struct Pipeline<T, Err = ConveyorError>
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
{
  /// Ordered steps; the front of the queue executes first.
  pub(crate) steps: VecDeque<SharedStep<T, Err>>,
}

impl<T, Err> Pipeline<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
{
  /// Creates an empty pipeline. Processing a value through an empty pipeline
  /// yields the value back unchanged.
  pub fn new() -> Self {
    Self {
      steps: VecDeque::new(),
    }
  }

  // --- Structural Modification Methods ---

  /// Adds a processing step to the start of the queue.
  ///
  /// Accepts either a bare `SharedStep` or an `Option` of one; an absent
  /// step leaves the pipeline untouched, so conditionally-built stages can
  /// be wired in without branching at the call site.
  pub fn add_first(&mut self, step: impl Into<Option<SharedStep<T, Err>>>) {
    if let Some(step) = step.into() {
      self.steps.push_front(step);
    }
  }

  /// Adds a processing step to the end of the queue.
  ///
  /// Accepts either a bare `SharedStep` or an `Option` of one; an absent
  /// step leaves the pipeline untouched.
  pub fn add_last(&mut self, step: impl Into<Option<SharedStep<T, Err>>>) {
    if let Some(step) = step.into() {
      self.steps.push_back(step);
    }
  }

  /// Number of steps currently in the pipeline.
  pub fn len(&self) -> usize {
    self.steps.len()
  }

  /// Returns `true` if the pipeline contains no steps.
  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Converts this pipeline into a shared step handle, so the whole chain
  /// can be inserted into another pipeline as a single stage.
  pub fn into_step(self) -> SharedStep<T, Err> {
    Arc::new(self)
  }
}

impl<T, Err> Default for Pipeline<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

// Steps are type-erased closures with no Debug of their own, so report the
// shape of the pipeline instead.
impl<T, Err> std::fmt::Debug for Pipeline<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("num_steps", &self.steps.len())
      .field("value_type", &std::any::type_name::<T>())
      .finish()
  }
}
