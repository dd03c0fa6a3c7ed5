// pesan/src/core/control.rs

//! Signals for controlling workflow flow and the outcome of a workflow run.

/// Signal from a handler indicating whether the workflow should continue or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  /// Continue with the remaining handlers of the current step and the following steps.
  Continue,
  /// Halt the workflow. No further handlers in this step or later steps run.
  Stop,
}

/// Outcome of a full workflow run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowResult {
  /// Every non-skipped step ran to the end.
  Completed,
  /// A handler returned `StepControl::Stop`.
  Stopped,
}
