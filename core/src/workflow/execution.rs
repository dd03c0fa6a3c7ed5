// pesan/src/workflow/execution.rs

//! `Workflow::run()`: executes the steps in order against one run's data.

use crate::core::context_data::ContextData;
use crate::core::control::{StepControl, WorkflowResult};
use crate::core::handler::Handler;
use crate::error::PesanError;
use crate::workflow::definition::Workflow;
use tracing::{event, instrument, Instrument, Level};

/// What a phase (before/on/after) of one step ended with.
enum PhaseOutcome {
  Continue,
  Stopped,
}

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PesanError> + Send + Sync + 'static,
{
  /// Runs every step in declaration order against `ctx_data`.
  ///
  /// A step is only started once every handler of the previous step has
  /// resolved, so no two steps are ever in flight at the same time.
  ///
  /// Returns `Ok(Completed)` when all steps ran, `Ok(Stopped)` when a handler
  /// returned `StepControl::Stop`, and the first handler error otherwise. A
  /// step without handlers fails with `PesanError::HandlerMissing`.
  #[instrument(
    name = "Workflow::run",
    skip_all,
    fields(workflow = %self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<WorkflowResult, Err> {
    event!(Level::DEBUG, "Workflow run starting.");

    for (step_idx, step_name) in self.steps.iter().enumerate() {
      let step_name = step_name.as_str();
      let step_span = tracing::info_span!("workflow_step", step_name, step_index = step_idx);

      let before = self.before.get(step_name).filter(|v| !v.is_empty());
      let on = self.on.get(step_name).filter(|v| !v.is_empty());
      let after = self.after.get(step_name).filter(|v| !v.is_empty());

      if before.is_none() && on.is_none() && after.is_none() {
        event!(parent: &step_span, Level::ERROR, "Step has no handlers.");
        return Err(Err::from(PesanError::HandlerMissing {
          step_name: step_name.to_string(),
        }));
      }

      for (phase, handlers) in [("before", before), ("on", on), ("after", after)] {
        let Some(handlers) = handlers else { continue };
        let outcome = Self::run_phase(phase, handlers, &ctx_data)
          .instrument(step_span.clone())
          .await?;
        if let PhaseOutcome::Stopped = outcome {
          return Ok(WorkflowResult::Stopped);
        }
      }
      event!(parent: &step_span, Level::DEBUG, "Step finished.");
    }

    event!(Level::DEBUG, "Workflow run completed.");
    Ok(WorkflowResult::Completed)
  }

  async fn run_phase(
    phase: &'static str,
    handlers: &[Handler<TData, Err>],
    ctx_data: &ContextData<TData>,
  ) -> Result<PhaseOutcome, Err> {
    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      match handler_fn(ctx_data.clone()).await {
        Ok(StepControl::Continue) => {}
        Ok(StepControl::Stop) => {
          event!(Level::INFO, phase, handler_index = handler_idx, "Workflow stopped by a handler.");
          return Ok(PhaseOutcome::Stopped);
        }
        Err(e) => {
          event!(Level::ERROR, phase, handler_index = handler_idx, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PhaseOutcome::Continue)
  }
}
