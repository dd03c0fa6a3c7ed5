// pesan/src/workflow/definition.rs

//! `Workflow<TData, Err>`: an ordered list of named steps plus the handlers
//! registered for each of them.

use crate::core::handler::Handler;
use crate::error::PesanError;
use std::collections::HashMap;

/// An ordered sequence of named steps over shared run data `TData`, whose
/// handlers fail with `Err`.
///
/// `Err` must be constructible from `PesanError` so the engine can report its
/// own failures (a step with no handlers) in the caller's error type.
pub struct Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PesanError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<String>,

  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PesanError> + Send + Sync + 'static,
{
  /// Creates a workflow over `step_names`. Every step needs at least one
  /// handler by the time it runs.
  pub fn new(name: &str, step_names: &[&str]) -> Self {
    Self {
      name: name.to_string(),
      steps: step_names.iter().map(|n| n.to_string()).collect(),
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(String::as_str).collect()
  }

  /// Panics if `step_name` is not part of the workflow. A typo in a step name
  /// is a wiring mistake, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s == step_name) {
      panic!(
        "Workflow '{}' setup error: step '{}' is not defined.",
        self.name, step_name
      );
    }
  }
}
