// pesan/src/core/handler.rs

//! The handler type stored by a `Workflow`.

use crate::core::context_data::ContextData;
use crate::core::control::StepControl;
use std::future::Future;
use std::pin::Pin;

/// A boxed asynchronous step handler.
///
/// A handler receives a clone of the run's `ContextData<TData>` and resolves to
/// `Result<StepControl, Err>`. Handlers must release every lock guard before
/// awaiting; the typical shape is "copy what you need out under a read lock,
/// await the I/O, write the result back under a write lock".
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<StepControl, Err>> + Send>>
    + Send
    + Sync,
>;
