pub mod context_data;
pub mod control;
pub mod handler;

pub use context_data::ContextData;
pub use control::{StepControl, WorkflowResult};
pub use handler::Handler;
