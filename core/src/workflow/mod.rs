// pesan/src/workflow/mod.rs

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Workflow;
