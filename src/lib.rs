pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod math;
pub mod traits;

pub use crate::config::InterpreterConfig;
pub use crate::core::{create, destroy, handle_event, render, update, Context, Interpreter};
pub use crate::error::ContextError;
