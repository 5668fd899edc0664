//! Bridge between the blocking input loop and the async controller.

pub mod commands;
pub mod runtime;
