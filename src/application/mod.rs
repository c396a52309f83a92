//! Application layer - command/query handlers and background tasks.

pub mod handlers;
pub mod learning_task;

pub use learning_task::{spawn_learning_loop, LearningLoopHandle};
