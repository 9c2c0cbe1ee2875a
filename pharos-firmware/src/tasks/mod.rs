//! Embassy async tasks
//!
//! Each task runs independently and communicates via the capture
//! latch and edge signal in [`crate::channels`].

pub mod buttons;
pub mod matrix;

pub use buttons::button_watch_task;
pub use matrix::matrix_task;
