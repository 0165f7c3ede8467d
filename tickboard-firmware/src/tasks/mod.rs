//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod board;
pub mod status;

pub use board::board_task;
pub use status::status_task;
