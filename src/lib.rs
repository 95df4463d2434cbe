pub mod ai;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod tag;
pub mod ui;
pub mod workflow;

pub use ai::{Provider, Registry, Request, Task};
pub use error::QuillError;
