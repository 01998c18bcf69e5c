pub mod builder;
pub mod commands;

pub use builder::{REVISION_LOG_MESSAGE, build_commands, process_notification};
pub use commands::{Command, InsertMethod};
