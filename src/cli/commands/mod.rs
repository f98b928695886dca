mod serve;
mod status;
mod wake;

pub use serve::ServeCommand;
pub use status::StatusCommand;
pub use wake::WakeCommand;
