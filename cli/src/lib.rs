pub mod commands;
pub mod config_loader;
pub mod context;
pub mod repl;

pub use context::CliContext;
pub use repl::readline;
