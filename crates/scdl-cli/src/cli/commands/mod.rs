//! CLI command handlers. Each command is in its own file.

mod download;
mod resolve;

pub use download::run_download;
pub use resolve::run_resolve;
