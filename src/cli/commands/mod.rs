//! CLI command implementations.

mod generate;
mod init;
mod list;
mod narrate;
mod serve;
mod stats;

pub use generate::run_generate;
pub use init::run_init;
pub use list::run_list;
pub use narrate::run_narrate;
pub use serve::run_serve;
pub use stats::run_stats;
