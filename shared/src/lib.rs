pub mod models;
pub mod utils;

// Types and display helpers used by both the engine library and the shell.
pub use models::*;
pub use utils::format_result;
