// Adapters between the tools and the outside world
pub mod clipboard;
pub mod files;

pub use clipboard::{copy_or_log, Clipboard, Osc52Clipboard};
pub use files::{export, export_filename, import_text, FORMATTED_FILENAME, MINIFIED_FILENAME};
