// Engine library root
// Core tools behind the `tools` shell: percentage calculators, JSON viewer,
// countdown store and URL transcoder, plus the catalog, config and I/O
// adapters the shell needs.

pub mod calculators;
pub mod catalog;
pub mod config;
pub mod countdown;
pub mod error;
pub mod json;
pub mod services;
pub mod url;

pub use error::{EngineError, Result};
