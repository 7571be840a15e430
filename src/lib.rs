pub mod app;
pub mod canvas;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod parser;

// Re-export commonly used types
pub use config::Config;
pub use error::ImportError;
pub use event::{Course, Event};
pub use format::Language;
