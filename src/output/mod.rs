//! Output formatting

pub mod formatter;

pub use formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter};
