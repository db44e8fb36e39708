//! Output formatting for CLI.

mod json;
mod text;

pub use json::{ClassifyOutput, JsonFormatter, ResolutionOutput};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
