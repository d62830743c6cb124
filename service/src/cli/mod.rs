//! Command-line interface for compiling path tables.

mod app;
mod types;

pub use app::GoldLinkMLApp;
pub use types::{GoldLinkMLCli, OutputFormat, RuleOrderArg};

/// Main entry point for the CLI
///
/// # Errors
/// Returns error if CLI execution fails.
pub fn run() -> linkml_core::error::Result<()> {
    GoldLinkMLApp::from_args().run()
}
