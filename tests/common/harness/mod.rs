//! Test harness for CLI integration tests.
//!
//! Provides a mock notes server with an isolated config directory, builders
//! for server records, and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod records;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::NotesCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use records::{TestCategory, TestNote};
