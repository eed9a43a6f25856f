// Library module for logless
// Re-exports modules for use in integration tests and the binary

pub mod cleaner;
pub mod config;

pub use cleaner::{clean, CleanError, CleanReport, ExclusionSet, TreeCleaner};
pub use config::Config;
