//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{report, run_check, CheckArgs, CheckReport};
