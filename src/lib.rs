pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod ui;
pub mod version;

pub use error::{Result, VercheckError};
