pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod solana;
pub mod token;
pub mod utils;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{Result, WorkflowError};
