pub mod cli;
pub mod config;
pub mod error;
pub mod observability;

pub use crate::config::Config;
pub use crate::error::AppError;
