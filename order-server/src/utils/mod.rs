//! Shared utilities: error types, result alias, logging, validation.

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, Data, Message};
pub use result::AppResult;
