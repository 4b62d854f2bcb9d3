//! Shared result and error types.

mod error;

pub use error::{AppError, Result};
