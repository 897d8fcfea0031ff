/// Shared kernel - error types, result alias, file safety checks and tracing setup
pub mod error;
pub mod result;
pub mod security;
pub mod telemetry;

pub use result::Result;
