pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod quick_reply;

// Re-export common error type
pub use error::QraError;
