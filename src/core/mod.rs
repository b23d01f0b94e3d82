pub mod error;
pub mod features;
pub mod generator;
pub mod install;
pub mod materializer;
pub mod naming;
pub mod paths;
pub mod prompt;
pub mod session;
pub mod xml_insert;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
