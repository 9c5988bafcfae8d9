// Public modules
pub mod config;
pub mod error;
pub mod refactor;
pub mod restore;
pub mod selector;

// Re-export common types for convenience
pub use config::{RenamerConfig, RewriteMode};
pub use error::{Error, ErrorCode, Result};
pub use restore::{GitRestorer, NoopRestorer, WorkingTreeRestorer};
