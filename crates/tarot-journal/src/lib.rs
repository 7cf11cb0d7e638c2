//! Reading history for Tarot: a JSONL file of past readings plus export.

/// Error types for history operations.
pub mod error;
/// Markdown and text export.
pub mod export;
/// The JSONL reading log.
pub mod history;

/// Re-export error types.
pub use error::{JournalError, JournalResult};
/// Re-export export functions.
pub use export::{export_markdown, export_text};
/// Re-export the reading log.
pub use history::ReadingLog;
