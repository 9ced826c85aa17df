//! Structured logging field name constants for tagrove.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log queries work the same across the resolver, patcher, and controller.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Settings could not be persisted, edit flow aborted |
//! | WARN  | Per-file patch failure skipped during a bulk operation |
//! | INFO  | Folder edit completed, settings loaded |
//! | DEBUG | Placement decisions, no-op short circuits |
//! | TRACE | Per-file iteration during bulk application |

/// Logical operation name.
/// Examples: "edit_folder_tags", "apply_file_created", "save_folder_tags"
pub const OPERATION: &str = "op";

/// Folder path being operated on.
pub const FOLDER_PATH: &str = "folder_path";

/// File path being patched.
pub const FILE_PATH: &str = "file_path";

/// Number of tags added or removed by an operation.
pub const TAG_COUNT: &str = "tag_count";

/// Number of files visited by a bulk operation.
pub const FILE_COUNT: &str = "file_count";

/// Number of files skipped due to per-file failures.
pub const SKIPPED_COUNT: &str = "skipped_count";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
