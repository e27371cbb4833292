//! Default values shared by the config structs.

/// Rule store document filename.
pub const DEFAULT_DOCUMENT_FILENAME: &str = "rules.json";

/// Directory for timestamped document backups, relative to the document.
pub const DEFAULT_BACKUP_DIRNAME: &str = "backups";

/// Backups kept by a retention pass.
pub const DEFAULT_BACKUP_KEEP: usize = 20;

/// Maximum feedback events consumed per batch.
pub const DEFAULT_FEEDBACK_BATCH_SIZE: usize = 100;

/// Weight subtracted per false-positive report.
pub const DEFAULT_FALSE_POSITIVE_PENALTY: u32 = 2;

/// Context excerpts retained per rule.
pub const DEFAULT_MAX_EXAMPLES: usize = 5;

/// Longest stored context excerpt, in characters.
pub const DEFAULT_EXCERPT_MAX_CHARS: usize = 160;
