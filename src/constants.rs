//! Common constants used throughout the kitgen application.

/// Naming-convention prefix that flags templates and conditional files/folders.
pub const MARKER: char = '_';

/// File names never treated as project content.
pub const DEFAULT_EXCLUDED_NAMES: [&str; 2] = [".DS_Store", "Thumbs.db"];

/// Generator-state record written into the output root.
pub const STATE_FILE: &str = ".kitgen.json";

/// Default template root, relative to the working directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Version recorded in the generator-state record and exposed to templates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of file names included only when their tag's predicate holds.
pub const FILENAME_CONDITION_PREFIX: &str = "__";
