//! kitgen scaffolds a starter-kit application from a template tree.
//! File and folder names in the template tree decide which files are rendered,
//! which are copied, and which are left out for the answers given.

/// User answers and answer-file loading
pub mod answers;

/// Naming-convention classification of template files
pub mod classifier;

/// Command-line interface module for the kitgen application
pub mod cli;

pub mod constants;

/// Error types and handling for the kitgen application
pub mod error;

/// Scan, classify, select and write orchestration
pub mod generator;

/// Dependency installation after generation
pub mod installer;

pub mod logger;

/// Writing selected files into the output directory
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Tag predicates evaluated against the answers
pub mod registry;

/// MiniJinja template rendering
pub mod renderer;

/// Template tree traversal
pub mod scanner;

/// Per-file write decisions
pub mod selection;

/// Generator-state record persisted in the generated project
pub mod state;
