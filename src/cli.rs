//! Command-line interface implementation for kitgen.
//! Provides argument parsing and help text formatting using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::constants::DEFAULT_TEMPLATES_DIR;
use crate::installer::InstallOptions;
use crate::selection::TagPolicy;

/// Command-line arguments structure for kitgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "kitgen: scaffold a web or mobile starter-kit application", long_about = None)]
pub struct Args {
    /// Name of the application to scaffold
    #[arg(value_name = "APP_NAME")]
    pub app_name: Option<String>,

    /// Template directory to generate from
    #[arg(long, value_name = "DIR", default_value = DEFAULT_TEMPLATES_DIR)]
    pub templates: PathBuf,

    /// Directory where the project is generated
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Read answers from a JSON or YAML file instead of prompting
    #[arg(long, value_name = "FILE")]
    pub automate: Option<PathBuf>,

    /// Do not install dependencies after generation
    #[arg(long)]
    pub skip_install: bool,

    /// Do not print the manual installation hint when installation is skipped
    #[arg(long)]
    pub skip_message: bool,

    /// Generate into a non-empty output directory
    #[arg(short, long)]
    pub force: bool,

    /// Treat conditional names with unknown tags as unconditional instead of failing
    #[arg(long)]
    pub legacy_tags: bool,

    /// Glob pattern of template files to leave out (repeatable)
    #[arg(short, long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn tag_policy(&self) -> TagPolicy {
        if self.legacy_tags {
            TagPolicy::Permissive
        } else {
            TagPolicy::Strict
        }
    }

    pub fn install_options(&self) -> InstallOptions {
        InstallOptions {
            skip_install: self.skip_install,
            skip_message: self.skip_message,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
