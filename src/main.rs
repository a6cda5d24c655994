//! kitgen's main application entry point and orchestration logic.
//! Handles command-line argument parsing, answer collection, generation
//! and dependency installation, in that order.

use std::path::Path;

use kitgen::{
    answers::load_answers_file,
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    generator::Generator,
    installer::{CommandInstaller, Installer},
    logger::init_logger,
    processor::ensure_output_dir,
    prompt::{DialoguerPrompter, Prompter, Questions},
    registry::PredicateRegistry,
    renderer::MiniJinjaRenderer,
    scanner::ScanFilter,
    state::load_state,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Name suggested for the app: the output directory's own name.
fn default_app_name(output_dir: &Path) -> String {
    let absolute = if output_dir.is_absolute() {
        output_dir.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(output_dir)
    };
    absolute
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("app")
        .to_string()
}

/// Main application logic execution.
///
/// # Flow
/// 1. Collects answers from the answer file or the prompter
/// 2. Checks the output directory
/// 3. Scans, classifies, selects and writes template files
/// 4. Installs dependencies
fn run(args: Args) -> Result<()> {
    println!("Welcome!\nYou're about to scaffold an awesome starter-kit application!\n");

    let previous = load_state(&args.output_dir)?;
    if let Some(previous) = &previous {
        log::info!("Found configuration from kitgen {}", previous.version);
    }

    let default_name = default_app_name(&args.output_dir);
    let answers = match &args.automate {
        Some(answer_file) => {
            load_answers_file(answer_file, args.app_name.as_deref().unwrap_or(&default_name))?
        }
        None => DialoguerPrompter::new().ask(&Questions {
            app_name: args.app_name.clone(),
            default_app_name: default_name,
            previous: previous.as_ref().map(|p| p.props.clone()),
        })?,
    };
    log::debug!("Answers: {:?}", answers);

    // Re-running over a previously generated project is allowed.
    let output_root = ensure_output_dir(&args.output_dir, args.force || previous.is_some())?;

    let filter = ScanFilter::default().with_patterns(&args.exclude)?;
    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    let generator = Generator::new(&args.templates, &output_root, &registry, &renderer)
        .with_filter(filter)
        .with_policy(args.tag_policy());

    let report = generator.generate(&answers)?;
    println!(
        "Generated {} files for '{}' in {}.",
        report.written.len(),
        answers.project_name(),
        output_root.display()
    );

    CommandInstaller::default().install(&output_root, args.install_options())?;

    println!("\nAll done!");
    Ok(())
}
