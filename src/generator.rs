//! Generation pipeline: scan, classify, select, persist state, write.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::{
    answers::AnswerSet,
    classifier::{classify, TemplateFile},
    error::Result,
    processor::Processor,
    registry::PredicateRegistry,
    renderer::{render_context, TemplateRenderer},
    scanner::{scan, ScanFilter},
    selection::{GenerationPlan, SelectionEngine, TagPolicy},
    state::GeneratorState,
};

/// Files written by one generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
}

/// Everything one generation run needs, passed explicitly through each stage.
pub struct Generator<'a> {
    template_root: PathBuf,
    output_root: PathBuf,
    registry: &'a PredicateRegistry,
    renderer: &'a dyn TemplateRenderer,
    filter: ScanFilter,
    policy: TagPolicy,
}

impl<'a> Generator<'a> {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        template_root: P,
        output_root: Q,
        registry: &'a PredicateRegistry,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            template_root: template_root.into(),
            output_root: output_root.into(),
            registry,
            renderer,
            filter: ScanFilter::default(),
            policy: TagPolicy::default(),
        }
    }

    pub fn with_filter(mut self, filter: ScanFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_policy(mut self, policy: TagPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Scans and classifies the whole template tree.
    pub fn classify_all(&self) -> Result<Vec<TemplateFile>> {
        scan(&self.template_root, &self.filter)?
            .iter()
            .map(|path| classify(&self.template_root, path))
            .collect()
    }

    /// Decides which files are written, without touching the output root.
    pub fn plan(&self, answers: &AnswerSet) -> Result<GenerationPlan> {
        let files = self.classify_all()?;
        debug!("Classified {} template files", files.len());
        SelectionEngine::new(self.registry, self.policy).plan(files, answers)
    }

    /// Runs the full pipeline.
    ///
    /// The state record is written once selection succeeded and before any project file.
    /// A failure while writing leaves the files written so far in place.
    pub fn generate(&self, answers: &AnswerSet) -> Result<GenerationReport> {
        let plan = self.plan(answers)?;
        info!(
            "Generating {} files ({} skipped) into {}",
            plan.len(),
            plan.skipped().len(),
            self.output_root.display()
        );

        std::fs::create_dir_all(&self.output_root)?;
        GeneratorState::new(answers).save(&self.output_root)?;

        let context = render_context(answers)?;
        let mut processor =
            Processor::new(self.renderer, &self.template_root, &self.output_root, &context);
        let mut report = GenerationReport {
            skipped: plan.skipped().len(),
            ..Default::default()
        };

        for file in plan.files() {
            let result = processor.process(file)?;
            let target = processor.apply(&result)?;
            info!("{}: '{}'", result.action(), target.display());
            report.written.push(target);
        }
        Ok(report)
    }
}
