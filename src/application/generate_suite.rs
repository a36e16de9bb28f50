//! Use case for generating a page-object test suite from scenarios

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::report::{ArtifactOutcome, EmitStatus, RunReport};
use crate::application::{ApplicationError, EmitResult, OutputService};
use crate::core::config::{Config, ServiceConfig};
use crate::generation::{
    Artifact, GenerationBackend, GenerationPlan, GenerationRequest, GenerationSettings,
    OutputLayout, PageCatalog, ScenarioLoader, ServiceBackend, TemplateBackend,
};
use crate::infrastructure::service::{ServiceClient, ServiceState};

/// Input of one generation run
#[derive(Debug, Clone)]
pub struct GenerateSuiteRequest {
    pub input: PathBuf,
    /// Configuration with CLI overrides already applied
    pub config: Config,
    /// Skip the service probe and use templates only
    pub offline: bool,
}

/// Probe the service once and pick the backend for the whole run.
///
/// Any probe failure selects the template backend.
pub async fn select_backend(
    config: &ServiceConfig,
    settings: GenerationSettings,
    offline: bool,
) -> Box<dyn GenerationBackend> {
    let templates = TemplateBackend::new(settings);
    if offline || !config.enabled {
        tracing::info!("Service disabled; using template backend");
        return Box::new(templates);
    }

    let mut client = match ServiceClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Cannot build service client; using template backend");
            return Box::new(templates);
        }
    };

    match client.probe().await {
        ServiceState::Available => Box::new(ServiceBackend::new(Arc::new(client), templates)),
        _ => {
            tracing::warn!(url = %config.base_url, "Service unavailable; using template backend");
            Box::new(templates)
        }
    }
}

/// Ingest, plan, synthesize, emit, report. Strictly one step at a time.
pub struct GenerateSuiteUseCase {
    loader: Arc<dyn ScenarioLoader>,
    output: Arc<dyn OutputService>,
}

impl GenerateSuiteUseCase {
    pub fn new(loader: Arc<dyn ScenarioLoader>, output: Arc<dyn OutputService>) -> Self {
        Self { loader, output }
    }

    pub async fn execute(&self, request: GenerateSuiteRequest) -> Result<RunReport, ApplicationError> {
        let config = &request.config;
        config.validate()?;

        let specs = self.loader.load(&request.input).await?;
        if specs.is_empty() {
            tracing::warn!(path = %request.input.display(), "No scenarios with a test case id");
        }

        let catalog = PageCatalog::from_config(&config.pages);
        let plan = GenerationPlan::build(&specs, &catalog);
        tracing::info!(
            scenarios = plan.scenario_count,
            pages = plan.pages.len(),
            classes = plan.classes.len(),
            "Planned suite"
        );

        let settings = GenerationSettings::from_config(config);
        let backend = select_backend(&config.service, settings, request.offline).await;
        let layout = OutputLayout::new(&config.output.dir, &config.output);

        let mut report = RunReport::new(
            backend.kind(),
            plan.scenario_count,
            plan.pages.len(),
            plan.classes.len(),
            layout.report_path(),
        );

        let requests = [GenerationRequest::BasePage, GenerationRequest::BaseTest]
            .into_iter()
            .chain(plan.pages.iter().map(GenerationRequest::Page))
            .chain(plan.classes.iter().map(GenerationRequest::TestClass));
        for generation in requests {
            let outcome = self.produce(backend.as_ref(), &layout, generation).await;
            report.record(outcome);
        }

        self.output
            .write_report(&layout.report_path(), &report.render_text())
            .await
            .map_err(ApplicationError::Report)?;

        tracing::info!(
            written = report.written_count(),
            skipped = report.skipped_count(),
            failed = report.failed_count(),
            fallbacks = report.fallback_count(),
            "Generation finished"
        );
        Ok(report)
    }

    /// Synthesize and emit one artifact. Existing files are not synthesized.
    async fn produce(
        &self,
        backend: &dyn GenerationBackend,
        layout: &OutputLayout,
        generation: GenerationRequest<'_>,
    ) -> ArtifactOutcome {
        let kind = generation.kind();
        let name = generation.class_name().to_string();
        let path = layout.path_for(kind, &name);
        let relative = layout.relative(&path).to_path_buf();

        if self.output.exists(&path).await {
            tracing::info!(path = %relative.display(), "File exists; skipping");
            return ArtifactOutcome {
                kind,
                name,
                path: relative,
                origin: None,
                status: EmitStatus::Skipped,
            };
        }

        let synthesis = backend.generate(generation).await;
        let artifact = Artifact {
            kind,
            name,
            path,
            content: synthesis.text,
            origin: synthesis.origin,
        };

        let status = match self.output.emit(&artifact).await {
            Ok(EmitResult::Written) => EmitStatus::Written,
            Ok(EmitResult::Skipped) => EmitStatus::Skipped,
            Err(e) => {
                tracing::error!(path = %relative.display(), error = %e, "Failed to emit artifact");
                EmitStatus::Failed(e.to_string())
            }
        };

        ArtifactOutcome {
            kind: artifact.kind,
            name: artifact.name,
            path: relative,
            origin: Some(artifact.origin),
            status,
        }
    }
}
