//! Service-backed synthesis with per-artifact template fallback

use async_trait::async_trait;
use std::sync::Arc;

use crate::generation::backends::template::TemplateBackend;
use crate::generation::prompt::PromptBuilder;
use crate::generation::traits::{GenerationBackend, TextGenerationService};
use crate::generation::types::{
    BackendKind, FallbackReason, GenerationRequest, ServiceReply, Synthesis, SynthesisOrigin,
};

/// Asks the text-generation service for page and test classes.
///
/// The shared base classes always come from templates. When the service
/// fails for an artifact, that artifact gets template output instead; the
/// next artifact still goes to the service.
pub struct ServiceBackend {
    service: Arc<dyn TextGenerationService>,
    prompts: PromptBuilder,
    templates: TemplateBackend,
}

impl ServiceBackend {
    pub fn new(service: Arc<dyn TextGenerationService>, templates: TemplateBackend) -> Self {
        Self {
            prompts: PromptBuilder::new(templates.settings().clone()),
            service,
            templates,
        }
    }

    fn fallback(&self, request: GenerationRequest<'_>, reason: FallbackReason) -> Synthesis {
        Synthesis {
            text: self.templates.synthesize(request),
            origin: SynthesisOrigin::Fallback(reason),
        }
    }
}

#[async_trait]
impl GenerationBackend for ServiceBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Service {
            model: self.service.model().to_string(),
        }
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> Synthesis {
        let prompt = match request {
            GenerationRequest::Page(page) => self.prompts.build_page_prompt(page),
            GenerationRequest::TestClass(class) => self.prompts.build_class_prompt(
                &class.name,
                &class.scenarios,
                class.pages().into_iter().collect(),
            ),
            GenerationRequest::BasePage | GenerationRequest::BaseTest => {
                return Synthesis::template(self.templates.synthesize(request));
            }
        };

        let class = request.class_name();
        let prompt = match prompt {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::error!(class, error = %e, "Failed to build prompt; using template");
                return self.fallback(request, FallbackReason::Fatal(e.to_string()));
            }
        };

        match self.service.generate(&prompt).await {
            ServiceReply::Text(text) => {
                let package = self.templates.settings().package_for(request.kind());
                tracing::debug!(class, chars = text.len(), "Service generated class");
                Synthesis::service(self.service.sanitize(&text, package))
            }
            ServiceReply::Recoverable(e) => {
                tracing::warn!(class, error = %e, "Service generation failed; using template");
                self.fallback(request, FallbackReason::Recoverable(e.to_string()))
            }
            ServiceReply::Fatal(e) => {
                tracing::error!(class, error = %e, "Service request could not be made; using template");
                self.fallback(request, FallbackReason::Fatal(e.to_string()))
            }
        }
    }
}
