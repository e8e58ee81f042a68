//! # Curation Service
//!
//! Both halves of the curated path around an external language model:
//! render the prompt going out, and turn the reply coming back into linked
//! recommendations. The model call itself belongs to the caller.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use curator::{
    CuratedRecommendation, PromptRequest, PromptTemplate, ResponseNormalizer, SearchLinkResolver,
    VideoResolver, curate, recommendations_from_object,
};

pub struct CurationService {
    template: PromptTemplate,
    normalizer: ResponseNormalizer,
    resolver: Arc<dyn VideoResolver>,
}

impl CurationService {
    /// Default template, default extraction chain, plain search links.
    pub fn new() -> Self {
        Self {
            template: PromptTemplate::default(),
            normalizer: ResponseNormalizer::default(),
            resolver: Arc::new(SearchLinkResolver),
        }
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Replace the template with the contents of `path`.
    pub fn with_template_file(self, path: &Path) -> Result<Self> {
        let template = PromptTemplate::from_file(path)
            .with_context(|| format!("Failed to load prompt template from {}", path.display()))?;
        Ok(self.with_template(template))
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn VideoResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Render the prompt for one request.
    pub fn prompt(&self, request: &PromptRequest) -> Result<String> {
        let prompt = self
            .template
            .render(request)
            .context("Failed to render prompt")?;
        debug!("Rendered prompt of {} chars", prompt.len());
        Ok(prompt)
    }

    /// Normalize a model reply and attach a link to every identifiable item.
    #[instrument(skip(self, raw), fields(raw_len = raw.len()))]
    pub fn interpret(&self, raw: &str) -> Result<Vec<CuratedRecommendation>> {
        let object = self
            .normalizer
            .normalize(raw)
            .context("Model reply did not contain usable recommendations")?;

        let curated = curate(recommendations_from_object(&object), self.resolver.as_ref());
        info!(
            "Interpreted {} recommendations ({} linked)",
            curated.len(),
            curated.iter().filter(|c| c.link.is_some()).count()
        );
        Ok(curated)
    }
}

impl Default for CurationService {
    fn default() -> Self {
        Self::new()
    }
}
