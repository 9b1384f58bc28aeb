use std::sync::Arc;

use crate::config::AppConfig;
use crate::crm::HubSpotClient;
use crate::llm::{GeminiClient, LLMProvider};

/// Shared, immutable per-process state handed to every handler.
pub struct AppState {
    pub config: AppConfig,
    pub crm: HubSpotClient,
    /// `None` when no language-model key is configured.
    pub llm: Option<Arc<dyn LLMProvider>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let http = reqwest::Client::new();
        let crm = HubSpotClient::new(http.clone(), &config.hubspot);
        let llm = config.gemini.api_key.clone().map(|key| {
            Arc::new(GeminiClient::new(
                http,
                &config.gemini.api_base,
                &config.gemini.model,
                key,
            )) as Arc<dyn LLMProvider>
        });

        Self { config, crm, llm }
    }

    /// Replaces the language model, e.g. with a stub in tests.
    pub fn with_llm(mut self, llm: Option<Arc<dyn LLMProvider>>) -> Self {
        self.llm = llm;
        self
    }
}
