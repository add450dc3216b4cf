use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::{debug, warn};

use super::base::Provider;
use super::configs::OpenAiProviderConfig;
use super::trace::{NoopTrace, TraceSink, WriterTrace};
use super::utils::{chat_content, check_openai_error, completion_text, transcript_to_openai_spec};
use crate::errors::{BackendError, Error, Result};
use crate::models::{Message, Role, Transcript};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_HOST: &str = "https://api.openai.com";

const COMPLETIONS_ENDPOINT: &str = "v1/completions";
const CHAT_COMPLETIONS_ENDPOINT: &str = "v1/chat/completions";

/// Model identifiers understood by the OpenAI backend.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum OpenAiModel {
    #[strum(serialize = "gpt-4")]
    Gpt4,
    #[strum(serialize = "gpt-4o")]
    Gpt4o,
    #[strum(serialize = "gpt-4o-mini")]
    Gpt4oMini,
    #[strum(serialize = "gpt-4-turbo")]
    Gpt4Turbo,
    #[default]
    #[strum(serialize = "gpt-3.5-turbo")]
    Gpt3Dot5Turbo,
    #[strum(serialize = "text-davinci-003")]
    TextDavinci003,
    #[strum(serialize = "text-davinci-002")]
    TextDavinci002,
    #[strum(serialize = "text-curie-001")]
    TextCurie001,
    #[strum(serialize = "text-babbage-001")]
    TextBabbage001,
    #[strum(serialize = "text-ada-001")]
    TextAda001,
    #[strum(serialize = "text-davinci-001")]
    TextDavinci001,
    #[strum(serialize = "davinci")]
    Davinci,
    #[strum(serialize = "curie")]
    Curie,
    #[strum(serialize = "ada")]
    Ada,
    #[strum(serialize = "babbage")]
    Babbage,
}

impl OpenAiModel {
    /// Whether the model is served by the legacy completions endpoint. Chat models
    /// (`gpt-*`) are only served by chat completions.
    pub fn supports_completions(&self) -> bool {
        !self.as_ref().starts_with("gpt-")
    }
}

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
    trace: Arc<dyn TraceSink>,
}

impl OpenAiProvider {
    /// Build a provider from a complete configuration.
    ///
    /// Fails with [`Error::MissingCredential`] when the API key is empty; no request is
    /// made either way. Verbose configurations trace to stdout, others trace nowhere.
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        Self::with_trace_writer(config, std::io::stdout())
    }

    /// Like [`new`](Self::new), but a verbose configuration traces into `writer`.
    pub fn with_trace_writer<W>(config: OpenAiProviderConfig, writer: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingCredential(OPENAI_API_KEY.to_string()));
        }

        let client = Client::builder().build().map_err(BackendError::from)?;
        let trace: Arc<dyn TraceSink> = if config.verbose {
            Arc::new(WriterTrace::new(writer))
        } else {
            Arc::new(NoopTrace)
        };

        Ok(Self {
            client,
            config,
            trace,
        })
    }

    /// Build a provider from `OPENAI_API_KEY` and the optional settings next to it.
    pub fn from_env() -> Result<Self> {
        use super::configs::ProviderConfig;
        Self::new(OpenAiProviderConfig::from_env()?)
    }

    /// Replace the trace sink chosen from the `verbose` flag.
    pub fn with_trace(mut self, trace: Arc<dyn TraceSink>) -> Self {
        self.trace = trace;
        self
    }

    pub fn config(&self) -> &OpenAiProviderConfig {
        &self.config
    }

    pub fn model(&self) -> OpenAiModel {
        self.config.model
    }

    async fn post(&self, endpoint: &str, payload: Value) -> Result<Value> {
        let url = format!("{}/{}", self.config.host.trim_end_matches('/'), endpoint);
        debug!(%url, model = %self.config.model, "sending request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(BackendError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, %status, "request rejected");
            return Err(BackendError::Status { status, body }.into());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        check_openai_error(&body)?;
        Ok(body)
    }

    fn check_roles(&self, transcript: &Transcript) -> Result<()> {
        let unrecognized = transcript.unrecognized_roles();
        if unrecognized.is_empty() {
            return Ok(());
        }
        if self.config.strict_roles {
            return Err(Error::InvalidInput(format!(
                "transcript contains roles the backend does not accept: {}",
                unrecognized
                    .iter()
                    .map(|r| r.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        debug!(dropped = unrecognized.len(), "dropping messages with unrecognized roles");
        Ok(())
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": self.config.model.as_ref(),
            "prompt": prompt,
        });

        let response = self.post(COMPLETIONS_ENDPOINT, payload).await?;
        let output = completion_text(&response)?;

        self.trace.record(&Role::User, prompt);
        self.trace.record(&Role::Assistant, &output);

        Ok(output)
    }

    async fn chat(&self, transcript: &Transcript) -> Result<Message> {
        self.check_roles(transcript)?;

        let messages = transcript_to_openai_spec(transcript);
        debug!(messages = messages.len(), "chat request");
        let payload = json!({
            "model": self.config.model.as_ref(),
            "messages": messages,
        });

        let response = self.post(CHAT_COMPLETIONS_ENDPOINT, payload).await?;
        let content = chat_content(&response)?;

        for message in transcript.conversational() {
            self.trace.record(&message.role, &message.content);
        }
        self.trace.record(&Role::Assistant, &content);

        Ok(Message::assistant(content))
    }
}
