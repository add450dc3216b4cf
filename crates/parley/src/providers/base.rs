use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{Message, Transcript};

/// Base trait for language-model backends (OpenAI, ...)
///
/// An implementation only holds immutable configuration, so one instance can serve
/// concurrent calls. Neither operation retries, times out, or cancels on its own; wrap
/// the future with a deadline if you need bounded latency.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Single-shot completion of a bare prompt, returning the first candidate's text
    /// with surrounding whitespace trimmed.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Generate the next assistant message for the given transcript.
    ///
    /// The transcript is only borrowed; appending the reply is left to the caller.
    async fn chat(&self, transcript: &Transcript) -> Result<Message>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Box<P> {
    async fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt).await
    }

    async fn chat(&self, transcript: &Transcript) -> Result<Message> {
        (**self).chat(transcript).await
    }
}
