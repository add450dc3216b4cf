use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::errors::{Error, Result};
use crate::models::{Message, Transcript};
use crate::providers::base::Provider;

/// A mock provider that returns pre-configured responses for testing
///
/// Once the queue is exhausted every call fails with [`Error::NoCandidates`], the same
/// way a backend answering with zero choices would.
#[derive(Default)]
pub struct MockProvider {
    responses: Mutex<VecDeque<Message>>,
    prompts: Mutex<Vec<String>>,
    transcripts: Mutex<Vec<Transcript>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Message>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    /// Prompts passed to `complete`, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Transcripts passed to `chat`, in call order
    pub fn transcripts(&self) -> Vec<Transcript> {
        self.transcripts.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<Message> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(Error::NoCandidates)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.next_response()?.content.trim().to_string())
    }

    async fn chat(&self, transcript: &Transcript) -> Result<Message> {
        self.transcripts.lock().unwrap().push(transcript.clone());
        let reply = self.next_response()?;
        Ok(Message::assistant(reply.content))
    }
}
