use anyhow::Result;
use parley::providers::base::Provider;
use parley::providers::openai::OpenAiModel;

pub async fn execute(provider: &dyn Provider, prompt: &str) -> Result<()> {
    let output = provider.complete(prompt).await?;
    println!("{}", output);
    Ok(())
}

/// Chat models are rejected by the completions endpoint, including the default model.
pub fn model_warning(model: OpenAiModel) -> Option<String> {
    if model.supports_completions() {
        return None;
    }
    Some(format!(
        "Warning: {} is a chat model and the completions endpoint will likely reject it. \
        Pass --model {} or another completion model.",
        model,
        OpenAiModel::TextDavinci003
    ))
}
