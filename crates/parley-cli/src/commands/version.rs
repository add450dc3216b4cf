use anyhow::Result;
use console::style;
use parley::providers::openai::{OpenAiModel, OPENAI_HOST};

pub async fn execute() -> Result<()> {
    println!(
        "{} {} (library {})",
        style("parley").bold().cyan(),
        env!("CARGO_PKG_VERSION"),
        parley::VERSION
    );
    println!(
        "{}",
        style(format!(
            "default model {} at {}",
            OpenAiModel::default(),
            OPENAI_HOST
        ))
        .dim()
    );
    Ok(())
}
