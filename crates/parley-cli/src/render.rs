use anyhow::Result;
use bat::PrettyPrinter;

/// Print model output to the terminal as highlighted markdown
pub fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()?;
    Ok(())
}
