use anyhow::{Context, Result};
use console::style;
use parley::loader::{Loader, PdfToTextLoader};
use std::path::PathBuf;

pub async fn execute(path: PathBuf, pdftotext: PathBuf) -> Result<()> {
    let docs = PdfToTextLoader::new(pdftotext, &path)
        .load()
        .await
        .with_context(|| format!("Failed to load {}", path.display()))?;

    for doc in docs {
        println!(
            "{}",
            style(format!("--- {} ---", doc.source().unwrap_or("unknown"))).bold()
        );
        println!("{}", doc.content.trim_end());
    }
    Ok(())
}
