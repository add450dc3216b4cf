//! Sources of plain-text [`Document`]s.
use async_trait::async_trait;

use crate::errors::Result;
use crate::models::Document;

pub mod pdf_to_text;

pub use pdf_to_text::PdfToTextLoader;

#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self) -> Result<Vec<Document>>;
}
