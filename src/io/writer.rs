use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::qif::Document;

/// Interface for a QIF document writer
#[async_trait]
pub trait DocumentWriter {
  /// Write the document and return whether the operation was successful or not.
  async fn write_document(&mut self, document: &Document) -> Result<()>;
}

/// An implementation of [`DocumentWriter`] producing UTF-8 QIF text with `\r\n` line endings.
pub struct QifDocumentWriter<W>(W);

impl<W> QifDocumentWriter<W>
where
  W: AsyncWrite + Unpin + Send + Sync,
{
  pub fn new(writer: W) -> Self {
    Self(writer)
  }
}

#[async_trait]
impl<W> DocumentWriter for QifDocumentWriter<W>
where
  W: AsyncWrite + Unpin + Send + Sync,
{
  async fn write_document(&mut self, document: &Document) -> Result<()> {
    self.0.write_all(document.to_text().as_bytes()).await?;
    self.0.flush().await?;
    Ok(())
  }
}
