use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::qif::Document;

/// Interface to read a QIF document from an external source
#[async_trait]
pub trait DocumentReader {
  /// Read the whole source and parse it as a [`Document`].
  /// Records that can't be read are skipped, but undecodable text or a text without sections are an `Err`.
  async fn read_document(&mut self) -> Result<Document>;
}

/// Implementation of [`DocumentReader`] for UTF-8 encoded QIF text.
pub struct QifDocumentReader<R>(R);

impl<R> QifDocumentReader<R>
where
  R: AsyncRead + Unpin + Send,
{
  pub fn new(reader: R) -> Self {
    Self(reader)
  }
}

#[async_trait]
impl<R> DocumentReader for QifDocumentReader<R>
where
  R: AsyncRead + Unpin + Send,
{
  async fn read_document(&mut self) -> Result<Document> {
    let mut bytes = Vec::new();
    self.0.read_to_end(&mut bytes).await?;

    let text = String::from_utf8(bytes).context("QIF text is not valid UTF-8")?;

    Document::parse(&text).map_err(anyhow::Error::from)
  }
}
