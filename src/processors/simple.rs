use anyhow::Result;
use log::info;

use crate::io::{DocumentReader, DocumentWriter};

/// This is a simple processor of QIF documents that
/// - reads a document from a [`DocumentReader`]
/// - writes it back using a [`DocumentWriter`]
///
/// The result is a normalised version of the input: dates as `MM/DD/YYYY`, every field written,
/// transactions sorted by date, duplicated records removed and `\r\n` line endings.
///
/// Records that can't be read are skipped by the reader (they are logged at debug level),
/// so only undecodable input or input without any valid section is an error.
///
pub async fn run<R, W>(mut document_reader: R, mut document_writer: W) -> Result<()>
where
  R: DocumentReader,
  W: DocumentWriter,
{
  let document = document_reader.read_document().await?;

  for section in document.sections() {
    info!(
      "Section {}: {} transactions",
      section.account_type,
      section.len()
    );
  }

  document_writer.write_document(&document).await
}
