use anyhow::Result;
use tokio::io::AsyncRead;

use qif::io::{QifDocumentReader, QifDocumentWriter};
use qif::processors;

#[tokio::main]
async fn main() -> Result<()> {
  env_logger::init();

  let reader = get_qif_async_read().await?;
  let document_reader = QifDocumentReader::new(reader);
  let document_writer = QifDocumentWriter::new(tokio::io::stdout());

  processors::simple::run(document_reader, document_writer).await
}

type QifAsyncRead = Box<dyn AsyncRead + Unpin + Send + Sync>;

/// Reads the QIF file given as first argument, or stdin when there is none.
/// The normalised document is always written to stdout, and logs go to stderr (see `RUST_LOG`).
async fn get_qif_async_read() -> Result<QifAsyncRead> {
  match std::env::args().nth(1) {
    Some(path) => tokio::fs::File::open(path)
      .await
      .map(|file| Box::new(file) as QifAsyncRead)
      .map_err(anyhow::Error::from),
    None => Ok(Box::new(tokio::io::stdin()) as QifAsyncRead),
  }
}
