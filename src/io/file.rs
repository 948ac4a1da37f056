use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::{self, File};

use super::reader::{DocumentReader, QifDocumentReader};
use super::writer::{DocumentWriter, QifDocumentWriter};
use crate::qif::Document;

/// Load a document from a UTF-8 encoded QIF file.
pub async fn load<P: AsRef<Path>>(path: P) -> Result<Document> {
  let path = path.as_ref();
  let file = File::open(path)
    .await
    .with_context(|| format!("Could not open {}", path.display()))?;

  QifDocumentReader::new(file)
    .read_document()
    .await
    .with_context(|| format!("Could not load {}", path.display()))
}

/// Save a document into a QIF file, replacing its content.
///
/// The text is written into a temporary file next to `path` that is then renamed,
/// so readers see either the previous content or the new one.
pub async fn save<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
  let path = path.as_ref();
  let temporary_path = temporary_path(path)?;

  let file = File::create(&temporary_path)
    .await
    .with_context(|| format!("Could not create {}", temporary_path.display()))?;

  let mut writer = QifDocumentWriter::new(file);
  if let Err(error) = writer.write_document(document).await {
    drop(writer);
    fs::remove_file(&temporary_path).await.ok();
    return Err(error.context(format!("Could not write {}", temporary_path.display())));
  }
  drop(writer);

  fs::rename(&temporary_path, path)
    .await
    .with_context(|| format!("Could not save {}", path.display()))
}

fn temporary_path(path: &Path) -> Result<PathBuf> {
  let file_name = path
    .file_name()
    .with_context(|| format!("{} is not a file path", path.display()))?;

  let mut temporary_name = OsString::from(".");
  temporary_name.push(file_name);
  temporary_name.push(".tmp");

  Ok(path.with_file_name(temporary_name))
}
