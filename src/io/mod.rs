//! This module contains all the components needed to read and write QIF documents from files and streams.
//!
//! The [`reader`] module reads a [`Document`](crate::qif::Document) from any [`AsyncRead`](tokio::io::AsyncRead),
//! and the [`writer`] module writes one into any [`AsyncWrite`](tokio::io::AsyncWrite).
//! Other sources or destinations can be supported by implementing the traits [`DocumentReader`] and [`DocumentWriter`].
//!
//! The [`file`] module builds on both to load and save documents from paths.
//

mod file;
mod reader;
mod writer;

pub use file::{load, save};
pub use reader::{DocumentReader, QifDocumentReader};
pub use writer::{DocumentWriter, QifDocumentWriter};
