//! Reading and writing of QIF (Quicken Interchange Format) files.
//!
//! The [`qif`] module holds the model and its text format, [`io`] gives access to files and streams,
//! and [`processors`] chains both together.
//

pub mod io;
pub mod processors;
pub mod qif;

pub use crate::io::{load, save};
pub use crate::qif::{
  AccountType, Document, HeaderError, Section, Split, Transaction, TransactionError,
  TransactionStatus,
};
