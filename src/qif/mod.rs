//! This module contains the QIF model and the logic to read it from and write it to text.
//!
//! A [`Document`] is made of one [`Section`] per [`AccountType`], each one holding a set of [`Transaction`].
//! Reading is lenient at the document level (records that can't be read are skipped),
//! but strict for a single record, which fails with a detailed [`TransactionError`].
//!
//! The fixed format rules (date pattern, separators, amount precision) live in [`format`].
//

mod account_type;
mod document;
pub mod format;
mod section;
mod split;
mod status;
mod transaction;

pub use account_type::{AccountType, HeaderError};
pub use document::Document;
pub use section::Section;
pub use split::Split;
pub use status::TransactionStatus;
pub use transaction::{Transaction, TransactionError};
