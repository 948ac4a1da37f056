use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use log::debug;

use super::account_type::{AccountType, HeaderError, Result};
use super::format::LINE_ENDING;
use super::transaction::Transaction;

/// The transactions found under one `!Type:` header.
///
/// Transactions form a set: equal transactions are kept once and their order carries no meaning.
/// They are written sorted by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
  pub account_type: AccountType,
  pub transactions: BTreeSet<Transaction>,
}

impl Section {
  pub fn new(account_type: AccountType, transactions: BTreeSet<Transaction>) -> Self {
    Self {
      account_type,
      transactions,
    }
  }

  pub fn empty(account_type: AccountType) -> Self {
    Self::new(account_type, BTreeSet::new())
  }

  /// Reads a header line optionally followed by a single transaction record.
  /// A body that is not a valid transaction gives an empty section.
  pub fn parse(block: &str) -> Result<Section> {
    let account_type = AccountType::parse_header(block)?;

    let transactions: BTreeSet<Transaction> = match Transaction::parse(block) {
      Ok(transaction) => vec![transaction].into_iter().collect(),
      Err(error) => {
        debug!("Section {} starts without a transaction: {}", account_type, error);
        BTreeSet::new()
      }
    };

    Ok(Section::new(account_type, transactions))
  }

  /// Adds a transaction and returns whether it was not already present.
  pub fn insert(&mut self, transaction: Transaction) -> bool {
    self.transactions.insert(transaction)
  }

  pub fn len(&self) -> usize {
    self.transactions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.transactions.is_empty()
  }

  pub fn to_text(&self) -> String {
    self.to_string()
  }
}

impl FromStr for Section {
  type Err = HeaderError;

  fn from_str(block: &str) -> Result<Self> {
    Section::parse(block)
  }
}

impl fmt::Display for Section {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.account_type.header(), LINE_ENDING)?;
    for transaction in &self.transactions {
      write!(f, "{}{}", transaction, LINE_ENDING)?;
    }
    Ok(())
  }
}
