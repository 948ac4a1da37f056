use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::format::HEADER_PREFIX;

pub type Result<T> = core::result::Result<T, HeaderError>;

/// Errors found while reading a section header.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HeaderError {
  #[error("Incorrect header format, expected a line like {}<account type>", HEADER_PREFIX)]
  IncorrectHeaderFormat,

  #[error("Invalid account type '{0}', expected one of Cash, Bank, CCard, Oth L or Oth A")]
  InvalidAccountType(String),

  #[error("No valid section found")]
  NoValidSections,
}

/// The kinds of account a QIF section can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccountType {
  Cash,
  Bank,
  CreditCard,
  Liability,
  Asset,
}

impl AccountType {
  pub const ALL: [AccountType; 5] = [
    AccountType::Cash,
    AccountType::Bank,
    AccountType::CreditCard,
    AccountType::Liability,
    AccountType::Asset,
  ];

  /// The name used for this account type in a `!Type:` header.
  pub fn name(&self) -> &'static str {
    match self {
      AccountType::Cash => "Cash",
      AccountType::Bank => "Bank",
      AccountType::CreditCard => "CCard",
      AccountType::Liability => "Oth L",
      AccountType::Asset => "Oth A",
    }
  }

  /// Reads the header on the first line of `text`, once the whole text has been trimmed.
  pub fn parse_header(text: &str) -> Result<AccountType> {
    let line = text.trim().lines().next().unwrap_or_default().trim_end();
    line
      .strip_prefix(HEADER_PREFIX)
      .ok_or(HeaderError::IncorrectHeaderFormat)
      .and_then(AccountType::from_str)
  }

  pub fn header(&self) -> String {
    format!("{}{}", HEADER_PREFIX, self.name())
  }
}

impl FromStr for AccountType {
  type Err = HeaderError;

  fn from_str(name: &str) -> Result<Self> {
    AccountType::ALL
      .iter()
      .copied()
      .find(|account_type| account_type.name() == name)
      .ok_or_else(|| HeaderError::InvalidAccountType(name.to_string()))
  }
}

impl fmt::Display for AccountType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
