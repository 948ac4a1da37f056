use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use thiserror::Error;

use super::format::{format_amount, format_date, parse_amount, parse_date, LINE_ENDING, RECORD_SEPARATOR};
use super::split::Split;
use super::status::TransactionStatus;

const AMOUNT_FIELD: &str = "amount";
const SPLIT_AMOUNT_FIELD: &str = "split amount";
const SPLIT_PERCENTAGE_FIELD: &str = "split percentage";

pub type Result<T> = core::result::Result<T, TransactionError>;

/// Errors found while reading a transaction record.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransactionError {
  #[error("Date could not be found")]
  NoDateFound,

  #[error("Date '{0}' does not follow the MM/DD/YYYY format")]
  WrongDateFormat(String),

  #[error("Value '{0}' of field {1} is not numerical")]
  ValueNotNumerical(String, &'static str),

  #[error("Field {0} could not be found")]
  FieldNotFound(&'static str),

  #[error("Payee could not be found")]
  NoVendor,
}

/// A non investment transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transaction {
  pub date: NaiveDate,
  pub check_number: Option<i64>,
  pub payee: String,
  pub address: String,
  pub amount: Decimal,
  pub category: Option<String>,
  pub memo: String,
  pub status: Option<TransactionStatus>,
  pub splits: Vec<Split>,
}

impl Transaction {
  /// Creates a transaction with no optional data. The address is the payee.
  pub fn new(date: NaiveDate, payee: String, amount: Decimal) -> Self {
    Self {
      date,
      check_number: None,
      address: payee.clone(),
      payee,
      amount,
      category: None,
      memo: String::new(),
      status: None,
      splits: Vec::new(),
    }
  }

  /// Reads one record. Lines whose first character is not a known field code are ignored,
  /// which includes the record separator and section headers.
  pub fn parse(block: &str) -> Result<Transaction> {
    RawTransaction::scan(block).into_transaction()
  }

  /// Writes the record with every field, including empty ones. An absent check number is written as `N0`.
  pub fn to_text(&self) -> String {
    self.to_string()
  }
}

impl FromStr for Transaction {
  type Err = TransactionError;

  fn from_str(block: &str) -> Result<Self> {
    Transaction::parse(block)
  }
}

impl fmt::Display for Transaction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let eol = LINE_ENDING;
    write!(f, "D{}{}", format_date(&self.date), eol)?;
    write!(f, "T{}{}", format_amount(&self.amount), eol)?;
    write!(f, "C{}{}", self.status.map(|s| s.code()).unwrap_or_default(), eol)?;
    write!(f, "N{}{}", self.check_number.unwrap_or(0), eol)?;
    write!(f, "P{}{}", self.payee, eol)?;
    write!(f, "M{}{}", self.memo, eol)?;
    write!(f, "A{}{}", self.address, eol)?;
    write!(f, "L{}{}", self.category.as_deref().unwrap_or_default(), eol)?;
    for split in &self.splits {
      write!(f, "{}{}", split, eol)?;
    }
    write!(f, "{}", RECORD_SEPARATOR)
  }
}

/// Field codes recognised at the start of a record line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldCode {
  Date,
  Amount,
  CheckNumber,
  Payee,
  Address,
  Category,
  Memo,
  Status,
  Split,
  SplitMemo,
  SplitAmount,
  SplitPercentage,
}

impl FieldCode {
  fn from_char(code: char) -> Option<FieldCode> {
    match code {
      'D' => Some(FieldCode::Date),
      'T' | 'U' => Some(FieldCode::Amount),
      'N' => Some(FieldCode::CheckNumber),
      'P' => Some(FieldCode::Payee),
      'A' => Some(FieldCode::Address),
      'L' => Some(FieldCode::Category),
      'M' => Some(FieldCode::Memo),
      'C' => Some(FieldCode::Status),
      'S' => Some(FieldCode::Split),
      'E' => Some(FieldCode::SplitMemo),
      '$' => Some(FieldCode::SplitAmount),
      '%' => Some(FieldCode::SplitPercentage),
      _ => None,
    }
  }
}

#[derive(Debug)]
enum RawSplitAmount<'a> {
  Fixed(&'a str),
  Percentage(&'a str),
}

#[derive(Debug, Default)]
struct RawSplit<'a> {
  category: Option<&'a str>,
  memo: Option<&'a str>,
  amount: Option<RawSplitAmount<'a>>,
}

impl<'a> RawSplit<'a> {
  /// Percentages are resolved against the transaction amount, wherever its line appeared.
  fn into_split(self, transaction_amount: Decimal) -> Result<Split> {
    let amount = match self.amount {
      None => Decimal::ZERO,
      Some(RawSplitAmount::Fixed(text)) => parse_amount(text)
        .ok_or_else(|| TransactionError::ValueNotNumerical(text.to_string(), SPLIT_AMOUNT_FIELD))?,
      Some(RawSplitAmount::Percentage(text)) => {
        let percentage = parse_amount(text.trim().trim_end_matches('%')).ok_or_else(|| {
          TransactionError::ValueNotNumerical(text.to_string(), SPLIT_PERCENTAGE_FIELD)
        })?;
        transaction_amount
          .checked_mul(percentage)
          .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED))
          .ok_or_else(|| {
            TransactionError::ValueNotNumerical(text.to_string(), SPLIT_PERCENTAGE_FIELD)
          })?
      }
    };

    Ok(Split {
      category: self.category.map(str::to_string),
      memo: self.memo.unwrap_or_default().to_string(),
      amount,
    })
  }
}

/// Field values collected while scanning the lines of a record, before any validation.
#[derive(Debug, Default)]
struct RawTransaction<'a> {
  date: Option<&'a str>,
  amount: Option<&'a str>,
  check_number: Option<&'a str>,
  payee: Option<&'a str>,
  address: Option<&'a str>,
  category: Option<&'a str>,
  memo: Option<&'a str>,
  status: Option<&'a str>,
  splits: Vec<RawSplit<'a>>,
  current_split: Option<usize>,
}

impl<'a> RawTransaction<'a> {
  fn scan(block: &'a str) -> Self {
    let mut raw = RawTransaction::default();
    for line in block.lines() {
      let line = line.trim_start().trim_end_matches('\r');
      let mut chars = line.chars();
      if let Some(code) = chars.next().and_then(FieldCode::from_char) {
        raw.apply(code, chars.as_str());
      }
    }
    raw
  }

  fn apply(&mut self, code: FieldCode, value: &'a str) {
    match code {
      FieldCode::Date => self.date = Some(value),
      FieldCode::Amount => self.amount = Some(value),
      FieldCode::CheckNumber => self.check_number = Some(value),
      FieldCode::Payee => self.payee = Some(value),
      FieldCode::Address => self.address = Some(value),
      FieldCode::Category => self.category = Some(value),
      FieldCode::Memo => self.memo = Some(value),
      FieldCode::Status => self.status = Some(value),
      FieldCode::Split => {
        let category = Some(value)
          .filter(|category| !category.is_empty())
          .or_else(|| self.category.filter(|category| !category.is_empty()));
        self.splits.push(RawSplit {
          category,
          ..RawSplit::default()
        });
        self.current_split = Some(self.splits.len() - 1);
      }
      FieldCode::SplitMemo => self.current_split_mut().memo = Some(value),
      FieldCode::SplitAmount => {
        self.current_split_mut().amount = Some(RawSplitAmount::Fixed(value))
      }
      FieldCode::SplitPercentage => {
        self.current_split_mut().amount = Some(RawSplitAmount::Percentage(value))
      }
    }
  }

  /// The split the next `E`, `$` or `%` line applies to, created when there is none yet.
  fn current_split_mut(&mut self) -> &mut RawSplit<'a> {
    let index = match self.current_split {
      Some(index) => index,
      None => {
        self.splits.push(RawSplit::default());
        let index = self.splits.len() - 1;
        self.current_split = Some(index);
        index
      }
    };
    &mut self.splits[index]
  }

  fn into_transaction(self) -> Result<Transaction> {
    let date_text = self.date.ok_or(TransactionError::NoDateFound)?;
    let date = parse_date(date_text)
      .ok_or_else(|| TransactionError::WrongDateFormat(date_text.to_string()))?;

    let amount_text = self
      .amount
      .ok_or(TransactionError::FieldNotFound(AMOUNT_FIELD))?;
    let amount = parse_amount(amount_text)
      .ok_or_else(|| TransactionError::ValueNotNumerical(amount_text.to_string(), AMOUNT_FIELD))?;

    // `N0` is how an absent check number is written
    let check_number = self
      .check_number
      .and_then(|text| text.trim().parse::<i64>().ok())
      .filter(|number| *number != 0);

    let payee = self.payee.ok_or(TransactionError::NoVendor)?.to_string();
    let address = self
      .address
      .map_or_else(|| payee.clone(), str::to_string);

    let category = self
      .category
      .filter(|category| !category.is_empty())
      .map(str::to_string);

    let status = self
      .status
      .map(str::trim)
      .filter(|code| !code.is_empty())
      .and_then(|code| {
        let status = TransactionStatus::from_code(code);
        if status.is_none() {
          debug!("Ignoring unknown transaction status '{}'", code);
        }
        status
      });

    let splits = self
      .splits
      .into_iter()
      .map(|split| split.into_split(amount))
      .collect::<Result<Vec<Split>>>()?;

    Ok(Transaction {
      date,
      check_number,
      payee,
      address,
      amount,
      category,
      memo: self.memo.unwrap_or_default().to_string(),
      status,
      splits,
    })
  }
}
