//! Fixed rules of the QIF text format: separators, the date pattern and how amounts are read and written.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Pattern used both to read and to write dates (`MM/DD/YYYY`)
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Character closing every transaction record
pub const RECORD_SEPARATOR: char = '^';

/// Line ending used when writing. Both `\n` and `\r\n` are accepted when reading.
pub const LINE_ENDING: &str = "\r\n";

/// Literal prefix of a section header line
pub const HEADER_PREFIX: &str = "!Type:";

/// Number of decimals kept when writing amounts
pub const AMOUNT_PRECISION: u32 = 2;

/// Parses a date written as `M/D/YYYY`. Month and day take one or two digits, the year exactly four.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
  let text = text.trim();
  let parts = text.split('/').collect::<Vec<&str>>();

  match parts.as_slice() {
    [month, day, year]
      if is_number(month, 2) && is_number(day, 2) && is_number(year, 4) && year.len() == 4 =>
    {
      NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
    }
    _ => None,
  }
}

pub fn format_date(date: &NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

/// Parses a plain decimal amount with an optional sign. Thousands separators are ignored.
pub fn parse_amount(text: &str) -> Option<Decimal> {
  let cleaned = text.trim().replace(',', "");
  Decimal::from_str(&cleaned).ok()
}

/// Writes an amount rounded to [`AMOUNT_PRECISION`] decimals when it carries more.
pub fn format_amount(amount: &Decimal) -> String {
  with_max_precision(*amount).to_string()
}

fn with_max_precision(mut value: Decimal) -> Decimal {
  if value.scale() > AMOUNT_PRECISION {
    value = value.round_dp_with_strategy(AMOUNT_PRECISION, RoundingStrategy::MidpointAwayFromZero);
  }
  if value.is_zero() {
    value = Decimal::ZERO;
  }
  value
}

fn is_number(text: &str, max_digits: usize) -> bool {
  !text.is_empty() && text.len() <= max_digits && text.bytes().all(|b| b.is_ascii_digit())
}
