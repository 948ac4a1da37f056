use std::fmt;

use rust_decimal::Decimal;

use super::format::{format_amount, LINE_ENDING};

/// Part of a transaction amount allocated to its own category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Split {
  pub category: Option<String>,
  pub memo: String,
  pub amount: Decimal,
}

impl Split {
  pub fn new(category: Option<String>, memo: String, amount: Decimal) -> Self {
    Self {
      category,
      memo,
      amount,
    }
  }

  pub fn to_text(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for Split {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "S{category}{eol}E{memo}{eol}${amount}",
      category = self.category.as_deref().unwrap_or_default(),
      memo = self.memo,
      amount = format_amount(&self.amount),
      eol = LINE_ENDING,
    )
  }
}
