use std::fmt;

/// Reconciliation marker of a transaction (the `C` line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionStatus {
  Cleared,
  Reconciled,
}

impl TransactionStatus {
  pub fn code(&self) -> &'static str {
    match self {
      TransactionStatus::Cleared => "X",
      TransactionStatus::Reconciled => "*",
    }
  }

  pub fn from_code(code: &str) -> Option<TransactionStatus> {
    match code {
      "X" => Some(TransactionStatus::Cleared),
      "*" => Some(TransactionStatus::Reconciled),
      _ => None,
    }
  }
}

impl fmt::Display for TransactionStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}
