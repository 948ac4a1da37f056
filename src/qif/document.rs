use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

use log::debug;

use super::account_type::{AccountType, HeaderError, Result};
use super::format::RECORD_SEPARATOR;
use super::section::Section;
use super::transaction::Transaction;

/// A whole QIF document: one [`Section`] per account type.
///
/// Sections are written in the order their account type was first seen,
/// but that order is ignored when comparing documents.
#[derive(Debug, Clone, Default)]
pub struct Document {
  sections: Vec<Section>,
}

impl Document {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reads every record of `text`.
  ///
  /// Each chunk between record separators either opens a section (when it starts with a header)
  /// or is a transaction of the most recent section. Chunks that are neither are skipped,
  /// as are the records following a header of an unsupported account type.
  /// Fails with [`HeaderError::NoValidSections`] when a non blank text has no valid section.
  pub fn parse(text: &str) -> Result<Document> {
    let mut document = Document::new();
    let mut current_account_type = None;

    for chunk in text.split(RECORD_SEPARATOR) {
      if chunk.trim().is_empty() {
        continue;
      }

      match Section::parse(chunk) {
        Ok(section) => {
          current_account_type = Some(section.account_type);
          document.insert_section(section);
        }
        Err(HeaderError::InvalidAccountType(name)) => {
          debug!("Skipping records of unsupported account type '{}'", name);
          current_account_type = None;
        }
        Err(_) => match (current_account_type, Transaction::parse(chunk)) {
          (Some(account_type), Ok(transaction)) => {
            document.insert_transaction(account_type, transaction);
          }
          (None, Ok(_)) => debug!("Skipping transaction found outside of a section"),
          (_, Err(error)) => debug!("Skipping record: {}", error),
        },
      }
    }

    if document.is_empty() && !text.trim().is_empty() {
      Err(HeaderError::NoValidSections)
    } else {
      Ok(document)
    }
  }

  pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
    self.sections.iter()
  }

  pub fn section(&self, account_type: AccountType) -> Option<&Section> {
    self
      .sections
      .iter()
      .find(|section| section.account_type == account_type)
  }

  pub fn section_mut(&mut self, account_type: AccountType) -> Option<&mut Section> {
    self
      .sections
      .iter_mut()
      .find(|section| section.account_type == account_type)
  }

  /// Adds a section, merging its transactions into the existing one for the same account type.
  pub fn insert_section(&mut self, section: Section) {
    match self.section_mut(section.account_type) {
      Some(existing) => existing.transactions.extend(section.transactions),
      None => self.sections.push(section),
    }
  }

  /// Adds a transaction to the section of `account_type`, creating the section when missing.
  /// Returns whether the transaction was not already present.
  pub fn insert_transaction(&mut self, account_type: AccountType, transaction: Transaction) -> bool {
    if self.section(account_type).is_none() {
      self.sections.push(Section::empty(account_type));
    }
    self
      .section_mut(account_type)
      .map_or(false, |section| section.insert(transaction))
  }

  /// Number of sections
  pub fn len(&self) -> usize {
    self.sections.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sections.is_empty()
  }

  pub fn transaction_count(&self) -> usize {
    self.sections.iter().map(Section::len).sum()
  }

  pub fn to_text(&self) -> String {
    self.to_string()
  }
}

impl PartialEq for Document {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len()
      && self
        .sections
        .iter()
        .all(|section| other.section(section.account_type) == Some(section))
  }
}

impl Eq for Document {}

impl FromIterator<Section> for Document {
  fn from_iter<T: IntoIterator<Item = Section>>(sections: T) -> Self {
    let mut document = Document::new();
    for section in sections {
      document.insert_section(section);
    }
    document
  }
}

impl FromStr for Document {
  type Err = HeaderError;

  fn from_str(text: &str) -> Result<Self> {
    Document::parse(text)
  }
}

impl fmt::Display for Document {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for section in &self.sections {
      write!(f, "{}", section)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {

  use std::collections::BTreeSet;

  use chrono::NaiveDate;
  use indoc::indoc;
  use rust_decimal_macros::dec;

  use super::*;
  use crate::qif::{Split, TransactionStatus};

  fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 2, 24).unwrap()
  }

  fn sam_hill() -> Transaction {
    Transaction {
      check_number: Some(1260),
      memo: "Open Account".to_string(),
      category: Some("Opening Balance".to_string()),
      status: Some(TransactionStatus::Cleared),
      ..Transaction::new(date(), "Sam Hill Credit Union".to_string(), dec!(500))
    }
  }

  fn fake_street_electronics() -> Transaction {
    Transaction {
      memo: "Head set".to_string(),
      category: Some("Gifts".to_string()),
      ..Transaction::new(date(), "Fake Street Electronics".to_string(), dec!(-200))
    }
  }

  fn velociraptor_entertainment() -> Transaction {
    Transaction {
      memo: "Pay Day".to_string(),
      ..Transaction::new(date(), "Velociraptor Entertainment".to_string(), dec!(50000))
    }
  }

  fn bank_document() -> Document {
    vec![Section::new(
      AccountType::Bank,
      vec![sam_hill(), fake_street_electronics(), velociraptor_entertainment()]
        .into_iter()
        .collect(),
    )]
    .into_iter()
    .collect()
  }

  const BANK_TEXT: &str = indoc! { "
    !Type:Bank
    D02/24/2022
    T500
    CX
    N1260
    PSam Hill Credit Union
    MOpen Account
    ASam Hill Credit Union
    LOpening Balance
    ^

    D02/24/2022
    T-200
    PFake Street Electronics
    MHead set
    AFake Street Electronics
    LGifts
    ^

    D02/24/2022
    T50000
    PVelociraptor Entertainment
    MPay Day
    AVelociraptor Entertainment
    ^
  " };

  #[test]
  fn parse_document() {
    let document = Document::parse(BANK_TEXT).unwrap();

    assert_eq!(document, bank_document());
    assert_eq!(document.len(), 1);
    assert_eq!(document.section(AccountType::Bank).map(Section::len), Some(3));
  }

  #[test]
  fn parse_after_to_text() {
    let document = Document::parse(BANK_TEXT).unwrap();

    let text = document.to_text();

    assert!(text.starts_with("!Type:Bank\r\n"));
    assert_eq!(Document::parse(&text), Ok(document));
  }

  #[test]
  fn parse_keeps_splits() {
    let input = indoc! { "
      !Type:CCard
      D02/24/2022
      T100
      PGrocery Store
      SFood
      $60
      SHousehold
      %40
      ^
    " };

    let document = Document::parse(input).unwrap();
    let transaction = document
      .section(AccountType::CreditCard)
      .and_then(|section| section.transactions.iter().next())
      .unwrap();

    assert_eq!(
      transaction.splits,
      vec![
        Split::new(Some("Food".to_string()), String::new(), dec!(60)),
        Split::new(Some("Household".to_string()), String::new(), dec!(40)),
      ]
    );
    assert_eq!(Document::parse(&document.to_text()), Ok(document));
  }

  #[test]
  fn parse_multiple_sections() {
    let input = indoc! { "
      !Type:Cash
      D01/02/2022
      T-3
      PCoffee
      ^
      !Type:Bank
      D02/24/2022
      T-200
      PFake Street Electronics
      MHead set
      LGifts
      ^
      !Type:Cash
      D01/03/2022
      T-4
      PTea
      ^
      D01/03/2022
      T-4
      PTea
      ^
    " };

    let document = Document::parse(input).unwrap();

    assert_eq!(
      document
        .sections()
        .map(|section| (section.account_type, section.len()))
        .collect::<Vec<(AccountType, usize)>>(),
      vec![(AccountType::Cash, 2), (AccountType::Bank, 1)]
    );
    assert_eq!(document.transaction_count(), 3);
    let bank_transactions = vec![fake_street_electronics()]
      .into_iter()
      .collect::<BTreeSet<Transaction>>();
    assert_eq!(
      document.section(AccountType::Bank).map(|section| &section.transactions),
      Some(&bank_transactions)
    );
  }

  #[test]
  fn parse_skips_unsupported_records() {
    let input = indoc! { "
      !Account
      NChecking
      TBank
      ^
      D01/02/2022
      T-3
      PCoffee
      ^
      !Type:Bank
      D02/24/2022
      T-200
      PFake Street Electronics
      MHead set
      LGifts
      ^
      D02/24/2022
      Tnot a number
      PBroken
      ^
      !Type:Invst
      D02/24/2022
      T1000
      PBroker
      ^
      D02/25/2022
      T2000
      PBroker
      ^
    " };

    let document = Document::parse(input).unwrap();

    assert_eq!(
      document,
      vec![Section::new(
        AccountType::Bank,
        vec![fake_street_electronics()].into_iter().collect()
      )]
      .into_iter()
      .collect()
    );
  }

  #[test]
  fn parse_skips_record_with_overflowing_percentage_split() {
    let input = indoc! { "
      !Type:Bank
      D02/24/2022
      T79228162514264337593543950335
      PBig
      S
      %200
      ^
      D02/25/2022
      T5
      PSmall
      ^
    " };

    let document = Document::parse(input).unwrap();
    let small = Transaction::new(
      NaiveDate::from_ymd_opt(2022, 2, 25).unwrap(),
      "Small".to_string(),
      dec!(5),
    );

    assert_eq!(
      document,
      vec![Section::new(AccountType::Bank, vec![small].into_iter().collect())]
        .into_iter()
        .collect()
    );
  }

  #[test]
  fn parse_empty_text() {
    assert_eq!(Document::parse(""), Ok(Document::new()));
    assert_eq!(Document::parse(" \r\n\n"), Ok(Document::new()));
  }

  #[test]
  fn parse_fails_without_sections() {
    let input = indoc! { "
      D02/24/2022
      T500
      PSam Hill Credit Union
      ^
    " };

    assert_eq!(Document::parse(input), Err(HeaderError::NoValidSections));
    assert_eq!(
      Document::parse("!Type:Business\nD02/24/2022\nT500\nPSam Hill Credit Union\n^"),
      Err(HeaderError::NoValidSections)
    );
  }

  #[test]
  fn equality_ignores_section_order() {
    let cash = Section::new(
      AccountType::Cash,
      vec![velociraptor_entertainment()].into_iter().collect(),
    );
    let bank = Section::new(AccountType::Bank, vec![sam_hill()].into_iter().collect());

    let document = vec![cash.clone(), bank.clone()].into_iter().collect::<Document>();
    let reversed = vec![bank.clone(), cash].into_iter().collect::<Document>();
    let partial = vec![bank].into_iter().collect::<Document>();

    assert_eq!(document, reversed);
    assert_ne!(document, partial);
    assert_ne!(document.to_text(), reversed.to_text());
  }

  #[test]
  fn insert_transaction_creates_section() {
    let mut document = Document::new();

    assert!(document.insert_transaction(AccountType::Asset, sam_hill()));
    assert!(!document.insert_transaction(AccountType::Asset, sam_hill()));
    assert!(document.insert_transaction(AccountType::Asset, velociraptor_entertainment()));

    assert_eq!(document.len(), 1);
    assert_eq!(document.transaction_count(), 2);
  }

  #[test]
  fn to_text_follows_first_seen_order() {
    let document = vec![
      Section::empty(AccountType::Liability),
      Section::empty(AccountType::Cash),
      Section::empty(AccountType::Liability),
    ]
    .into_iter()
    .collect::<Document>();

    assert_eq!(document.to_text(), "!Type:Oth L\r\n!Type:Cash\r\n");
  }
}
