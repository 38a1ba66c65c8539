//! In-memory ledger of informal debts, keyed by person name, with CSV
//! persistence.
//!
//! The [`Ledger`] keeps records in insertion order. [`load`] and [`save`] move
//! the whole ledger between memory and the backing file.

use unicode_normalization::UnicodeNormalization;

pub use amount::parse_amount;
pub use error::LedgerError;
pub use record::{Direction, Record};
pub use store::{HEADER, LoadReport, load, read_from, save, write_to};

mod amount;
mod error;
mod record;
mod store;

type ResultLedger<T> = Result<T, LedgerError>;

/// Outcome of [`Ledger::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<(String, Record)>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        let key = normalize_name(name).ok()?;
        self.position(&key).map(|idx| &self.entries[idx].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates `(name, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Adds `name` with a zero record, or removes it when already present.
    ///
    /// Removal is immediate and final.
    pub fn toggle(&mut self, name: &str) -> ResultLedger<Toggle> {
        let key = normalize_name(name)?;
        match self.position(&key) {
            Some(idx) => {
                self.entries.remove(idx);
                tracing::info!("removed \"{key}\"");
                Ok(Toggle::Removed)
            }
            None => {
                tracing::info!("added \"{key}\"");
                self.entries.push((key, Record::ZERO));
                Ok(Toggle::Added)
            }
        }
    }

    /// Applies `amount` to the record of `name` and returns the new record.
    ///
    /// Nothing changes when the person is unknown, the amount is not finite,
    /// or the result would overflow to infinity.
    pub fn adjust(&mut self, name: &str, amount: f64, direction: Direction) -> ResultLedger<Record> {
        if !amount.is_finite() {
            return Err(LedgerError::InvalidAmount(format!(
                "{amount} is not a finite number"
            )));
        }
        let key = normalize_name(name)?;
        let idx = self
            .position(&key)
            .ok_or_else(|| LedgerError::UnknownPerson(key.clone()))?;

        let before = self.entries[idx].1;
        let after = before.adjusted(amount, direction);
        if !after.is_finite() {
            return Err(LedgerError::InvalidAmount(format!(
                "{} {amount} for \"{key}\" overflows the record",
                direction.label()
            )));
        }
        self.entries[idx].1 = after;
        tracing::info!(
            "{} {amount} for \"{key}\": balance {} -> {}, owed to user {} -> {}, owed by user {} -> {}",
            direction.label(),
            before.balance,
            after.balance,
            before.owed_to_user,
            after.owed_to_user,
            before.owed_by_user,
            after.owed_by_user,
        );
        Ok(after)
    }

    /// Inserts or overwrites a record, keeping the position of an existing
    /// entry. Used when reading the backing file.
    pub(crate) fn upsert(&mut self, name: String, record: Record) {
        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = record,
            None => self.entries.push((name, record)),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == key)
    }
}

/// Trims a person name and puts it in NFC form.
pub(crate) fn normalize_name(value: &str) -> ResultLedger<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    Ok(trimmed.nfc().collect())
}
