/// Which side of the relationship an adjustment lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The person now owes the user more: balance and owed-to-user grow.
    CreditToUser,
    /// The user now owes the person more: balance shrinks, owed-by-user grows.
    DebtFromUser,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Self::CreditToUser => "credit",
            Self::DebtFromUser => "debit",
        }
    }
}

/// The numbers tracked for one person.
///
/// `balance` is positive when the person owes the user. It is expected to
/// equal `owed_to_user - owed_by_user`, but values read from the backing file
/// are kept as they are, so [`Record::net`] may differ from it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Record {
    pub balance: f64,
    pub owed_to_user: f64,
    pub owed_by_user: f64,
}

impl Record {
    pub const ZERO: Record = Record {
        balance: 0.0,
        owed_to_user: 0.0,
        owed_by_user: 0.0,
    };

    #[must_use]
    pub const fn new(balance: f64, owed_to_user: f64, owed_by_user: f64) -> Self {
        Self {
            balance,
            owed_to_user,
            owed_by_user,
        }
    }

    /// Net position derived from the two running totals.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.owed_to_user - self.owed_by_user
    }

    /// True when none of the three values is infinite or NaN.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.balance.is_finite() && self.owed_to_user.is_finite() && self.owed_by_user.is_finite()
    }

    /// Returns the record after applying `amount` in `direction`.
    #[must_use]
    pub fn adjusted(self, amount: f64, direction: Direction) -> Self {
        match direction {
            Direction::CreditToUser => Self {
                balance: self.balance + amount,
                owed_to_user: self.owed_to_user + amount,
                ..self
            },
            Direction::DebtFromUser => Self {
                balance: self.balance - amount,
                owed_by_user: self.owed_by_user + amount,
                ..self
            },
        }
    }
}
