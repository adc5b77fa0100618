use std::fmt;

use crate::core::record::{Amount, Record, RecordType};

/// Where the balance sits relative to zero.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Standing {
    Surplus,
    Deficit,
    Even
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Summary {
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub balance: Amount
}

impl Summary {
    pub fn of<'a>(records: impl IntoIterator<Item = &'a Record>) -> Summary {
        let (total_income, total_expenses) = records.into_iter()
            .fold((0.0, 0.0), |(income, expenses), record| match record.kind {
                RecordType::Income => (income + record.amount, expenses),
                RecordType::Expense => (income, expenses + record.amount)
            });

        return Summary { total_income, total_expenses, balance: total_income - total_expenses };
    }

    pub fn standing(&self) -> Standing {
        if self.balance < 0.0 {
            Standing::Deficit
        } else if self.balance > 0.0 {
            Standing::Surplus
        } else {
            Standing::Even
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Income: ${:.2}; Expenses: ${:.2}; Balance: ${:.2}",
            self.total_income, self.total_expenses, self.balance)
    }
}
