//! Bank account value object

/// Bank account of an office. Two accounts are the same account when both
/// the bank name and the number match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Account {
    bank_name: String,
    account_number: String,
}

impl Account {
    pub fn of(bank_name: impl Into<String>, account_number: impl Into<String>) -> Self {
        Self {
            bank_name: bank_name.into(),
            account_number: account_number.into(),
        }
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }
}
