//! Office domain entity

use std::collections::HashSet;

use validator::Validate;

use super::account::Account;
use crate::shared::types::{AuditStamp, DomainResult};
use crate::shared::validations::{self, validate_not_blank};

/// Store-assigned office identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OfficeId(pub i32);

impl std::fmt::Display for OfficeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to create an [`Office`].
#[derive(Debug, Clone, Default, Validate)]
pub struct NewOffice {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 100, message = "name must not exceed 100 characters")
    )]
    pub name: String,
    pub accounts: Vec<Account>,
    pub welcome_message: Option<String>,
}

/// Office branch.
///
/// The account set is owned by the office and is only reachable through
/// [`Office::add_account`], [`Office::remove_account`] and read-only views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Office {
    id: Option<OfficeId>,
    name: String,
    accounts: HashSet<Account>,
    welcome_message: Option<String>,
    audit: Option<AuditStamp>,
}

impl Office {
    pub fn new(new: NewOffice) -> DomainResult<Self> {
        new.validate()?;

        Ok(Self {
            id: None,
            name: new.name,
            accounts: new.accounts.into_iter().collect(),
            welcome_message: new.welcome_message,
            audit: None,
        })
    }

    /// Rebuild an office from stored rows without re-running validation.
    pub(crate) fn restore(
        id: OfficeId,
        name: String,
        accounts: impl IntoIterator<Item = Account>,
        welcome_message: Option<String>,
        audit: AuditStamp,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            accounts: accounts.into_iter().collect(),
            welcome_message,
            audit: Some(audit),
        }
    }

    pub(crate) fn persisted(mut self, id: OfficeId, audit: AuditStamp) -> Self {
        self.id = Some(id);
        self.audit = Some(audit);
        self
    }

    pub fn id(&self) -> Option<OfficeId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accounts(&self) -> &HashSet<Account> {
        &self.accounts
    }

    pub fn has_account(&self, account: &Account) -> bool {
        self.accounts.contains(account)
    }

    pub fn welcome_message(&self) -> Option<&str> {
        self.welcome_message.as_deref()
    }

    pub fn audit(&self) -> Option<AuditStamp> {
        self.audit
    }

    pub fn change_name(&mut self, name: &str) -> DomainResult<()> {
        validations::validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Returns `false` when an equal account was already present.
    pub fn add_account(&mut self, account: Account) -> bool {
        self.accounts.insert(account)
    }

    /// Returns `false` when no equal account was present.
    pub fn remove_account(&mut self, account: &Account) -> bool {
        self.accounts.remove(account)
    }

    pub fn change_welcome_message(&mut self, welcome_message: Option<String>) {
        self.welcome_message = welcome_message;
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn account1() -> Account {
        Account::of("국민은행", "123-456-789")
    }

    fn account2() -> Account {
        Account::of("신한은행", "987-654-321")
    }

    fn sample_office() -> Office {
        Office::new(NewOffice {
            name: "강남점".into(),
            accounts: vec![account1(), account2()],
            welcome_message: Some("어서 오세요".into()),
        })
        .unwrap()
    }

    #[test]
    fn create_office() {
        let office = sample_office();
        assert_eq!(office.id(), None);
        assert_eq!(office.name(), "강남점");
        assert_eq!(office.accounts().len(), 2);
        assert!(office.has_account(&account1()));
        assert!(office.has_account(&account2()));
        assert_eq!(office.welcome_message(), Some("어서 오세요"));
    }

    #[test]
    fn create_office_collapses_duplicate_accounts() {
        let office = Office::new(NewOffice {
            name: "홍대점".into(),
            accounts: vec![account1(), account1()],
            welcome_message: None,
        })
        .unwrap();
        assert_eq!(office.accounts().len(), 1);
    }

    #[test]
    fn create_office_rejects_invalid_name() {
        for name in [String::new(), "  ".into(), "a".repeat(101)] {
            let result = Office::new(NewOffice {
                name,
                ..NewOffice::default()
            });
            assert!(result.is_err());
        }
    }

    #[test]
    fn add_equal_account_is_noop() {
        let mut office = sample_office();
        assert!(!office.add_account(Account::of("국민은행", "123-456-789")));
        assert_eq!(office.accounts().len(), 2);
    }

    #[test]
    fn remove_account_by_value() {
        let mut office = sample_office();
        assert!(office.remove_account(&Account::of("국민은행", "123-456-789")));
        assert_eq!(office.accounts().len(), 1);
        assert!(office.has_account(&account2()));
    }

    #[test]
    fn remove_absent_account_is_noop() {
        let mut office = sample_office();
        assert!(!office.remove_account(&Account::of("우리은행", "000-000-000")));
        assert_eq!(office.accounts().len(), 2);
    }

    #[test]
    fn change_name() {
        let mut office = sample_office();
        office.change_name("강남 2호점").unwrap();
        assert_eq!(office.name(), "강남 2호점");

        let longest = "관".repeat(100);
        office.change_name(&longest).unwrap();
        assert_eq!(office.name(), longest);
    }

    #[test]
    fn change_name_invalid_keeps_old_name() {
        let mut office = sample_office();
        assert!(office.change_name(" ").is_err());
        assert!(office.change_name(&"a".repeat(101)).is_err());
        assert_eq!(office.name(), "강남점");
    }

    #[test]
    fn change_welcome_message_is_unvalidated() {
        let mut office = sample_office();
        office.change_welcome_message(Some(String::new()));
        assert_eq!(office.welcome_message(), Some(""));
        office.change_welcome_message(None);
        assert_eq!(office.welcome_message(), None);
    }
}
