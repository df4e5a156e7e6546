//! Admin domain entity

use validator::Validate;

use crate::shared::types::{AuditStamp, DomainResult};
use crate::shared::validations::{
    self, validate_not_blank, validate_password_rule, validate_phone_number_rule,
};

/// Store-assigned admin identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AdminId(pub i32);

impl std::fmt::Display for AdminId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Admin role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminRole {
    /// Manages every office
    SuperAdmin,
    /// Manages a single office
    OfficeManager,
    /// Front-desk staff
    Staff,
}

impl AdminRole {
    pub const ALL: [AdminRole; 3] = [Self::SuperAdmin, Self::OfficeManager, Self::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::OfficeManager => "OFFICE_MANAGER",
            Self::Staff => "STAFF",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUPER_ADMIN" => Some(Self::SuperAdmin),
            "OFFICE_MANAGER" => Some(Self::OfficeManager),
            "STAFF" => Some(Self::Staff),
            _ => None,
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything needed to create an [`Admin`].
#[derive(Debug, Clone, Validate)]
pub struct NewAdmin {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 20, message = "login id must not exceed 20 characters")
    )]
    pub login_id: String,
    #[validate(custom(function = "validate_password_rule"))]
    pub password: String,
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 100, message = "name must not exceed 100 characters")
    )]
    pub name: String,
    #[validate(custom(function = "validate_phone_number_rule"))]
    pub phone_number: Option<String>,
    pub role: AdminRole,
}

/// Back-office administrator.
///
/// `login_id` is fixed once created. Every other field changes only through
/// its `change_*` operation, which validates first and leaves the admin
/// untouched on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    id: Option<AdminId>,
    login_id: String,
    password: String,
    name: String,
    phone_number: Option<String>,
    role: AdminRole,
    audit: Option<AuditStamp>,
}

impl Admin {
    pub fn new(new: NewAdmin) -> DomainResult<Self> {
        new.validate()?;

        Ok(Self {
            id: None,
            login_id: new.login_id,
            password: new.password,
            name: new.name,
            phone_number: new.phone_number,
            role: new.role,
            audit: None,
        })
    }

    /// Rebuild an admin from a stored row without re-running validation.
    pub(crate) fn restore(
        id: AdminId,
        login_id: String,
        password: String,
        name: String,
        phone_number: Option<String>,
        role: AdminRole,
        audit: AuditStamp,
    ) -> Self {
        Self {
            id: Some(id),
            login_id,
            password,
            name,
            phone_number,
            role,
            audit: Some(audit),
        }
    }

    pub(crate) fn persisted(mut self, id: AdminId, audit: AuditStamp) -> Self {
        self.id = Some(id);
        self.audit = Some(audit);
        self
    }

    pub fn id(&self) -> Option<AdminId> {
        self.id
    }

    pub fn login_id(&self) -> &str {
        &self.login_id
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn role(&self) -> AdminRole {
        self.role
    }

    pub fn audit(&self) -> Option<AuditStamp> {
        self.audit
    }

    pub fn change_name(&mut self, name: &str) -> DomainResult<()> {
        validations::validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Stores the password as given; hashing is up to the caller.
    pub fn change_password(&mut self, password: &str) -> DomainResult<()> {
        validations::validate_password(password)?;
        self.password = password.to_string();
        Ok(())
    }

    pub fn change_phone_number(&mut self, phone_number: &str) -> DomainResult<()> {
        validations::validate_phone_number(phone_number)?;
        self.phone_number = Some(phone_number.to_string());
        Ok(())
    }

    pub fn change_role(&mut self, role: impl Into<Option<AdminRole>>) -> DomainResult<()> {
        self.role = validations::require("role", role.into())?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
