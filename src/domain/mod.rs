pub mod admin;
pub mod office;
pub mod repositories;
pub mod theme;

// Re-export commonly used types
pub use admin::{Admin, AdminId, AdminRepository, AdminRole, NewAdmin};
pub use office::{Account, NewOffice, Office, OfficeId, OfficeRepository};
pub use repositories::{RepositoryProvider, StoreResult};
pub use theme::{NewTheme, Theme, ThemeId, ThemeRepository};

pub use crate::shared::types::{DomainError, DomainResult, StoreError};
