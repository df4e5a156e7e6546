//! Repository access for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `StoreResult` — standard result type for repository operations

use super::admin::AdminRepository;
use super::office::OfficeRepository;
use super::theme::ThemeRepository;

pub use crate::shared::types::StoreResult;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn publish(repos: &dyn RepositoryProvider, office: Office) -> Result<(), AppError> {
///     let office = repos.offices().save(office).await?;
///     let theme = Theme::new(NewTheme::new("Lost Temple", 25_000, open_time), &office)?;
///     repos.themes().save(theme).await?;
///     Ok(())
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn admins(&self) -> &dyn AdminRepository;
    fn offices(&self) -> &dyn OfficeRepository;
    fn themes(&self) -> &dyn ThemeRepository;
}
