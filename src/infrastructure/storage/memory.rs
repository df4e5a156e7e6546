//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::{
    Admin, AdminId, AdminRepository, Office, OfficeId, OfficeRepository, RepositoryProvider,
    StoreError, StoreResult, Theme, ThemeId, ThemeRepository,
};
use crate::shared::types::AuditStamp;

/// In-memory storage for development and testing.
///
/// Unique columns are tracked in side indexes next to the tables. Every
/// `save` and `delete_by_id` holds `writes`, so a referential or uniqueness
/// check and the write it guards are never interleaved with another write.
/// Reads go straight to the maps.
pub struct InMemoryStorage {
    admins: DashMap<i32, Admin>,
    admin_login_ids: DashMap<String, i32>,
    offices: DashMap<i32, Office>,
    office_names: DashMap<String, i32>,
    themes: DashMap<i32, Theme>,
    theme_names: DashMap<String, i32>,
    admin_counter: AtomicI32,
    office_counter: AtomicI32,
    theme_counter: AtomicI32,
    writes: Mutex<()>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            admins: DashMap::new(),
            admin_login_ids: DashMap::new(),
            offices: DashMap::new(),
            office_names: DashMap::new(),
            themes: DashMap::new(),
            theme_names: DashMap::new(),
            admin_counter: AtomicI32::new(1),
            office_counter: AtomicI32::new(1),
            theme_counter: AtomicI32::new(1),
            writes: Mutex::new(()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn admins(&self) -> &dyn AdminRepository {
        self
    }

    fn offices(&self) -> &dyn OfficeRepository {
        self
    }

    fn themes(&self) -> &dyn ThemeRepository {
        self
    }
}

// ── Unique index helpers ────────────────────────────────────────

fn reserve(
    index: &DashMap<String, i32>,
    key: &str,
    id: i32,
    entity: &'static str,
    field: &'static str,
) -> StoreResult<()> {
    match index.entry(key.to_string()) {
        Entry::Occupied(e) if *e.get() != id => Err(StoreError::Duplicate {
            entity,
            field,
            value: key.to_string(),
        }),
        Entry::Occupied(_) => Ok(()),
        Entry::Vacant(e) => {
            e.insert(id);
            Ok(())
        }
    }
}

/// Moves `id`'s entry in a unique index from `old` to `new`.
fn rekey(
    index: &DashMap<String, i32>,
    old: &str,
    new: &str,
    id: i32,
    entity: &'static str,
    field: &'static str,
) -> StoreResult<()> {
    reserve(index, new, id, entity, field)?;
    if old != new {
        index.remove_if(old, |_, owner| *owner == id);
    }
    Ok(())
}

fn sorted_by_id<T: Clone>(map: &DashMap<i32, T>) -> Vec<T> {
    let mut rows: Vec<(i32, T)> = map.iter().map(|e| (*e.key(), e.value().clone())).collect();
    rows.sort_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, row)| row).collect()
}

// ── Admins ──────────────────────────────────────────────────────

#[async_trait]
impl AdminRepository for InMemoryStorage {
    async fn save(&self, admin: Admin) -> StoreResult<Admin> {
        let _writes = self.writes.lock().await;
        match admin.id() {
            None => {
                let id = self.admin_counter.fetch_add(1, Ordering::SeqCst);
                reserve(&self.admin_login_ids, admin.login_id(), id, "Admin", "login_id")?;
                let saved = admin.persisted(AdminId(id), AuditStamp::now());
                self.admins.insert(id, saved.clone());
                Ok(saved)
            }
            Some(AdminId(id)) => {
                let existing = self
                    .admins
                    .get(&id)
                    .map(|a| a.clone())
                    .ok_or(StoreError::NotFound { entity: "Admin", id })?;
                rekey(
                    &self.admin_login_ids,
                    existing.login_id(),
                    admin.login_id(),
                    id,
                    "Admin",
                    "login_id",
                )?;
                let audit = existing.audit().unwrap_or_else(AuditStamp::now).touched();
                let saved = admin.persisted(AdminId(id), audit);
                self.admins.insert(id, saved.clone());
                Ok(saved)
            }
        }
    }

    async fn find_by_id(&self, id: AdminId) -> StoreResult<Option<Admin>> {
        Ok(self.admins.get(&id.0).map(|a| a.clone()))
    }

    async fn find_by_login_id(&self, login_id: &str) -> StoreResult<Option<Admin>> {
        let id = self.admin_login_ids.get(login_id).map(|e| *e.value());
        Ok(id.and_then(|id| self.admins.get(&id).map(|a| a.clone())))
    }

    async fn exists_by_id(&self, id: AdminId) -> StoreResult<bool> {
        Ok(self.admins.contains_key(&id.0))
    }

    async fn find_all(&self) -> StoreResult<Vec<Admin>> {
        Ok(sorted_by_id(&self.admins))
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.admins.len() as u64)
    }

    async fn delete_by_id(&self, id: AdminId) -> StoreResult<()> {
        let _writes = self.writes.lock().await;
        let (_, removed) = self.admins.remove(&id.0).ok_or(StoreError::NotFound {
            entity: "Admin",
            id: id.0,
        })?;
        self.admin_login_ids
            .remove_if(removed.login_id(), |_, owner| *owner == id.0);
        Ok(())
    }
}

// ── Offices ─────────────────────────────────────────────────────

#[async_trait]
impl OfficeRepository for InMemoryStorage {
    async fn save(&self, office: Office) -> StoreResult<Office> {
        let _writes = self.writes.lock().await;
        match office.id() {
            None => {
                let id = self.office_counter.fetch_add(1, Ordering::SeqCst);
                reserve(&self.office_names, office.name(), id, "Office", "name")?;
                let saved = office.persisted(OfficeId(id), AuditStamp::now());
                self.offices.insert(id, saved.clone());
                Ok(saved)
            }
            Some(OfficeId(id)) => {
                let existing = self
                    .offices
                    .get(&id)
                    .map(|o| o.clone())
                    .ok_or(StoreError::NotFound { entity: "Office", id })?;
                rekey(
                    &self.office_names,
                    existing.name(),
                    office.name(),
                    id,
                    "Office",
                    "name",
                )?;
                let audit = existing.audit().unwrap_or_else(AuditStamp::now).touched();
                let saved = office.persisted(OfficeId(id), audit);
                self.offices.insert(id, saved.clone());
                Ok(saved)
            }
        }
    }

    async fn find_by_id(&self, id: OfficeId) -> StoreResult<Option<Office>> {
        Ok(self.offices.get(&id.0).map(|o| o.clone()))
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Office>> {
        let id = self.office_names.get(name).map(|e| *e.value());
        Ok(id.and_then(|id| self.offices.get(&id).map(|o| o.clone())))
    }

    async fn exists_by_id(&self, id: OfficeId) -> StoreResult<bool> {
        Ok(self.offices.contains_key(&id.0))
    }

    async fn find_all(&self) -> StoreResult<Vec<Office>> {
        Ok(sorted_by_id(&self.offices))
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.offices.len() as u64)
    }

    async fn delete_by_id(&self, id: OfficeId) -> StoreResult<()> {
        let _writes = self.writes.lock().await;
        if self.themes.iter().any(|t| t.office_id() == Some(id)) {
            return Err(StoreError::InvalidReference {
                entity: "Theme",
                field: "office_id",
                target: id.to_string(),
            });
        }
        let (_, removed) = self.offices.remove(&id.0).ok_or(StoreError::NotFound {
            entity: "Office",
            id: id.0,
        })?;
        self.office_names
            .remove_if(removed.name(), |_, owner| *owner == id.0);
        Ok(())
    }
}

// ── Themes ──────────────────────────────────────────────────────

#[async_trait]
impl ThemeRepository for InMemoryStorage {
    async fn save(&self, theme: Theme) -> StoreResult<Theme> {
        let _writes = self.writes.lock().await;
        let office_id = theme.office_id().ok_or_else(|| StoreError::InvalidReference {
            entity: "Theme",
            field: "office_id",
            target: "unsaved office".to_string(),
        })?;
        if !self.offices.contains_key(&office_id.0) {
            return Err(StoreError::InvalidReference {
                entity: "Theme",
                field: "office_id",
                target: office_id.to_string(),
            });
        }

        match theme.id() {
            None => {
                let id = self.theme_counter.fetch_add(1, Ordering::SeqCst);
                reserve(&self.theme_names, theme.name(), id, "Theme", "name")?;
                let saved = theme.persisted(ThemeId(id));
                self.themes.insert(id, saved.clone());
                Ok(saved)
            }
            Some(ThemeId(id)) => {
                let existing_name = self
                    .themes
                    .get(&id)
                    .map(|t| t.name().to_string())
                    .ok_or(StoreError::NotFound { entity: "Theme", id })?;
                rekey(&self.theme_names, &existing_name, theme.name(), id, "Theme", "name")?;
                self.themes.insert(id, theme.clone());
                Ok(theme)
            }
        }
    }

    async fn find_by_id(&self, id: ThemeId) -> StoreResult<Option<Theme>> {
        Ok(self.themes.get(&id.0).map(|t| t.clone()))
    }

    async fn find_by_office(&self, office_id: OfficeId) -> StoreResult<Vec<Theme>> {
        Ok(sorted_by_id(&self.themes)
            .into_iter()
            .filter(|t| t.office_id() == Some(office_id))
            .collect())
    }

    async fn exists_by_id(&self, id: ThemeId) -> StoreResult<bool> {
        Ok(self.themes.contains_key(&id.0))
    }

    async fn find_all(&self) -> StoreResult<Vec<Theme>> {
        Ok(sorted_by_id(&self.themes))
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.themes.len() as u64)
    }

    async fn delete_by_id(&self, id: ThemeId) -> StoreResult<()> {
        let _writes = self.writes.lock().await;
        let (_, removed) = self.themes.remove(&id.0).ok_or(StoreError::NotFound {
            entity: "Theme",
            id: id.0,
        })?;
        self.theme_names
            .remove_if(removed.name(), |_, owner| *owner == id.0);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
