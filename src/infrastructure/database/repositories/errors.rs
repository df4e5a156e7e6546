//! Mapping of SeaORM failures onto store errors

use sea_orm::{DbErr, SqlErr};

use crate::shared::types::StoreError;

/// Unique column the statement may collide on, with the value being written.
pub(super) struct UniqueKey<'a> {
    pub entity: &'static str,
    pub field: &'static str,
    pub value: &'a str,
}

/// Classify a write failure. Constraint violations become typed store errors,
/// anything else stays a database error.
pub(super) fn write_err(err: DbErr, key: UniqueKey<'_>) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Duplicate {
            entity: key.entity,
            field: key.field,
            value: key.value.to_string(),
        },
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => StoreError::InvalidReference {
            entity: key.entity,
            field: "office_id",
            target: detail,
        },
        _ if err.to_string().contains("NOT NULL constraint failed") => StoreError::MissingField {
            entity: key.entity,
            field: not_null_column(&err.to_string()),
        },
        _ => StoreError::Database(err),
    }
}

// SQLite reports "NOT NULL constraint failed: table.column".
fn not_null_column(message: &str) -> &'static str {
    const COLUMNS: [&str; 10] = [
        "login_id",
        "password",
        "name",
        "role",
        "price",
        "open_time",
        "discount_amount",
        "is_available",
        "capacity",
        "office_id",
    ];
    let column = message
        .rsplit('.')
        .next()
        .map(|c| c.trim_matches(|ch: char| !ch.is_alphanumeric() && ch != '_'))
        .unwrap_or_default();
    COLUMNS
        .iter()
        .copied()
        .find(|c| *c == column)
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> UniqueKey<'static> {
        UniqueKey {
            entity: "Theme",
            field: "name",
            value: "우주선",
        }
    }

    #[test]
    fn not_null_failure_names_the_column() {
        let err = DbErr::Custom("NOT NULL constraint failed: themes.open_time".into());
        assert!(matches!(
            write_err(err, key()),
            StoreError::MissingField { entity: "Theme", field: "open_time" }
        ));
    }

    #[test]
    fn other_failures_stay_database_errors() {
        let err = DbErr::Custom("disk I/O error".into());
        assert!(matches!(write_err(err, key()), StoreError::Database(_)));
    }
}
