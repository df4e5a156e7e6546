use chrono::{DateTime, SubsecRound, Utc};

/// Creation and last-modification instants, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditStamp {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuditStamp {
    /// Stamp for a row inserted right now.
    pub fn now() -> Self {
        let now = Self::clock();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Same creation instant, refreshed modification instant.
    pub fn touched(self) -> Self {
        Self {
            created_at: self.created_at,
            updated_at: Self::clock().max(self.created_at),
        }
    }

    // Timestamp columns may keep only microseconds; stamps must survive a round trip.
    fn clock() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}
