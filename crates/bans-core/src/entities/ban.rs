//! Ban entity - a record barring a user, keyed by its own identifier

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Ban entity
///
/// Only `id` carries meaning for the store. Every other field is payload that is
/// copied in and out unchanged. `Ban::default()` is the zero-value ban.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ban {
    pub id: String,
    pub user_id: String,
    pub reason: Option<String>,
    pub banned_by: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Ban {
    /// Create a new Ban
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Attach a reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Record the moderator who issued the ban
    pub fn with_banned_by(mut self, moderator: impl Into<String>) -> Self {
        self.banned_by = Some(moderator.into());
        self
    }

    /// Expire the ban after the given number of seconds
    ///
    /// Non-positive values, and values too far out to represent, mean permanent.
    pub fn with_expiration(mut self, seconds: i64) -> Self {
        self.expires_at = if seconds > 0 {
            Duration::try_seconds(seconds).and_then(|d| Utc::now().checked_add_signed(d))
        } else {
            None
        };
        self
    }

    /// Check whether the ban has an expiry in the past
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }

    /// Check that the ban may enter a store
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.id.is_empty() {
            return Err(StoreError::Validation("ID can't be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ban_creation() {
        let ban = Ban::new("ban-1", "user-42").with_reason("spam");

        assert_eq!(ban.id, "ban-1");
        assert_eq!(ban.user_id, "user-42");
        assert_eq!(ban.reason.as_deref(), Some("spam"));
        assert!(ban.banned_by.is_none());
        assert!(ban.expires_at.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(Ban::new("ban-1", "user-42").validate().is_ok());

        let err = Ban::default().validate().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "ID can't be empty");
    }

    #[test]
    fn test_expiration() {
        let permanent = Ban::new("ban-1", "user-42").with_expiration(0);
        assert!(permanent.expires_at.is_none());
        assert!(!permanent.is_expired());

        let temporary = Ban::new("ban-2", "user-42").with_expiration(3600);
        assert!(temporary.expires_at.is_some());
        assert!(!temporary.is_expired());

        let far = Ban::new("ban-3", "user-42").with_expiration(i64::MAX);
        assert!(far.expires_at.is_none());
        assert!(!far.is_expired());

        // representable as a TimeDelta, but past the last representable DateTime
        let beyond = Ban::new("ban-4", "user-42").with_expiration(i64::MAX / 1000);
        assert!(beyond.expires_at.is_none());

        let mut lapsed = temporary.clone();
        lapsed.expires_at = Some(Utc::now() - Duration::seconds(1));
        assert!(lapsed.is_expired());
    }

    #[test]
    fn test_serde_shape() {
        let ban = Ban::new("ban-1", "user-42").with_banned_by("mod-7");
        let json = serde_json::to_value(&ban).unwrap();

        assert_eq!(json["id"], "ban-1");
        assert_eq!(json["banned_by"], "mod-7");
        assert!(json["reason"].is_null());
    }
}
