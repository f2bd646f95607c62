//! User record value types and snapshot alias.

/// Caller-assigned record identity key. Non-empty, unique, immutable.
pub type UserId = String;

/// One user entry as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Identity key; the only field that never changes after creation.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Declared major.
    pub major: String,
}

impl UserRecord {
    /// Builds a record from the four string fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        major: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            major: major.into(),
        }
    }
}

/// Full ordered set of records as of one notification.
///
/// Ordering is insertion order and stable for a given table state; an update
/// never moves a row.
pub type Snapshot = Vec<UserRecord>;
