//! Edit-screen boundary contract.
//!
//! The embedding UI owns the actual screen; this module only fixes the
//! values that cross the boundary: four string fields in, four string
//! fields plus a confirmed/cancelled status out.

use crate::record::{UserId, UserRecord};

/// Whether the screen was opened to create a new record or edit an
/// existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// New record; fields start empty and the caller assigns the id.
    Create,
    /// Existing record; fields start pre-populated and the id is fixed.
    Edit,
}

/// Pre-populated input handed to the edit screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    /// Create or edit.
    pub mode: EditMode,
    /// Identity key; empty in create mode until the caller assigns one.
    pub id: UserId,
    /// Initial name field content.
    pub name: String,
    /// Initial email field content.
    pub email: String,
    /// Initial major field content.
    pub major: String,
}

impl EditRequest {
    /// Empty-field request for creating a new record.
    pub fn create() -> Self {
        Self {
            mode: EditMode::Create,
            id: String::new(),
            name: String::new(),
            email: String::new(),
            major: String::new(),
        }
    }

    /// Request pre-populated from an existing record.
    pub fn edit(record: &UserRecord) -> Self {
        Self {
            mode: EditMode::Edit,
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            major: record.major.clone(),
        }
    }
}

/// Completion value returned by the edit screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// The screen completed with a fully populated record.
    Confirmed {
        /// All four fields as entered.
        record: UserRecord,
        /// Mode the screen was opened in.
        mode: EditMode,
    },
    /// The screen was dismissed; nothing is written.
    Cancelled,
}

/// Outcome of a yes/no confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The user confirmed the action.
    Confirmed,
    /// The user backed out.
    Cancelled,
}
