//! Room catalog types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::ValidationError;

/// A room in the hotel's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: u64,
    number: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Room {
    /// Creates a room record from stored fields.
    #[must_use]
    pub const fn new(
        id: u64,
        number: String,
        description: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            number,
            description,
            created_at,
            updated_at,
        }
    }

    /// Returns the room identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the human-facing room number, such as `"101"` or `"2B"`.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// A room that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewRoom {
    /// Human-facing room number.
    pub number: String,
    /// Free-text description.
    pub description: String,
}

impl NewRoom {
    /// Creates a draft room.
    ///
    /// # Errors
    ///
    /// Returns an error if the room number is empty after trimming.
    pub fn new(
        number: impl AsRef<str>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let number = number.as_ref().trim();
        if number.is_empty() {
            return Err(ValidationError {
                field: "room number".into(),
                message: "must not be empty".into(),
            });
        }
        Ok(Self {
            number: number.to_string(),
            description: description.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room() {
        let room = NewRoom::new(" 101 ", "Sea view double").unwrap();
        assert_eq!(room.number, "101");
        assert_eq!(room.description, "Sea view double");
    }

    #[test]
    fn test_empty_number_rejected() {
        let err = NewRoom::new("  ", "").unwrap_err();
        assert_eq!(err.field, "room number");
    }
}
