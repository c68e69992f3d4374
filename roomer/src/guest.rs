//! Guest directory types.
//!
//! Guests are shared across bookings: submitting a name that already
//! exists in the directory links the booking to the existing guest
//! record rather than creating a duplicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::ValidationError;

/// Maximum length of a guest name in characters.
pub const MAX_GUEST_NAME_LEN: usize = 40;

/// A validated guest name.
///
/// Names are trimmed of surrounding whitespace and must be between 1 and
/// [`MAX_GUEST_NAME_LEN`] characters after trimming. Length is counted in
/// characters, not bytes, so accented and non-Latin names are not
/// penalized.
///
/// # Examples
///
/// ```
/// use roomer::GuestName;
///
/// let name = GuestName::new("  Alice  ").unwrap();
/// assert_eq!(name.as_str(), "Alice");
///
/// assert!(GuestName::new("").is_err());
/// assert!(GuestName::new("   ").is_err());
/// assert!(GuestName::new("x".repeat(41)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestName(String);

impl GuestName {
    /// Creates a validated guest name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or longer than
    /// [`MAX_GUEST_NAME_LEN`] characters.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "guest name".into(),
                message: "must not be empty".into(),
            });
        }
        let len = trimmed.chars().count();
        if len > MAX_GUEST_NAME_LEN {
            return Err(ValidationError {
                field: "guest name".into(),
                message: format!("must be at most {MAX_GUEST_NAME_LEN} characters, got {len}"),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuestName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GuestName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for GuestName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A persisted guest record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    id: u64,
    name: GuestName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Guest {
    /// Creates a guest record from stored fields.
    #[must_use]
    pub const fn new(
        id: u64,
        name: GuestName,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    /// Returns the guest identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the guest name.
    #[must_use]
    pub const fn name(&self) -> &GuestName {
        &self.name
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
