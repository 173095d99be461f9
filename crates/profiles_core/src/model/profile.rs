//! Profile domain model.
//!
//! # Responsibility
//! - Define the canonical directory record and its client-supplied shapes.
//! - Provide merge and validation helpers used by the store write paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another profile.
//! - `created_at` is set once; `updated_at >= created_at`.
//! - Client-supplied text is stored exactly as given; only validation trims.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque stable identifier of a profile record.
///
/// New records get UUID v4 text; bootstrap records keep short numeric ids.
pub type ProfileId = String;

/// Canonical directory record for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub full_name: String,
    /// Free text; uniqueness is not enforced.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Serialized as `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied attributes for create and full-form edit.
///
/// Carries everything except `id` and timestamps, which the store owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ProfileInput {
    /// Creates an input with the two required fields and no optional data.
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an existing profile.
///
/// `None` keeps the prior value. For optional attributes `Some(None)` clears
/// the stored value and `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub location: Option<Option<String>>,
}

impl From<ProfileInput> for ProfilePatch {
    /// Full-form edits replace every attribute, clearing omitted optionals.
    fn from(input: ProfileInput) -> Self {
        Self {
            full_name: Some(input.full_name),
            email: Some(input.email),
            phone_number: Some(input.phone_number),
            bio: Some(input.bio),
            avatar_url: Some(input.avatar_url),
            date_of_birth: Some(input.date_of_birth),
            location: Some(input.location),
        }
    }
}

/// Validation errors for profile write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyFullName,
    EmptyEmail,
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFullName => write!(f, "Full name is required"),
            Self::EmptyEmail => write!(f, "Email is required"),
        }
    }
}

impl Error for ProfileValidationError {}

impl Profile {
    /// Builds a new record from client input with store-assigned identity.
    ///
    /// Both timestamps are set to `now`.
    pub fn from_input(id: ProfileId, input: ProfileInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: input.full_name,
            email: input.email,
            phone_number: input.phone_number,
            bio: input.bio,
            avatar_url: input.avatar_url,
            date_of_birth: input.date_of_birth,
            location: input.location,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges supplied patch fields over this record.
    ///
    /// Fields absent from the patch keep their prior values byte-for-byte.
    /// Timestamps are left to the caller.
    pub fn apply_patch(&mut self, patch: ProfilePatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = avatar_url;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
    }

    /// Validates required fields.
    ///
    /// # Errors
    /// - `EmptyFullName` when `full_name` is blank.
    /// - `EmptyEmail` when `email` is blank.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ProfileValidationError::EmptyFullName);
        }
        if self.email.trim().is_empty() {
            return Err(ProfileValidationError::EmptyEmail);
        }
        Ok(())
    }
}
