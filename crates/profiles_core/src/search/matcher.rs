//! Case-insensitive substring matching over profile text fields.
//!
//! # Invariants
//! - Queries are trimmed and lowercased once, at construction.
//! - Only `full_name`, `email`, `location` and `bio` are searched; absent
//!   optional fields never match.
//! - A blank query matches every profile.

use crate::model::profile::Profile;

/// Normalized search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileQuery {
    needle: String,
}

impl ProfileQuery {
    /// Builds a query from raw user input.
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
        }
    }

    /// Returns the normalized needle.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Returns whether the query has no searchable text.
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns whether `profile` contains the needle in a searchable field.
    pub fn matches(&self, profile: &Profile) -> bool {
        if self.is_blank() {
            return true;
        }

        searchable_fields(profile).any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Filters `profiles`, keeping their original order.
    pub fn filter<'a, I>(&self, profiles: I) -> Vec<Profile>
    where
        I: IntoIterator<Item = &'a Profile>,
    {
        profiles
            .into_iter()
            .filter(|profile| self.matches(profile))
            .cloned()
            .collect()
    }
}

fn searchable_fields(profile: &Profile) -> impl Iterator<Item = &str> {
    [
        Some(profile.full_name.as_str()),
        Some(profile.email.as_str()),
        profile.location.as_deref(),
        profile.bio.as_deref(),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::ProfileQuery;
    use crate::model::profile::{Profile, ProfileInput};
    use chrono::Utc;

    fn profile(name: &str, email: &str, location: Option<&str>, bio: Option<&str>) -> Profile {
        let mut input = ProfileInput::new(name, email);
        input.location = location.map(str::to_string);
        input.bio = bio.map(str::to_string);
        input.phone_number = Some("+44 london".to_string());
        Profile::from_input(name.to_lowercase(), input, Utc::now())
    }

    #[test]
    fn query_is_trimmed_and_lowercased() {
        let query = ProfileQuery::new("  LonDon ");
        assert_eq!(query.as_str(), "london");
    }

    #[test]
    fn matches_each_searchable_field() {
        let by_location = profile("A", "a@x.io", Some("London"), None);
        let by_bio = profile("B", "b@x.io", None, Some("moved to london"));
        let by_email = profile("C", "london@x.io", None, None);
        let by_name = profile("London Smith", "d@x.io", None, None);
        let query = ProfileQuery::new("london");

        assert!(query.matches(&by_location));
        assert!(query.matches(&by_bio));
        assert!(query.matches(&by_email));
        assert!(query.matches(&by_name));
    }

    #[test]
    fn phone_number_is_not_searched() {
        let record = profile("A", "a@x.io", None, None);
        assert!(!ProfileQuery::new("london").matches(&record));
    }

    #[test]
    fn blank_query_matches_everything() {
        let record = profile("A", "a@x.io", None, None);
        assert!(ProfileQuery::new("   ").matches(&record));
        assert!(ProfileQuery::new("").is_blank());
    }
}
