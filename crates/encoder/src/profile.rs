//! User profile type and its textual rendering.
//!
//! The profile is what the user typed into the form: an age and two
//! free-form lists. It is built per request and never persisted.

use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Youngest age accepted by [`UserProfile::new`].
pub const MIN_AGE: u32 = 1;

/// Oldest age accepted by [`UserProfile::new`].
pub const MAX_AGE: u32 = 100;

/// A structured description of the listener.
///
/// Genre and language lists keep the order the user entered them in and may
/// be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    age: u32,
    genres: Vec<String>,
    languages: Vec<String>,
}

impl UserProfile {
    /// Build a profile, rejecting ages outside `1..=100`.
    ///
    /// Blank entries in either list are dropped and the rest trimmed.
    pub fn new(
        age: u32,
        genres: Vec<String>,
        languages: Vec<String>,
    ) -> Result<Self, ProfileError> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ProfileError::AgeOutOfRange {
                age,
                min: MIN_AGE,
                max: MAX_AGE,
            });
        }

        Ok(Self {
            age,
            genres: clean_list(genres),
            languages: clean_list(languages),
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Render the profile with the fixed encoding template:
    ///
    /// ```text
    /// Age: 25
    /// Preferred genres: jazz, city pop
    /// Preferred languages: Korean, English
    /// ```
    ///
    /// Empty lists render as an empty value after the colon.
    pub fn describe(&self) -> String {
        format!(
            "Age: {}\nPreferred genres: {}\nPreferred languages: {}",
            self.age,
            self.genres.join(", "),
            self.languages.join(", ")
        )
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_age() {
        assert_eq!(
            UserProfile::new(0, vec![], vec![]),
            Err(ProfileError::AgeOutOfRange { age: 0, min: 1, max: 100 })
        );
        assert!(UserProfile::new(101, vec![], vec![]).is_err());
        assert!(UserProfile::new(1, vec![], vec![]).is_ok());
        assert!(UserProfile::new(100, vec![], vec![]).is_ok());
    }

    #[test]
    fn test_describe_uses_fixed_template() {
        let profile = UserProfile::new(
            25,
            vec!["jazz".to_string(), "city pop".to_string()],
            vec!["Korean".to_string()],
        )
        .unwrap();

        assert_eq!(
            profile.describe(),
            "Age: 25\nPreferred genres: jazz, city pop\nPreferred languages: Korean"
        );
    }

    #[test]
    fn test_empty_lists_and_blank_entries() {
        let profile = UserProfile::new(40, vec!["  ".to_string()], vec![]).unwrap();
        assert!(profile.genres().is_empty());
        assert_eq!(
            profile.describe(),
            "Age: 40\nPreferred genres: \nPreferred languages: "
        );
    }
}
