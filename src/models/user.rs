use serde::{Deserialize, Serialize};

use crate::constants::{ERR_AGE_OUT_OF_RANGE, ERR_EMPTY_NAME, ERR_NEGATIVE_AGE};

/// User record held in the store and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Sequential identifier, starting at 1
    pub id: u64,
    pub name: String,
    pub age: u32,
}

/// A validated user that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
}

impl NewUser {
    /// Validate a raw name/age pair
    ///
    /// The name is trimmed before it is stored so every insertion path agrees
    /// on what counts as the same name. Returns the static reason on failure
    /// so callers can wrap it in whatever error shape they report.
    pub fn parse(name: &str, age: i64) -> Result<Self, &'static str> {
        let name = name.trim();
        if !User::validate_name(name) {
            return Err(ERR_EMPTY_NAME);
        }
        let age = User::validate_age(age)?;

        Ok(Self {
            name: name.to_string(),
            age,
        })
    }
}

impl User {
    /// A name is valid if it has at least one non-whitespace character
    pub fn validate_name(name: &str) -> bool {
        !name.trim().is_empty()
    }

    /// Check that an age is non-negative and fits the stored width
    pub fn validate_age(age: i64) -> Result<u32, &'static str> {
        if age < 0 {
            return Err(ERR_NEGATIVE_AGE);
        }
        u32::try_from(age).map_err(|_| ERR_AGE_OUT_OF_RANGE)
    }

    /// First character of the name, used as the aggregation key
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}
