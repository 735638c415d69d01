use std::collections::{BTreeMap, HashSet};

use crate::error::{AppError, Result};
use crate::models::{NewUser, User};

/// In-memory user records keyed by sequential id
///
/// Ids are handed out in increasing order and never reused, so iterating the
/// map by key yields records in insertion order.
#[derive(Debug)]
pub struct UserStore {
    users: BTreeMap<u64, User>,
    names: HashSet<String>,
    next_id: u64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            names: HashSet::new(),
            next_id: 1,
        }
    }

    /// Insert a new user, assigning the next id
    ///
    /// Returns Err(DuplicateName) and leaves the store untouched if the name
    /// is already taken.
    pub fn create(&mut self, new_user: NewUser) -> Result<User> {
        if self.names.contains(&new_user.name) {
            return Err(AppError::DuplicateName(new_user.name));
        }

        let user = User {
            id: self.next_id,
            name: new_user.name,
            age: new_user.age,
        };
        self.next_id += 1;

        self.names.insert(user.name.clone());
        self.users.insert(user.id, user.clone());

        Ok(user)
    }

    /// All users in insertion order
    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn delete(&mut self, id: u64) -> Result<User> {
        let user = self.users.remove(&id).ok_or(AppError::UserNotFound)?;
        self.names.remove(&user.name);
        Ok(user)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
