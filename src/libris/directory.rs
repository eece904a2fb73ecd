//! The user directory.
//!
//! Identifiers are `LIB_USER_<n>`, where `n` comes from a counter owned by the
//! directory. Loading a snapshot moves the counter up to the highest number
//! already handed out, so a restart never issues a duplicate identifier.

use crate::error::{LibrisError, Result};
use crate::model::User;
use crate::store::{Collection, StorageBackend};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    last_number: u64,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<S: StorageBackend>(&mut self, store: &S) -> Result<()> {
        self.users = store.load(Collection::Users)?;

        let mut last_number = 0;
        for user in &self.users {
            match user.number() {
                Some(n) => last_number = last_number.max(n),
                None => warn!(user_id = %user.user_id, "user id has no sequence number"),
            }
        }
        self.last_number = last_number;

        debug!(count = self.users.len(), last_number, "users loaded");
        Ok(())
    }

    /// Register a user under the next free identifier and persist the
    /// directory. The name is taken as is.
    pub fn add<S: StorageBackend>(&mut self, store: &S, name: &str) -> Result<&User> {
        let number = self
            .last_number
            .checked_add(1)
            .ok_or_else(|| LibrisError::Store("user id counter exhausted".to_string()))?;
        self.users.push(User::new(name, number));
        if let Err(e) = store.save(Collection::Users, &self.users) {
            self.users.pop();
            return Err(e);
        }
        self.last_number = number;

        let user = &self.users[self.users.len() - 1];
        info!(user_id = %user.user_id, "user added");
        Ok(user)
    }

    pub fn lookup(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// The number the most recent identifier was built from.
    pub fn last_number(&self) -> u64 {
        self.last_number
    }
}
