use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MembershipError {
    #[error("User {0} cannot befriend or favorite themselves")]
    SelfReference(String),
}

/// Friend and favorite sets of one viewer
///
/// The two sets are independent: a user can be both a friend and a
/// favorite. The owner never appears in either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    owner: String,
    friends: HashSet<String>,
    favorites: HashSet<String>,
}

impl Membership {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            ..Self::default()
        }
    }

    pub fn is_friend(&self, user_id: &str) -> bool {
        self.friends.contains(user_id)
    }

    pub fn is_favorite(&self, user_id: &str) -> bool {
        self.favorites.contains(user_id)
    }

    /// Add `user_id` to favorites if absent, remove it if present
    ///
    /// Returns whether the user is a favorite afterwards.
    pub fn toggle_favorite(&mut self, user_id: &str) -> Result<bool, MembershipError> {
        self.check_not_owner(user_id)?;

        if self.favorites.remove(user_id) {
            Ok(false)
        } else {
            self.favorites.insert(user_id.to_string());
            Ok(true)
        }
    }

    /// Returns whether the set changed
    pub fn add_friend(&mut self, user_id: &str) -> Result<bool, MembershipError> {
        self.check_not_owner(user_id)?;
        Ok(self.friends.insert(user_id.to_string()))
    }

    /// Returns whether the set changed
    pub fn remove_friend(&mut self, user_id: &str) -> bool {
        self.friends.remove(user_id)
    }

    /// Replace the friend set wholesale, dropping the owner if present
    pub fn replace_friends<I>(&mut self, friends: I)
    where
        I: IntoIterator<Item = String>,
    {
        let owner = self.owner.clone();
        self.friends = friends.into_iter().filter(|id| *id != owner).collect();
    }

    /// Friend ids, sorted for stable output
    pub fn friends(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.friends.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Favorite ids, sorted for stable output
    pub fn favorites(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.favorites.iter().cloned().collect();
        ids.sort();
        ids
    }

    fn check_not_owner(&self, user_id: &str) -> Result<(), MembershipError> {
        if user_id == self.owner {
            return Err(MembershipError::SelfReference(user_id.to_string()));
        }
        Ok(())
    }
}
