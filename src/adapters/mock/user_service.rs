use crate::domain::{User, UserId};
use crate::ports::user_service::{Result, UserService as UserServiceTrait};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock implementation of UserService
///
/// Supports stateful testing by storing registered users.
pub struct UserService {
    users: Mutex<HashMap<UserId, User>>,
}

impl UserService {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Add a user for testing purposes
    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.user_id, user);
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn exists(&self, user_id: UserId) -> Result<bool> {
        Ok(self.users.lock().unwrap().contains_key(&user_id))
    }
}
