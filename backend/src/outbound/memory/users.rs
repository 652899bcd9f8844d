//! In-memory `UserRepository`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, InsertOutcome, NewUser, UpdateOutcome, User};

use super::{lock, next_id};

/// User repository holding accounts in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<InsertOutcome, UserPersistenceError> {
        let id = next_id().ok_or_else(|| UserPersistenceError::query("id generation failed"))?;
        lock(&self.users).push(user.clone().into_user(id.clone()));
        Ok(InsertOutcome::acknowledged(id))
    }

    async fn set_logged_in(
        &self,
        email: &Email,
        logged_in: bool,
    ) -> Result<UpdateOutcome, UserPersistenceError> {
        let mut users = lock(&self.users);
        let mut outcome = UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
        };
        if let Some(user) = users.iter_mut().find(|user| user.email() == email) {
            outcome.matched_count = 1;
            if user.logged_in() != logged_in {
                *user = user.clone().with_logged_in(logged_in);
                outcome.modified_count = 1;
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Attributes;
    use rstest::rstest;

    fn email() -> Email {
        Email::new("a@x.com").expect("valid email")
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_users_are_found_by_email() {
        let repo = MemoryUserRepository::new();
        let outcome = repo
            .insert(&NewUser::new(email(), "pw", Attributes::new()))
            .await
            .expect("insert");

        let user = repo
            .find_by_email(&email())
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(user.id(), &outcome.inserted_id);
        assert!(!user.logged_in());
    }

    #[rstest]
    #[tokio::test]
    async fn login_flag_reports_matches_and_modifications() {
        let repo = MemoryUserRepository::new();
        repo.insert(&NewUser::new(email(), "pw", Attributes::new()))
            .await
            .expect("insert");

        let first = repo.set_logged_in(&email(), true).await.expect("update");
        let again = repo.set_logged_in(&email(), true).await.expect("update");
        let ghost = repo
            .set_logged_in(&Email::new("ghost@x.com").expect("email"), false)
            .await
            .expect("update");

        assert_eq!((first.matched_count, first.modified_count), (1, 1));
        assert_eq!((again.matched_count, again.modified_count), (1, 0));
        assert_eq!((ghost.matched_count, ghost.modified_count), (0, 0));
    }
}
