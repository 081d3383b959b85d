//! In-process store implementing every repository port.
//!
//! Users, postings, and registrations live behind a single mutex, so each
//! uniqueness or reference check runs atomically with its insert. That gives
//! the same contract as the PostgreSQL constraints: concurrent identical
//! registrations produce one row and one `Duplicate`.
//!
//! Used when no database URL is configured, and as a test double.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    PostingRepository, PostingRepositoryError, RegistrationRepository,
    RegistrationRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, NewPosting, NewUser, Posting, PostingId, Registration, RegistrationId, User,
    UserId,
};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    user_ids_by_email: HashMap<EmailAddress, UserId>,
    /// Insertion order.
    postings: Vec<Posting>,
    /// Insertion order, which is also registration-time order.
    registrations: Vec<Registration>,
}

impl State {
    fn posting_exists(&self, id: &PostingId) -> bool {
        self.postings.iter().any(|posting| &posting.id() == id)
    }
}

/// Mutex-guarded store shared by the three repository ports.
pub struct InMemoryStore {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store stamped with the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Create an empty store stamped with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::connection)?;
        if state.user_ids_by_email.contains_key(&user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let stored = User::new(user.clone(), self.clock.utc());
        state
            .user_ids_by_email
            .insert(user.email.clone(), user.id.clone());
        state.users.insert(user.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        Ok(state
            .user_ids_by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }
}

#[async_trait]
impl PostingRepository for InMemoryStore {
    async fn insert(&self, posting: &NewPosting) -> Result<Posting, PostingRepositoryError> {
        let mut state = self.lock().map_err(PostingRepositoryError::connection)?;
        if !state.users.contains_key(&posting.owner) {
            return Err(PostingRepositoryError::owner_not_found(
                posting.owner.as_ref(),
            ));
        }
        let stored = Posting::new(posting.clone(), self.clock.utc());
        state.postings.push(stored.clone());
        Ok(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<Posting>, PostingRepositoryError> {
        let state = self.lock().map_err(PostingRepositoryError::connection)?;
        let mut postings: Vec<Posting> = state.postings.iter().rev().cloned().collect();
        // Stable sort keeps later inserts first when timestamps tie.
        postings.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(postings)
    }

    async fn find_by_id(&self, id: &PostingId) -> Result<Option<Posting>, PostingRepositoryError> {
        let state = self.lock().map_err(PostingRepositoryError::connection)?;
        Ok(state
            .postings
            .iter()
            .find(|posting| &posting.id() == id)
            .cloned())
    }

    async fn list_registrant_emails(
        &self,
        id: &PostingId,
    ) -> Result<Vec<EmailAddress>, PostingRepositoryError> {
        let state = self.lock().map_err(PostingRepositoryError::connection)?;
        Ok(state
            .registrations
            .iter()
            .filter(|registration| &registration.job_id == id)
            .map(|registration| registration.email.clone())
            .collect())
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn insert(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
    ) -> Result<Registration, RegistrationRepositoryError> {
        let mut state = self
            .lock()
            .map_err(RegistrationRepositoryError::connection)?;
        if !state.posting_exists(job_id) {
            return Err(RegistrationRepositoryError::posting_not_found(
                job_id.to_string(),
            ));
        }
        let duplicate = state
            .registrations
            .iter()
            .any(|registration| &registration.job_id == job_id && &registration.email == email);
        if duplicate {
            return Err(RegistrationRepositoryError::duplicate(
                job_id.to_string(),
                email.as_ref(),
            ));
        }
        let registration = Registration {
            id: RegistrationId::random(),
            job_id: *job_id,
            email: email.clone(),
            created_at: self.clock.utc(),
        };
        state.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn delete(
        &self,
        job_id: &PostingId,
        email: &EmailAddress,
    ) -> Result<bool, RegistrationRepositoryError> {
        let mut state = self
            .lock()
            .map_err(RegistrationRepositoryError::connection)?;
        let before = state.registrations.len();
        state
            .registrations
            .retain(|registration| !(&registration.job_id == job_id && &registration.email == email));
        Ok(state.registrations.len() < before)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
