//! Persistence ports used by the route handlers.
//!
//! Handlers only ever see the trait objects held in [`crate::State`], so the
//! same routes run against Postgres ([`PgStore`]) or the in-process
//! [`MemoryStore`].

mod memory;
mod postgres;

use std::sync::Arc;

use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::model::{CreateJoke, Joke, NewUser, User};

pub type Result<T> = std::result::Result<T, sqlx::Error>;

pub type Jokes = Arc<dyn JokeStore>;
pub type Sessions = Arc<dyn SessionStore>;
pub type Users = Arc<dyn UserStore>;

#[axum::async_trait]
pub trait JokeStore: Send + Sync {
	async fn find_by_id(&self, id: Uuid) -> Result<Option<Joke>>;

	async fn count(&self) -> Result<i64>;

	/// Returns at most `take` jokes after skipping `skip` of them.
	///
	/// Ordering is oldest first, with the id as a tie-breaker, so the same
	/// offset keeps pointing at the same joke while nothing is written.
	async fn find_at_offset(&self, skip: i64, take: i64) -> Result<Vec<Joke>>;

	async fn insert(&self, jokester_id: Uuid, joke: CreateJoke) -> Result<Joke>;

	async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}

#[axum::async_trait]
pub trait SessionStore: Send + Sync {
	/// Resolves a session id (the cookie value) to the user that owns it.
	async fn find_user_id(&self, session_id: Uuid) -> Result<Option<Uuid>>;

	async fn create(&self, user_id: Uuid) -> Result<Uuid>;

	async fn delete(&self, session_id: Uuid) -> Result<()>;
}

#[axum::async_trait]
pub trait UserStore: Send + Sync {
	async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

	/// Inserts a new user, returning `None` if the username is already taken.
	async fn insert(&self, user: NewUser) -> Result<Option<User>>;
}
