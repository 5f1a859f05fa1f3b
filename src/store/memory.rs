use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{JokeStore, Result, SessionStore, UserStore};
use crate::model::{CreateJoke, Joke, NewUser, User};

#[derive(Default)]
struct Tables {
	/// Kept in insertion order, which doubles as the offset ordering.
	jokes: Vec<Joke>,
	users: Vec<User>,
	sessions: HashMap<Uuid, Uuid>,
}

/// An in-process store, used by tests and when no database is configured.
///
/// Nothing is persisted across restarts.
#[derive(Default)]
pub struct MemoryStore {
	tables: RwLock<Tables>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[axum::async_trait]
impl JokeStore for MemoryStore {
	async fn find_by_id(&self, id: Uuid) -> Result<Option<Joke>> {
		let tables = self.tables.read().await;

		Ok(tables.jokes.iter().find(|joke| joke.id == id).cloned())
	}

	async fn count(&self) -> Result<i64> {
		let tables = self.tables.read().await;

		Ok(i64::try_from(tables.jokes.len()).unwrap_or(i64::MAX))
	}

	async fn find_at_offset(&self, skip: i64, take: i64) -> Result<Vec<Joke>> {
		let tables = self.tables.read().await;
		let skip = usize::try_from(skip).unwrap_or(0);
		let take = usize::try_from(take).unwrap_or(0);

		Ok(tables.jokes.iter().skip(skip).take(take).cloned().collect())
	}

	async fn insert(&self, jokester_id: Uuid, joke: CreateJoke) -> Result<Joke> {
		let now = Utc::now();
		let joke = Joke {
			id: Uuid::new_v4(),
			jokester_id,
			name: joke.name,
			content: joke.content,
			created_at: now,
			updated_at: now,
		};

		self.tables.write().await.jokes.push(joke.clone());

		Ok(joke)
	}

	async fn delete_by_id(&self, id: Uuid) -> Result<()> {
		self.tables.write().await.jokes.retain(|joke| joke.id != id);

		Ok(())
	}
}

#[axum::async_trait]
impl SessionStore for MemoryStore {
	async fn find_user_id(&self, session_id: Uuid) -> Result<Option<Uuid>> {
		Ok(self.tables.read().await.sessions.get(&session_id).copied())
	}

	async fn create(&self, user_id: Uuid) -> Result<Uuid> {
		let session_id = Uuid::new_v4();

		self.tables
			.write()
			.await
			.sessions
			.insert(session_id, user_id);

		Ok(session_id)
	}

	async fn delete(&self, session_id: Uuid) -> Result<()> {
		self.tables.write().await.sessions.remove(&session_id);

		Ok(())
	}
}

#[axum::async_trait]
impl UserStore for MemoryStore {
	async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
		let tables = self.tables.read().await;

		Ok(tables
			.users
			.iter()
			.find(|user| user.username == username)
			.cloned())
	}

	async fn insert(&self, user: NewUser) -> Result<Option<User>> {
		let mut tables = self.tables.write().await;

		if tables
			.users
			.iter()
			.any(|existing| existing.username == user.username)
		{
			return Ok(None);
		}

		let user = User {
			id: user.id,
			username: user.username,
			password: user.password,
			created_at: Utc::now(),
		};

		tables.users.push(user.clone());

		Ok(Some(user))
	}
}

#[cfg(test)]
mod test {
	use uuid::Uuid;

	use super::MemoryStore;
	use crate::{
		model::{CreateJoke, NewUser},
		store::{JokeStore, SessionStore, UserStore},
	};

	fn joke(name: &str) -> CreateJoke {
		CreateJoke {
			name: name.into(),
			content: "This is long enough".into(),
		}
	}

	#[tokio::test]
	async fn test_offset_follows_insertion_order() {
		let store = MemoryStore::new();
		let owner = Uuid::new_v4();

		for name in ["first", "second", "third"] {
			JokeStore::insert(&store, owner, joke(name)).await.unwrap();
		}

		assert_eq!(store.count().await.unwrap(), 3);

		let page = store.find_at_offset(1, 1).await.unwrap();

		assert_eq!(page.len(), 1);
		assert_eq!(page[0].name, "second");
		assert!(store.find_at_offset(3, 1).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_insert_find_delete() {
		let store = MemoryStore::new();
		let owner = Uuid::new_v4();

		let created = JokeStore::insert(&store, owner, joke("Tenchars1")).await.unwrap();
		let found = store.find_by_id(created.id).await.unwrap().unwrap();

		assert_eq!(found, created);
		assert_eq!(found.jokester_id, owner);

		store.delete_by_id(created.id).await.unwrap();

		assert!(store.find_by_id(created.id).await.unwrap().is_none());
		assert_eq!(store.count().await.unwrap(), 0);
	}

	#[tokio::test]
	async fn test_sessions() {
		let store = MemoryStore::new();
		let user_id = Uuid::new_v4();

		let session_id = SessionStore::create(&store, user_id).await.unwrap();

		assert_eq!(store.find_user_id(session_id).await.unwrap(), Some(user_id));

		SessionStore::delete(&store, session_id).await.unwrap();

		assert_eq!(store.find_user_id(session_id).await.unwrap(), None);
	}

	#[tokio::test]
	async fn test_duplicate_username() {
		let store = MemoryStore::new();
		let user = || NewUser {
			id: Uuid::new_v4(),
			username: "kody".into(),
			password: vec![1, 2, 3],
		};

		assert!(UserStore::insert(&store, user()).await.unwrap().is_some());
		assert!(UserStore::insert(&store, user()).await.unwrap().is_none());
		assert!(store.find_by_username("kody").await.unwrap().is_some());
	}
}
