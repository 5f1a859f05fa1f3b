use uuid::Uuid;

use super::{JokeStore, Result, SessionStore, UserStore};
use crate::{
	model::{CreateJoke, Joke, NewUser, User},
	Database,
};

/// Unique constraint on `"user".username`.
const USERNAME_KEY: &str = "user_username_key";

/// Postgres-backed store for jokes, users and sessions.
#[derive(Clone)]
pub struct PgStore {
	database: Database,
}

impl PgStore {
	pub fn new(database: Database) -> Self {
		Self { database }
	}

	/// Applies the embedded migrations in `migrations/`.
	pub async fn migrate(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
		sqlx::migrate!().run(&self.database).await
	}
}

#[axum::async_trait]
impl JokeStore for PgStore {
	async fn find_by_id(&self, id: Uuid) -> Result<Option<Joke>> {
		sqlx::query_as::<_, Joke>(
			r#"
				SELECT * FROM joke
				WHERE id = $1
			"#,
		)
		.bind(id)
		.fetch_optional(&self.database)
		.await
	}

	async fn count(&self) -> Result<i64> {
		sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM joke")
			.fetch_one(&self.database)
			.await
	}

	async fn find_at_offset(&self, skip: i64, take: i64) -> Result<Vec<Joke>> {
		sqlx::query_as::<_, Joke>(
			r#"
				SELECT * FROM joke
				ORDER BY created_at, id
				LIMIT $1 OFFSET $2
			"#,
		)
		.bind(take)
		.bind(skip)
		.fetch_all(&self.database)
		.await
	}

	async fn insert(&self, jokester_id: Uuid, joke: CreateJoke) -> Result<Joke> {
		sqlx::query_as::<_, Joke>(
			r#"
				INSERT INTO joke (id, jokester_id, name, content)
				VALUES (DEFAULT, $1, $2, $3)
				RETURNING *
			"#,
		)
		.bind(jokester_id)
		.bind(joke.name)
		.bind(joke.content)
		.fetch_one(&self.database)
		.await
	}

	async fn delete_by_id(&self, id: Uuid) -> Result<()> {
		sqlx::query("DELETE FROM joke WHERE id = $1")
			.bind(id)
			.execute(&self.database)
			.await?;

		Ok(())
	}
}

#[axum::async_trait]
impl SessionStore for PgStore {
	async fn find_user_id(&self, session_id: Uuid) -> Result<Option<Uuid>> {
		sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM session WHERE id = $1")
			.bind(session_id)
			.fetch_optional(&self.database)
			.await
	}

	async fn create(&self, user_id: Uuid) -> Result<Uuid> {
		sqlx::query_scalar::<_, Uuid>("INSERT INTO session (user_id) VALUES ($1) RETURNING id")
			.bind(user_id)
			.fetch_one(&self.database)
			.await
	}

	async fn delete(&self, session_id: Uuid) -> Result<()> {
		sqlx::query("DELETE FROM session WHERE id = $1")
			.bind(session_id)
			.execute(&self.database)
			.await?;

		Ok(())
	}
}

#[axum::async_trait]
impl UserStore for PgStore {
	async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
		sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE username = $1"#)
			.bind(username)
			.fetch_optional(&self.database)
			.await
	}

	async fn insert(&self, user: NewUser) -> Result<Option<User>> {
		let result = sqlx::query_as::<_, User>(
			r#"
				INSERT INTO "user" (id, username, password) VALUES ($1, $2, $3) RETURNING *
			"#,
		)
		.bind(user.id)
		.bind(user.username)
		.bind(user.password)
		.fetch_one(&self.database)
		.await;

		match result {
			Ok(user) => Ok(Some(user)),
			Err(sqlx::Error::Database(ref error)) if error.constraint() == Some(USERNAME_KEY) => {
				Ok(None)
			}
			Err(error) => Err(error),
		}
	}
}
