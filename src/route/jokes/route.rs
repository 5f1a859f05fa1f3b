use axum::{extract::State, response::Redirect};
use rand::Rng;

use crate::{
	extract::{Form, FormRejection, Session},
	store::Jokes,
	view::Page,
};

use super::{model, view, Error, RouteError};

/// Picks a uniformly random offset in `0..count`, or 0 for an empty table.
fn random_offset(count: i64) -> i64 {
	if count <= 0 {
		return 0;
	}

	rand::thread_rng().gen_range(0..count)
}

/// Shows a single joke picked at random.
#[tracing::instrument(skip_all)]
pub async fn random_joke(State(jokes): State<Jokes>) -> Result<Page, RouteError> {
	let count = jokes.count().await?;
	let skip = random_offset(count);

	// Counting and fetching are separate queries, so a joke deleted in between
	// can leave nothing at `skip`. That is reported the same as an empty table.
	let joke = jokes
		.find_at_offset(skip, 1)
		.await?
		.into_iter()
		.next()
		.ok_or(Error::NoRandomJoke)?;

	Ok(view::random_joke(&joke))
}

pub async fn new_joke() -> Page {
	view::new_joke(None)
}

/// Creates a joke owned by the logged in user and redirects to it.
#[tracing::instrument(skip_all)]
pub async fn create_joke(
	State(jokes): State<Jokes>,
	session: Session,
	form: Result<Form<model::CreateJoke>, FormRejection<model::CreateJoke>>,
) -> Result<Redirect, RouteError> {
	let user_id = session.require_user_id()?;
	let Form(input) = form.map_err(|rejection| Error::InvalidForm(rejection.into()))?;

	let joke = jokes.insert(user_id, input).await?;

	tracing::info!(
		monotonic_counter.jokes_created = 1_u64,
		joke = %joke.id,
		jokester = %user_id,
		"created joke"
	);

	Ok(Redirect::to(&format!("/jokes/{}", joke.id)))
}

#[cfg(test)]
mod test {
	use std::sync::Arc;

	use axum::extract::State;
	use uuid::Uuid;

	use super::{random_joke, random_offset, Error, RouteError};
	use crate::{
		model::{CreateJoke, Joke},
		store::{self, JokeStore, Jokes},
	};

	/// Reports jokes in its count that are gone by the time they are fetched.
	struct VanishingJokes;

	#[axum::async_trait]
	impl JokeStore for VanishingJokes {
		async fn find_by_id(&self, _: Uuid) -> store::Result<Option<Joke>> {
			Ok(None)
		}

		async fn count(&self) -> store::Result<i64> {
			Ok(3)
		}

		async fn find_at_offset(&self, _: i64, _: i64) -> store::Result<Vec<Joke>> {
			Ok(Vec::new())
		}

		async fn insert(&self, _: Uuid, _: CreateJoke) -> store::Result<Joke> {
			Err(sqlx::Error::RowNotFound)
		}

		async fn delete_by_id(&self, _: Uuid) -> store::Result<()> {
			Ok(())
		}
	}

	#[tokio::test]
	async fn test_random_joke_deleted_after_count() {
		let jokes: Jokes = Arc::new(VanishingJokes);
		let result = random_joke(State(jokes)).await;

		assert!(matches!(
			result,
			Err(RouteError::Route(Error::NoRandomJoke))
		));
	}

	#[test]
	fn test_random_offset_in_range() {
		assert_eq!(random_offset(0), 0);
		assert_eq!(random_offset(1), 0);

		for _ in 0..100 {
			let offset = random_offset(5);

			assert!((0..5).contains(&offset));
		}
	}
}
