use axum::{
	extract::{Path, State},
	response::Redirect,
};
use uuid::Uuid;

use crate::{
	extract::{Form, Session},
	store::{self, Jokes},
	view::Page,
};

use super::{model, view, Error, RouteError};

/// Looks up a joke by the id as it appears in the path.
///
/// Ids that are not UUIDs cannot belong to any joke.
async fn find_joke(jokes: &Jokes, id: &str) -> store::Result<Option<model::Joke>> {
	let Ok(id) = Uuid::parse_str(id) else {
		return Ok(None);
	};

	jokes.find_by_id(id).await
}

/// Shows a single joke.
#[tracing::instrument(skip(jokes, session))]
pub async fn get_joke(
	State(jokes): State<Jokes>,
	session: Session,
	Path(id): Path<String>,
) -> Result<Page, RouteError> {
	let joke = find_joke(&jokes, &id)
		.await?
		.ok_or_else(|| Error::NotFound(id.clone()))?;

	let is_owner = session.user_id() == Some(joke.jokester_id);

	Ok(view::joke(&model::JokeData { joke, is_owner }))
}

/// Deletes a joke owned by the logged in user.
///
/// The checks run in order: the intent, the session, whether the joke exists,
/// and finally whether the user owns it.
#[tracing::instrument(skip(jokes, session, input))]
pub async fn delete_joke(
	State(jokes): State<Jokes>,
	session: Session,
	Path(id): Path<String>,
	Form(input): Form<model::DeleteInput>,
) -> Result<Redirect, RouteError> {
	if input.intent.as_deref() != Some(model::DELETE_INTENT) {
		let intent = input.intent.unwrap_or_else(|| "null".into());

		return Err(Error::UnsupportedIntent(intent).into());
	}

	let user_id = session.require_user_id()?;
	let joke = find_joke(&jokes, &id)
		.await?
		.ok_or_else(|| Error::NothingToDelete(id.clone()))?;

	if joke.jokester_id != user_id {
		tracing::warn!(joke = %joke.id, user = %user_id, "refusing to delete joke owned by another user");
		return Err(Error::NotOwner.into());
	}

	jokes.delete_by_id(joke.id).await?;

	tracing::info!(
		monotonic_counter.jokes_deleted = 1_u64,
		joke = %joke.id,
		"deleted joke"
	);

	Ok(Redirect::to("/jokes"))
}
