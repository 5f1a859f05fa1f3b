use axum::{http::StatusCode, routing::get, Router};

use crate::{error, view::Page, AppState};

pub mod model;
pub mod route;
mod view;

/// An error raised while showing or deleting a single joke.
///
/// The messages are shown to the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Carries the requested id, which may not be a valid UUID.
	#[error("What a joke! Not found.")]
	NotFound(String),
	#[error("Can't delete what does not exist")]
	NothingToDelete(String),
	#[error("The intent {0} is not supported")]
	UnsupportedIntent(String),
	#[error("Pssh, nice try. That's not your joke")]
	NotOwner,
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new().route("/:id", get(get_joke).post(delete_joke))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::NotFound(..) | Self::NothingToDelete(..) => StatusCode::NOT_FOUND,
			Self::UnsupportedIntent(..) => StatusCode::BAD_REQUEST,
			Self::NotOwner => StatusCode::FORBIDDEN,
		}
	}

	fn into_page(self) -> Page {
		match self {
			Self::NotFound(id) | Self::NothingToDelete(id) => view::not_found(&id),
			error => crate::view::error_page(
				error.status(),
				&format!("Unhandled error: {error}"),
			),
		}
	}
}
