use axum::{http::StatusCode, routing::get, Router};

use crate::{error, view::Page, AppState};

pub mod model;
pub mod route;
mod view;

/// An error raised while showing a random joke or creating a new one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("No random joke found")]
	NoRandomJoke,
	#[error("invalid joke submission: {0:?}")]
	InvalidForm(model::ActionData),
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new()
		.route("/", get(random_joke).post(create_joke))
		.route("/new", get(new_joke))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::NoRandomJoke => StatusCode::NOT_FOUND,
			Self::InvalidForm(..) => StatusCode::BAD_REQUEST,
		}
	}

	fn into_page(self) -> Page {
		match self {
			// the form is re-rendered with its errors rather than an error page
			Self::InvalidForm(data) => view::new_joke(Some(&data)),
			error => view::boundary(error.status()),
		}
	}
}
