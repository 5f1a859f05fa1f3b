use std::convert::Infallible;

use axum::{
	body::Body,
	http::{Response, StatusCode},
	response::IntoResponse,
};

use crate::{session, view};

/// Describes how a route-specific error is presented to the client.
///
/// Each route module has its own error enum implementing this, so the
/// page a failure renders can depend on where it happened.
pub trait ErrorShape: std::error::Error {
	fn status(&self) -> StatusCode;

	/// Renders the error page (or re-rendered form) shown for this error.
	fn into_page(self) -> view::Page;
}

/// For rejections that can only fail with a session or database error.
impl ErrorShape for Infallible {
	fn status(&self) -> StatusCode {
		match *self {}
	}

	fn into_page(self) -> view::Page {
		match self {}
	}
}

/// Error type for route handlers.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum RouteError<T> {
	#[error(transparent)]
	Route(T),
	#[error("session error: {0}")]
	Session(#[from] session::Error),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

impl<T> IntoResponse for RouteError<T>
where
	T: ErrorShape,
{
	fn into_response(self) -> Response<Body> {
		match self {
			Self::Route(error) => {
				let status = error.status();

				if status.is_server_error() {
					tracing::error!(%error, "route failed");
				} else {
					tracing::debug!(%error, %status, "route rejected request");
				}

				(status, error.into_page()).into_response()
			}
			Self::Session(error) => error.into_response(),
			Self::Database(error) => {
				tracing::error!(%error, "database error");

				(
					StatusCode::INTERNAL_SERVER_ERROR,
					view::error_page(
						StatusCode::INTERNAL_SERVER_ERROR,
						"Something unexpected went wrong. Sorry about that.",
					),
				)
					.into_response()
			}
		}
	}
}
