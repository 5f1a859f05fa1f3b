mod session;

pub use session::Session;

use axum::{
	body::Body,
	extract::{rejection, FromRequest, Request},
	http::{Response, StatusCode},
	response::IntoResponse,
};
use serde::de;

use crate::view;

/// Shown when a submitted form is missing fields or cannot be parsed.
pub const FORM_ERROR: &str = "Form not submitted correctly.";

/// Extractor that deserializes a url-encoded form body and validates it.
///
/// T must implement [`serde::de::DeserializeOwned`] and [`validator::Validate`]
/// in order to be used in an extractor. Take it as a `Result` to handle the
/// [`FormRejection`] in the route, for example to re-render the form:
///
/// ```rust
/// async fn route(form: Result<Form<Input>, FormRejection<Input>>) {
///   // ...
/// }
/// ```
pub struct Form<T>(pub T);

/// Why a [`Form`] could not be extracted.
#[derive(Debug)]
pub enum FormRejection<T> {
	/// The body could not be parsed, for example because a field is missing.
	Malformed(rejection::FormRejection),
	/// The body parsed, but failed validation.
	///
	/// The parsed input is kept so it can be shown back to the user.
	Invalid {
		input: T,
		errors: validator::ValidationErrors,
	},
}

impl<T> IntoResponse for FormRejection<T> {
	fn into_response(self) -> Response<Body> {
		let message = match self {
			Self::Malformed(rejection) => rejection.body_text(),
			Self::Invalid { errors, .. } => errors.to_string(),
		};

		(
			StatusCode::BAD_REQUEST,
			view::error_page(StatusCode::BAD_REQUEST, &message),
		)
			.into_response()
	}
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for Form<T>
where
	T: de::DeserializeOwned + validator::Validate + Send,
	S: Send + Sync,
{
	type Rejection = FormRejection<T>;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let axum::Form(input) = axum::Form::<T>::from_request(req, state)
			.await
			.map_err(FormRejection::Malformed)?;

		if let Err(errors) = input.validate() {
			return Err(FormRejection::Invalid { input, errors });
		}

		Ok(Self(input))
	}
}

/// Collects the first message of each failing field, keyed by field name.
pub fn field_messages(errors: &validator::ValidationErrors) -> Vec<(String, String)> {
	let mut messages = errors
		.field_errors()
		.into_iter()
		.filter_map(|(field, errors)| {
			let error = errors.first()?;
			let message = error
				.message
				.as_ref()
				.map_or_else(|| error.code.to_string(), ToString::to_string);

			Some((field.to_string(), message))
		})
		.collect::<Vec<_>>();

	messages.sort();
	messages
}
