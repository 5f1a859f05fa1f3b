use std::convert::Infallible;

use axum::{
	extract::{FromRef, FromRequestParts, OriginalUri},
	http::{header, request},
};
use uuid::Uuid;

use crate::{error::RouteError, session, store::Sessions};

/// The session (if any) attached to the request.
///
/// Extracting this never fails for anonymous requests: use [`Session::user_id`]
/// where a user is optional and [`Session::require_user_id`] where one is
/// needed, which fails with [`session::Error::Unauthorized`] and redirects to
/// the login page.
///
/// ```rust
/// async fn route(session: Session) -> Result<(), RouteError<Error>> {
///   let user_id = session.require_user_id()?;
///   // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
	id: Option<Uuid>,
	user_id: Option<Uuid>,
	/// The path and query of the request, to come back to after logging in.
	redirect_to: String,
}

impl Session {
	/// The session id from the cookie, if it belongs to a live session.
	pub fn id(&self) -> Option<Uuid> {
		self.id
	}

	pub fn user_id(&self) -> Option<Uuid> {
		self.user_id
	}

	pub fn require_user_id(&self) -> Result<Uuid, session::Error> {
		self.user_id.ok_or_else(|| session::Error::Unauthorized {
			redirect_to: self.redirect_to.clone(),
		})
	}
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
	Sessions: FromRef<S>,
	S: Sync + Send,
{
	type Rejection = RouteError<Infallible>;

	/// Looks up the user owning the session cookie, if there is one.
	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		// nested routers strip their prefix from `parts.uri`
		let uri = parts
			.extensions
			.get::<OriginalUri>()
			.map_or(&parts.uri, |original| &original.0);
		let redirect_to = uri
			.path_and_query()
			.map_or_else(|| uri.path().to_string(), ToString::to_string);

		let cookies = parts
			.headers
			.get_all(header::COOKIE)
			.into_iter()
			.filter_map(|value| value.to_str().ok());

		let session_id = cookies
			.flat_map(cookie::Cookie::split_parse)
			.filter_map(Result::ok)
			.find(|cookie| cookie.name() == session::COOKIE_NAME)
			.and_then(|cookie| match Uuid::parse_str(cookie.value()) {
				Ok(id) => Some(id),
				Err(error) => {
					tracing::debug!(%error, "ignoring malformed session cookie");
					None
				}
			});

		let Some(session_id) = session_id else {
			return Ok(Self {
				id: None,
				user_id: None,
				redirect_to,
			});
		};

		let sessions = Sessions::from_ref(state);
		let user_id = sessions.find_user_id(session_id).await?;

		Ok(Self {
			id: user_id.map(|_| session_id),
			user_id,
			redirect_to,
		})
	}
}

#[cfg(test)]
impl Session {
	pub fn anonymous(redirect_to: &str) -> Self {
		Self {
			id: None,
			user_id: None,
			redirect_to: redirect_to.into(),
		}
	}
}
