use axum::{
	body::Body,
	http::Response,
	response::{IntoResponse, Redirect},
};
use uuid::Uuid;

pub const COOKIE_NAME: &str = "session";

/// Where unauthenticated users are sent to log in.
pub const LOGIN_PATH: &str = "/login";

/// An error raised by the session requirement itself.
///
/// These never render a page, they redirect to the login flow instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("no authenticated user for {redirect_to}")]
	Unauthorized { redirect_to: String },
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::Unauthorized { redirect_to } => {
				Redirect::to(&login_url(&redirect_to)).into_response()
			}
		}
	}
}

/// The login page URL that sends the user back to `redirect_to` afterwards.
pub fn login_url(redirect_to: &str) -> String {
	let query = url::form_urlencoded::byte_serialize(redirect_to.as_bytes()).collect::<String>();

	format!("{LOGIN_PATH}?redirectTo={query}")
}

/// Returns `redirect_to` when it is a path on this site, otherwise `fallback`.
///
/// Protocol-relative URLs (`//host`) are rejected since browsers treat them as
/// absolute.
pub fn safe_redirect<'a>(redirect_to: Option<&'a str>, fallback: &'a str) -> &'a str {
	match redirect_to {
		Some(to) if to.starts_with('/') && !to.starts_with("//") => to,
		_ => fallback,
	}
}

/// Creates a session cookie with no expiry
pub fn create_cookie(session_id: Uuid) -> cookie::Cookie<'static> {
	cookie::Cookie::build((COOKIE_NAME, session_id.to_string()))
		.secure(!cfg!(debug_assertions))
		.http_only(true)
		.same_site(cookie::SameSite::Lax)
		.path("/")
		.into()
}

/// Creates an empty session cookie used to invalidate a previous one
pub fn clear_cookie() -> cookie::Cookie<'static> {
	cookie::Cookie::build(COOKIE_NAME)
		.http_only(true)
		.path("/")
		.max_age(cookie::time::Duration::ZERO)
		.into()
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_login_url_encodes_query() {
		assert_eq!(login_url("/jokes"), "/login?redirectTo=%2Fjokes");
		assert_eq!(
			login_url("/jokes/new?x=1&y"),
			"/login?redirectTo=%2Fjokes%2Fnew%3Fx%3D1%26y"
		);
	}

	#[test]
	fn test_safe_redirect() {
		assert_eq!(safe_redirect(Some("/jokes/new"), "/jokes"), "/jokes/new");
		assert_eq!(safe_redirect(Some("//evil.com"), "/jokes"), "/jokes");
		assert_eq!(safe_redirect(Some("https://evil.com"), "/jokes"), "/jokes");
		assert_eq!(safe_redirect(None, "/jokes"), "/jokes");
	}

	#[test]
	fn test_cookies() {
		let id = Uuid::new_v4();
		let cookie = create_cookie(id);

		assert_eq!(cookie.name(), COOKIE_NAME);
		assert_eq!(cookie.value(), id.to_string());
		assert_eq!(cookie.http_only(), Some(true));

		let cleared = clear_cookie();

		assert_eq!(cleared.value(), "");
		assert_eq!(cleared.max_age(), Some(cookie::time::Duration::ZERO));
	}
}
