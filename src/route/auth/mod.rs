use axum::{
	http::StatusCode,
	routing::{get, post},
	Router,
};

use crate::{error, view::Page, AppState};

pub mod model;
pub mod route;
mod view;

/// An error that can occur while logging in or registering.
///
/// Note that the messages are presented to the client, so they should not contain
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid login submission: {0:?}")]
	InvalidForm(model::ActionData),
	#[error("password hashing error")]
	Argon(#[from] argon2::Error),
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
		.route("/login", get(login_page).post(login))
		.route("/logout", post(logout))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::InvalidForm(..) => StatusCode::BAD_REQUEST,
			Self::Argon(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn into_page(self) -> Page {
		match self {
			Self::InvalidForm(data) => view::login(&data),
			error => crate::view::error_page(error.status(), &error.to_string()),
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	fn register(username: &str, password: &str) -> Vec<(&'static str, String)> {
		vec![
			("loginType", "register".into()),
			("username", username.into()),
			("password", password.into()),
			("redirectTo", "/jokes/new".into()),
		]
	}

	fn login(username: &str, password: &str) -> Vec<(&'static str, String)> {
		vec![
			("loginType", "login".into()),
			("username", username.into()),
			("password", password.into()),
		]
	}

	#[tokio::test]
	async fn test_login_page_keeps_redirect() {
		let app = app();

		let response = app
			.server
			.get("/login")
			.add_query_param("redirectTo", "/jokes/new")
			.await;

		assert_eq!(response.status_code(), StatusCode::OK);
		assert!(response
			.text()
			.contains(r#"name="redirectTo" value="/jokes/new""#));
	}

	#[tokio::test]
	async fn test_signup_flow() {
		let app = app();

		let response = app
			.server
			.post("/login")
			.form(&register("kody", "twixrox"))
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(response.header("location"), "/jokes/new");
		assert!(response
			.header("set-cookie")
			.to_str()
			.unwrap()
			.contains("session="));

		let response = app
			.server
			.post("/login")
			.form(&login("kody", "twixrox"))
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(response.header("location"), "/jokes");

		let cookie = response.header("set-cookie");
		let cookie = cookie.to_str().unwrap().split(';').next().unwrap().to_string();

		// the new session can create jokes
		let response = app
			.server
			.post("/jokes")
			.add_header(COOKIE, HeaderValue::from_str(&cookie).unwrap())
			.form(&[("name", "Tenchars1"), ("content", "This is long enough")])
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(app.store.count().await.unwrap(), 1);
	}

	#[tokio::test]
	async fn test_wrong_password() {
		let app = app();

		app.server
			.post("/login")
			.form(&register("kody", "twixrox"))
			.await;

		let response = app
			.server
			.post("/login")
			.form(&login("kody", "wrong password"))
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
		assert!(response
			.text()
			.contains("Username/Password combination is incorrect"));

		let response = app
			.server
			.post("/login")
			.form(&login("nobody", "twixrox"))
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
		assert!(response
			.text()
			.contains("Username/Password combination is incorrect"));
	}

	#[tokio::test]
	async fn test_username_taken() {
		let app = app();

		app.server
			.post("/login")
			.form(&register("kody", "twixrox"))
			.await;

		let response = app
			.server
			.post("/login")
			.form(&register("kody", "another"))
			.await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
		assert!(response
			.text()
			.contains("User with username kody already exists"));
	}

	#[tokio::test]
	async fn test_login_field_errors() {
		let app = app();

		let response = app.server.post("/login").form(&login("ko", "pw")).await;

		assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

		let text = response.text();

		assert!(text.contains("Usernames must be at least 3 characters long"));
		assert!(text.contains("Passwords must be at least 6 characters long"));
		assert!(text.contains(r#"value="ko""#));
	}

	#[tokio::test]
	async fn test_unsafe_redirect_is_ignored() {
		let app = app();
		let mut form = register("kody", "twixrox");

		form[3].1 = "//evil.example".into();

		let response = app.server.post("/login").form(&form).await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(response.header("location"), "/jokes");
	}

	#[tokio::test]
	async fn test_logout() {
		let app = app();
		let (_, cookie) = app.login("kody").await;

		let response = app.server.post("/logout").add_header(COOKIE, cookie.clone()).await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(response.header("location"), "/");
		assert!(response
			.header("set-cookie")
			.to_str()
			.unwrap()
			.contains("Max-Age=0"));

		// the old cookie no longer authenticates
		let response = app
			.server
			.post("/jokes")
			.add_header(COOKIE, cookie)
			.form(&[("name", "Tenchars1"), ("content", "This is long enough")])
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert!(response
			.header("location")
			.to_str()
			.unwrap()
			.starts_with("/login"));
	}
}
