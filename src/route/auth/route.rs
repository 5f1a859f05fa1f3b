use argon2::Argon2;
use axum::{
	extract::{Query, State},
	http::header,
	response::{IntoResponse, Redirect},
};
use uuid::Uuid;

use crate::{
	extract::{Form, FormRejection, Session},
	model::NewUser,
	session,
	store::Sessions,
	view::Page,
	AppState,
};

use super::{
	model::{self, LoginType},
	view, Error, RouteError,
};

pub const KEY_LENGTH: usize = 32;

/// Where to go after logging in when no (safe) `redirectTo` was given.
const DEFAULT_REDIRECT: &str = "/jokes";

/// Hashes a password with Argon2, using the user's id as a salt.
/// Since this is only used for logging in and registering,
/// the scope of this function can remain in here with no issues.
fn hash_password(
	hasher: &Argon2,
	password: &str,
	id: &Uuid,
) -> Result<[u8; KEY_LENGTH], argon2::Error> {
	let mut hash = [0; KEY_LENGTH];

	hasher.hash_password_into(password.as_bytes(), id.as_bytes(), &mut hash)?;
	Ok(hash)
}

/// Shows the login and registration form.
pub async fn login_page(Query(query): Query<model::LoginQuery>) -> Page {
	view::login(&model::ActionData::blank(query.redirect_to))
}

/// Logs in to or registers an account, setting a session cookie.
#[tracing::instrument(skip_all)]
pub async fn login(
	State(state): State<AppState>,
	form: Result<Form<model::LoginInput>, FormRejection<model::LoginInput>>,
) -> Result<impl IntoResponse, RouteError> {
	let Form(input) = form.map_err(|rejection| Error::InvalidForm(rejection.into()))?;

	let user = match input.login_type {
		LoginType::Login => {
			let user = state.users.find_by_username(&input.username).await?;
			let verified = match &user {
				Some(user) => {
					user.password
						== hash_password(&state.hasher, &input.password, &user.id)
							.map_err(Error::Argon)?
				}
				None => false,
			};

			match user {
				Some(user) if verified => user,
				_ => {
					return Err(Error::InvalidForm(model::ActionData::form_error(
						&input,
						"Username/Password combination is incorrect",
					))
					.into())
				}
			}
		}
		LoginType::Register => {
			let id = Uuid::new_v4();
			let password = hash_password(&state.hasher, &input.password, &id).map_err(Error::Argon)?;

			let user = state
				.users
				.insert(NewUser {
					id,
					username: input.username.clone(),
					password: password.to_vec(),
				})
				.await?;

			let Some(user) = user else {
				let message = format!("User with username {} already exists", input.username);

				return Err(Error::InvalidForm(model::ActionData::form_error(&input, message)).into());
			};

			tracing::info!(user = %user.id, "registered user");
			user
		}
	};

	let session_id = state.sessions.create(user.id).await?;
	let cookie = session::create_cookie(session_id);
	let redirect_to = session::safe_redirect(input.redirect_to.as_deref(), DEFAULT_REDIRECT);

	Ok((
		[(header::SET_COOKIE, cookie.to_string())],
		Redirect::to(redirect_to),
	))
}

/// Logs out of the current session, if any, and clears the session cookie.
#[tracing::instrument(skip_all)]
pub async fn logout(
	State(sessions): State<Sessions>,
	session: Session,
) -> Result<impl IntoResponse, RouteError> {
	if let Some(id) = session.id() {
		sessions.delete(id).await?;
	}

	Ok((
		[(header::SET_COOKIE, session::clear_cookie().to_string())],
		Redirect::to("/"),
	))
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_hash_is_salted_with_id() {
		let hasher = Argon2::default();
		let a = Uuid::new_v4();
		let b = Uuid::new_v4();

		let first = hash_password(&hasher, "twixrox", &a).unwrap();

		assert_eq!(first, hash_password(&hasher, "twixrox", &a).unwrap());
		assert_ne!(first, hash_password(&hasher, "twixrox", &b).unwrap());
		assert_ne!(first, hash_password(&hasher, "twixroxx", &a).unwrap());
	}
}
