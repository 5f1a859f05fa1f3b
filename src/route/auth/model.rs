use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::extract::{self, FormRejection};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
	Login,
	Register,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
	pub login_type: LoginType,
	/// The username that is displayed to the public.
	#[validate(length(min = 3, message = "Usernames must be at least 3 characters long"))]
	pub username: String,
	#[validate(length(min = 6, message = "Passwords must be at least 6 characters long"))]
	pub password: String,
	/// Where to send the user once logged in.
	#[serde(default)]
	pub redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginQuery {
	pub redirect_to: Option<String>,
}

/// The submitted values shown back in the form. The password is never echoed.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFields {
	pub login_type: Option<LoginType>,
	pub username: String,
	pub redirect_to: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct FieldErrors {
	pub username: Option<String>,
	pub password: Option<String>,
}

/// What a failed login sends back to the form.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
	pub field_errors: Option<FieldErrors>,
	pub fields: Option<LoginFields>,
	pub form_error: Option<String>,
}

impl ActionData {
	/// An empty form, for a fresh visit to the login page.
	pub fn blank(redirect_to: Option<String>) -> Self {
		Self {
			fields: Some(LoginFields {
				redirect_to,
				..LoginFields::default()
			}),
			..Self::default()
		}
	}

	pub fn form_error(input: &LoginInput, message: impl Into<String>) -> Self {
		Self {
			field_errors: None,
			fields: Some(input.into()),
			form_error: Some(message.into()),
		}
	}
}

impl From<&LoginInput> for LoginFields {
	fn from(input: &LoginInput) -> Self {
		Self {
			login_type: Some(input.login_type),
			username: input.username.clone(),
			redirect_to: input.redirect_to.clone(),
		}
	}
}

impl From<FormRejection<LoginInput>> for ActionData {
	fn from(rejection: FormRejection<LoginInput>) -> Self {
		match rejection {
			FormRejection::Malformed(..) => Self {
				form_error: Some(extract::FORM_ERROR.into()),
				..Self::default()
			},
			FormRejection::Invalid { input, errors } => {
				let mut field_errors = FieldErrors::default();

				for (field, message) in extract::field_messages(&errors) {
					match field.as_str() {
						"username" => field_errors.username = Some(message),
						"password" => field_errors.password = Some(message),
						_ => {}
					}
				}

				Self {
					field_errors: Some(field_errors),
					fields: Some((&input).into()),
					form_error: None,
				}
			}
		}
	}
}
