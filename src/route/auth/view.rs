use crate::view::{escape, field_error, Page};

use super::model::{ActionData, LoginType};

pub fn login(data: &ActionData) -> Page {
	let fields = data.fields.as_ref();
	let field_errors = data.field_errors.as_ref();

	let login_type = fields.and_then(|fields| fields.login_type);
	let username = fields.map_or("", |fields| fields.username.as_str());
	let redirect_to = fields
		.and_then(|fields| fields.redirect_to.as_deref())
		.unwrap_or("/jokes");
	let username_error = field_errors.and_then(|errors| errors.username.as_deref());
	let password_error = field_errors.and_then(|errors| errors.password.as_deref());

	let checked = |ty: LoginType| {
		if login_type.unwrap_or(LoginType::Login) == ty {
			" checked"
		} else {
			""
		}
	};

	Page::new(
		"Jokes | Login",
		"Login to submit your own jokes!",
		format!(
			r#"<div class="container">
	<h1>Login</h1>
	<form method="post" action="/login">
		<input type="hidden" name="redirectTo" value="{redirect_to}" />
		<fieldset>
			<legend>Login or Register?</legend>
			<label><input type="radio" name="loginType" value="login"{login} /> Login</label>
			<label><input type="radio" name="loginType" value="register"{register} /> Register</label>
		</fieldset>
		<div>
			<label for="username-input">Username</label>
			<input type="text" id="username-input" name="username" value="{username}" aria-invalid="{username_invalid}" />
			{username_error}
		</div>
		<div>
			<label for="password-input">Password</label>
			<input id="password-input" name="password" type="password" aria-invalid="{password_invalid}" />
			{password_error}
		</div>
		<div id="form-error-message">
			{form_error}
		</div>
		<button type="submit" class="button">Submit</button>
	</form>
</div>"#,
			redirect_to = escape(redirect_to),
			login = checked(LoginType::Login),
			register = checked(LoginType::Register),
			username = escape(username),
			username_invalid = username_error.is_some(),
			username_error = field_error("username-error", username_error),
			password_invalid = password_error.is_some(),
			password_error = field_error("password-error", password_error),
			form_error = field_error("form-error", data.form_error.as_deref()),
		),
	)
}
