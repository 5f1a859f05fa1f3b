use axum::http::StatusCode;

use crate::view::{escape, field_error, Page};

use super::model::{ActionData, Joke};

const TITLE: &str = "Jokes: So great, it's funny!";
const DESCRIPTION: &str = "Jokes app. Learn Rust and laugh at the same time!";

pub fn random_joke(joke: &Joke) -> Page {
	Page::new(
		TITLE,
		DESCRIPTION,
		format!(
			r#"<div>
	<p>Here's a random joke:</p>
	<p>{content}</p>
	<a href="/jokes/{id}">"{name}" Permalink</a>
</div>"#,
			content = escape(&joke.content),
			id = joke.id,
			name = escape(&joke.name),
		),
	)
}

/// The new joke form, optionally filled in from a failed submission.
pub fn new_joke(data: Option<&ActionData>) -> Page {
	let fields = data.and_then(|data| data.fields.as_ref());
	let field_errors = data.and_then(|data| data.field_errors.as_ref());

	let name = fields.map_or("", |fields| fields.name.as_str());
	let content = fields.map_or("", |fields| fields.content.as_str());
	let name_error = field_errors.and_then(|errors| errors.name.as_deref());
	let content_error = field_errors.and_then(|errors| errors.content.as_deref());
	let form_error = data.and_then(|data| data.form_error.as_deref());

	Page::new(
		TITLE,
		DESCRIPTION,
		format!(
			r#"<div>
	<p>Add your own hilarious joke</p>
	<form method="post" action="/jokes">
		<div>
			<label>
				Name:
				<input type="text" name="name" value="{name}" aria-invalid="{name_invalid}" />
			</label>
			{name_error}
		</div>
		<div>
			<label>
				Content:
				<textarea name="content" aria-invalid="{content_invalid}">{content}</textarea>
			</label>
			{content_error}
		</div>
		<div>
			{form_error}
			<button type="submit" class="button">Add</button>
		</div>
	</form>
</div>"#,
			name = escape(name),
			name_invalid = name_error.is_some(),
			name_error = field_error("name-error", name_error),
			content = escape(content),
			content_invalid = content_error.is_some(),
			content_error = field_error("content-error", content_error),
			form_error = field_error("form-error", form_error),
		),
	)
}

/// What the jokes page shows when it cannot show a joke.
pub fn boundary(status: StatusCode) -> Page {
	let message = if status == StatusCode::UNAUTHORIZED {
		"There are no jokes to display."
	} else {
		"Something unexpected went wrong. Sorry about that."
	};

	Page::new(
		TITLE,
		DESCRIPTION,
		format!(r#"<div class="error-container">{message}</div>"#),
	)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::model::CreateJoke;

	#[test]
	fn test_boundary_messages() {
		assert!(boundary(StatusCode::UNAUTHORIZED)
			.body
			.contains("There are no jokes to display."));
		assert!(boundary(StatusCode::NOT_FOUND)
			.body
			.contains("Something unexpected went wrong. Sorry about that."));
	}

	#[test]
	fn test_new_joke_escapes_fields() {
		let data = ActionData {
			fields: Some(CreateJoke {
				name: r#""><script>"#.into(),
				content: "</textarea>".into(),
			}),
			..ActionData::default()
		};

		let body = new_joke(Some(&data)).body;

		assert!(body.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
		assert!(body.contains("&lt;/textarea&gt;</textarea>"));
		assert!(!body.contains("form-validation-error"));
	}
}
