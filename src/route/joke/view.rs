use crate::view::{escape, Page};

use super::model::{JokeData, DELETE_INTENT};

pub fn joke(data: &JokeData) -> Page {
	let JokeData { joke, is_owner } = data;

	let delete = if *is_owner {
		format!(
			r#"
	<form method="post">
		<button name="intent" type="submit" value="{DELETE_INTENT}" class="button">Delete</button>
	</form>"#
		)
	} else {
		String::new()
	};

	Page::new(
		format!(r#""{}" joke"#, joke.name),
		format!(r#"Enjoy the "{}" joke and much more"#, joke.name),
		format!(
			r#"<div>
	<p>Here's your hilarious joke:</p>
	<p>{content}</p>
	<a href="/jokes/{id}">"{name}" Permalink</a>{delete}
</div>"#,
			content = escape(&joke.content),
			id = joke.id,
			name = escape(&joke.name),
		),
	)
}

/// Shown for any 404 on a joke page, with the id that was asked for.
pub fn not_found(id: &str) -> Page {
	Page::new(
		"No joke",
		"No joke found",
		format!(
			r#"<div class="error-container">Huh? What the heck is "{}"?</div>"#,
			escape(id)
		),
	)
}
