//! Shared HTML rendering.
//!
//! Pages are plain strings; anything user-provided must go through [`escape`].

use std::{borrow::Cow, fmt::Write};

use axum::{
	body::Body,
	http::{Response, StatusCode},
	response::{Html, IntoResponse},
};

/// A rendered page body along with its metadata.
#[derive(Debug)]
pub struct Page {
	pub title: Cow<'static, str>,
	pub description: Cow<'static, str>,
	pub body: String,
}

impl Page {
	pub fn new(
		title: impl Into<Cow<'static, str>>,
		description: impl Into<Cow<'static, str>>,
		body: String,
	) -> Self {
		Self {
			title: title.into(),
			description: description.into(),
			body,
		}
	}

	pub fn render(&self) -> String {
		format!(
			r#"<!DOCTYPE html>
<html lang="en">
	<head>
		<meta charset="utf-8" />
		<meta name="viewport" content="width=device-width, initial-scale=1" />
		<title>{title}</title>
		<meta name="description" content="{description}" />
	</head>
	<body>
		<header>
			<a href="/jokes">JOKES</a>
			<form action="/logout" method="post">
				<button type="submit">Logout</button>
			</form>
		</header>
		<main>
{body}
		</main>
	</body>
</html>"#,
			title = escape(&self.title),
			description = escape(&self.description),
			body = self.body,
		)
	}
}

impl IntoResponse for Page {
	fn into_response(self) -> Response<Body> {
		Html(self.render()).into_response()
	}
}

/// The last-resort page for errors a route does not display itself.
pub fn error_page(status: StatusCode, message: &str) -> Page {
	let reason = status.canonical_reason().unwrap_or("Error");

	Page::new(
		format!("{} {reason}", status.as_u16()),
		"Something went wrong",
		format!(
			r#"<div class="error-container">
	<h1>App Error</h1>
	<pre>{}</pre>
</div>"#,
			escape(message)
		),
	)
}

/// Escapes text for use in HTML element content and double-quoted attribute values.
pub fn escape(input: &str) -> String {
	let mut output = String::with_capacity(input.len());

	for c in input.chars() {
		match c {
			'&' => output.push_str("&amp;"),
			'<' => output.push_str("&lt;"),
			'>' => output.push_str("&gt;"),
			'"' => output.push_str("&quot;"),
			c => output.push(c),
		}
	}

	output
}

/// Renders an inline field or form error, if any.
pub fn field_error(id: &str, error: Option<&str>) -> String {
	let mut output = String::new();

	if let Some(error) = error {
		let _ = write!(
			output,
			r#"<p class="form-validation-error" role="alert" id="{id}">{}</p>"#,
			escape(error)
		);
	}

	output
}
