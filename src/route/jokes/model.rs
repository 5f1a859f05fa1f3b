pub use crate::{
	extract::FORM_ERROR,
	model::{CreateJoke, Joke},
};

use serde::Serialize;

use crate::extract::{self, FormRejection};

/// Per-field validation messages for the new joke form.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct FieldErrors {
	pub name: Option<String>,
	pub content: Option<String>,
}

/// What a failed joke submission sends back to the form.
///
/// Either `form_error` is set and the other two are empty, or `field_errors`
/// holds at least one message and `fields` echoes what was submitted.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
	pub field_errors: Option<FieldErrors>,
	pub fields: Option<CreateJoke>,
	pub form_error: Option<String>,
}

impl ActionData {
	pub fn malformed() -> Self {
		Self {
			form_error: Some(FORM_ERROR.into()),
			..Self::default()
		}
	}

	pub fn invalid(fields: CreateJoke, errors: &validator::ValidationErrors) -> Self {
		let mut field_errors = FieldErrors::default();

		for (field, message) in extract::field_messages(errors) {
			match field.as_str() {
				"name" => field_errors.name = Some(message),
				"content" => field_errors.content = Some(message),
				_ => {}
			}
		}

		Self {
			field_errors: Some(field_errors),
			fields: Some(fields),
			form_error: None,
		}
	}
}

impl From<FormRejection<CreateJoke>> for ActionData {
	fn from(rejection: FormRejection<CreateJoke>) -> Self {
		match rejection {
			FormRejection::Malformed(..) => Self::malformed(),
			FormRejection::Invalid { input, errors } => Self::invalid(input, &errors),
		}
	}
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::*;

	fn submit(name: &str, content: &str) -> Option<ActionData> {
		let input = CreateJoke {
			name: name.into(),
			content: content.into(),
		};

		let errors = input.validate().err()?;

		Some(ActionData::invalid(input, &errors))
	}

	#[test]
	fn test_both_fields_too_short() {
		let data = submit("Hi", "Short").unwrap();

		assert_eq!(
			data.field_errors,
			Some(FieldErrors {
				name: Some("That joke's name is too short".into()),
				content: Some("That joke is too short".into()),
			})
		);
		assert_eq!(
			data.fields,
			Some(CreateJoke {
				name: "Hi".into(),
				content: "Short".into(),
			})
		);
		assert_eq!(data.form_error, None);
	}

	#[test]
	fn test_fields_fail_independently() {
		let data = submit("Hi", "This is long enough").unwrap();

		assert_eq!(
			data.field_errors,
			Some(FieldErrors {
				name: Some("That joke's name is too short".into()),
				content: None,
			})
		);

		let data = submit("Tenchars1", "Short").unwrap();

		assert_eq!(
			data.field_errors,
			Some(FieldErrors {
				name: None,
				content: Some("That joke is too short".into()),
			})
		);

		assert!(submit("Tenchars1", "This is long enough").is_none());
	}

	#[test]
	fn test_serialized_shape() {
		let value = serde_json::to_value(ActionData::malformed()).unwrap();

		assert_eq!(
			value,
			serde_json::json!({
				"fieldErrors": null,
				"fields": null,
				"formError": FORM_ERROR,
			})
		);

		let value = serde_json::to_value(submit("Hi", "Short").unwrap()).unwrap();

		assert_eq!(value["fieldErrors"]["name"], "That joke's name is too short");
		assert_eq!(value["fields"]["content"], "Short");
	}
}
