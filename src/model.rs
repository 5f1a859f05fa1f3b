use macros::model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single joke, owned by the user that submitted it.
///
/// Submissions are parsed into the derived [`CreateJoke`].
#[model]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, sqlx::FromRow)]
pub struct Joke {
	/// The unique identifier of the joke.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The user that owns the joke.
	#[serde(skip_deserializing)]
	pub jokester_id: Uuid,
	/// The short name shown in permalinks and page titles.
	#[validate(length(min = 3, message = "That joke's name is too short"))]
	pub name: String,
	/// The joke itself.
	#[validate(length(min = 10, message = "That joke is too short"))]
	pub content: String,
	#[serde(skip_deserializing)]
	pub created_at: chrono::DateTime<chrono::Utc>,
	#[serde(skip_deserializing)]
	pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A single user.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
	/// The unique identifier of the user.
	pub id: Uuid,
	/// The username that is displayed to the public and used to log in.
	pub username: String,
	/// The hashed password, salted with `id`.
	#[serde(skip)]
	pub password: Vec<u8>,
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A user that has not been persisted yet.
#[derive(Debug)]
pub struct NewUser {
	pub id: Uuid,
	pub username: String,
	pub password: Vec<u8>,
}

#[cfg(test)]
mod test {
	use validator::Validate;

	use super::CreateJoke;

	fn joke(name: &str, content: &str) -> CreateJoke {
		CreateJoke {
			name: name.into(),
			content: content.into(),
		}
	}

	fn failing_fields(input: &CreateJoke) -> Vec<String> {
		let Err(errors) = input.validate() else {
			return Vec::new();
		};

		let mut fields = errors
			.field_errors()
			.into_keys()
			.map(|field| field.to_string())
			.collect::<Vec<_>>();

		fields.sort();
		fields
	}

	#[test]
	fn test_valid_joke() {
		assert!(joke("Tenchars1", "This is long enough").validate().is_ok());
	}

	#[test]
	fn test_length_boundaries() {
		assert!(failing_fields(&joke("abc", "0123456789")).is_empty());
		assert_eq!(failing_fields(&joke("ab", "0123456789")), ["name"]);
		assert_eq!(failing_fields(&joke("abc", "012345678")), ["content"]);
		assert_eq!(failing_fields(&joke("", "")), ["content", "name"]);
	}

	#[test]
	fn test_length_counts_characters() {
		// three characters, six bytes
		assert!(failing_fields(&joke("äöü", "0123456789")).is_empty());
		// lengths are in chars, not UTF-16 units, so two emoji are still too short
		assert_eq!(failing_fields(&joke("😂😂", "0123456789")), ["name"]);
		assert!(failing_fields(&joke("😂😂😂", "0123456789")).is_empty());
	}
}
