pub use crate::model::Joke;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The only intent a joke page accepts.
pub const DELETE_INTENT: &str = "delete";

/// What the joke page shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JokeData {
	pub joke: Joke,
	/// Whether the viewer owns the joke, and so may delete it.
	pub is_owner: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteInput {
	pub intent: Option<String>,
}
