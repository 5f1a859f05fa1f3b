mod model;

use proc_macro::TokenStream;

/// Derives an input struct named `CreateX` from a model struct `X`.
///
/// Fields with `#[serde(skip_deserializing)]` or `#[serde(skip)]` are left out, and all
/// other fields are copied verbatim (including attributes).
///
/// ```ignore
/// #[model]
/// #[derive(Deserialize)]
/// pub struct Joke { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn model(args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(args, input)
}
