//! Turns a meal photo into a Gemini request and the model's reply into
//! something displayable.
pub mod calories;
pub mod extract;
pub mod markup;
pub mod payload;

pub use calories::parse_calories;
pub use extract::{extract_error_message, extract_text};
pub use markup::{apply_inline_markup, format_paragraphs};
pub use payload::build_payload;
