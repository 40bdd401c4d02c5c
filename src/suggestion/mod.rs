//! AI task suggestions: prompt formatting and reply parsing.

mod parser;
mod prompt;

pub use parser::{parse_suggestion, ParsedSuggestion, SuggestedTask};
pub use prompt::{build_prompt, SuggestionInput, START_DATE_FORMAT};
