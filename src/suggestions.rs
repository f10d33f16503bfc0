//! Validation of goal suggestions returned by the AI completion service.
//!
//! The completion is untrusted text. It must be a JSON array of suggestion
//! objects, optionally wrapped in one markdown code fence, and every field
//! has to pass the same checks a hand-typed goal would.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::goals::data::{Category, NewGoal, TimeFrame};
use crate::input::{check_field, FieldKind, ValidationError};

pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SuggestedGoal {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub time_frame: TimeFrame,
}

impl From<SuggestedGoal> for NewGoal {
    fn from(suggestion: SuggestedGoal) -> NewGoal {
        NewGoal {
            title: suggestion.title,
            description: suggestion.description,
            category: suggestion.category,
            time_frame: suggestion.time_frame,
            status: Default::default(),
            progress: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("completion is not a list of suggestions: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("completion contained no suggestions")]
    Empty,

    #[error("completion contained {count} suggestions, at most {max} are allowed")]
    TooMany { count: usize, max: usize },

    #[error("suggestion {index} is invalid: {error}")]
    Invalid {
        index: usize,
        error: ValidationError,
    },
}

fn strip_code_fence(completion: &str) -> &str {
    let trimmed = completion.trim();

    let inner = match trimmed.strip_prefix("```") {
        Some(rest) => rest,
        None => return trimmed,
    };
    let inner = match inner.strip_suffix("```") {
        Some(inner) => inner,
        None => return trimmed,
    };

    // Drop an info string such as `json` on the opening fence line.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim().contains(char::is_whitespace) => body.trim(),
        _ => inner.trim(),
    }
}

pub fn parse_suggestions(completion: &str) -> Result<Vec<SuggestedGoal>, SuggestionError> {
    let suggestions: Vec<SuggestedGoal> = serde_json::from_str(strip_code_fence(completion))?;

    if suggestions.is_empty() {
        return Err(SuggestionError::Empty);
    }
    if suggestions.len() > MAX_SUGGESTIONS {
        return Err(SuggestionError::TooMany {
            count: suggestions.len(),
            max: MAX_SUGGESTIONS,
        });
    }

    for (index, suggestion) in suggestions.iter().enumerate() {
        check_field("title", &suggestion.title, FieldKind::Title, true)
            .and_then(|_| {
                check_field(
                    "description",
                    &suggestion.description,
                    FieldKind::Description,
                    false,
                )
            })
            .map_err(|error| SuggestionError::Invalid { index, error })?;
    }

    Ok(suggestions)
}
