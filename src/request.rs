//! Request Builder for idea submissions
//!
//! Turns raw form fields into a `ValidationRequest`, enforcing the
//! client-side sanity checks before anything touches the network.
//! Building is a pure function of the form: no I/O, no side effects.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length for the idea name and target market fields.
pub const MIN_NAME_LEN: usize = 3;
/// Minimum length for the description and problem fields.
pub const MIN_TEXT_LEN: usize = 20;

/// The critic personas the backend can apply.
pub const AVAILABLE_CRITICS: &[&str] = &["vc", "engineer", "ethicist", "user", "competitor"];

/// Raw, unvalidated user input as collected by the form screen.
#[derive(Debug, Clone, Default)]
pub struct IdeaForm {
    pub idea_name: String,
    pub description: String,
    pub target_market: String,
    pub problem_solving: String,
    pub unique_value: String,
    pub selected_critics: Vec<String>,
}

/// A validated idea submission, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub idea_name: String,
    pub description: String,
    pub target_market: String,
    pub problem_solving: String,
    pub unique_value: Option<String>,
    pub selected_critics: Vec<String>,
}

/// Pre-flight validation failures. These block dispatch; the adapter
/// never sees a request that failed to build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
}

impl IdeaForm {
    /// Validate and build a `ValidationRequest`.
    pub fn build(&self) -> Result<ValidationRequest, BuildError> {
        let idea_name = self.idea_name.trim();
        let description = self.description.trim();
        let target_market = self.target_market.trim();
        let problem_solving = self.problem_solving.trim();
        let unique_value = self.unique_value.trim();

        for (field, value) in [
            ("idea name", idea_name),
            ("description", description),
            ("target market", target_market),
            ("problem statement", problem_solving),
        ] {
            if value.is_empty() {
                return Err(BuildError::MissingField(field));
            }
        }

        // Long-text minimums are checked before the short ones so the
        // most substantive field is named when several are under-length.
        for (field, value, min) in [
            ("description", description, MIN_TEXT_LEN),
            ("problem statement", problem_solving, MIN_TEXT_LEN),
            ("idea name", idea_name, MIN_NAME_LEN),
            ("target market", target_market, MIN_NAME_LEN),
        ] {
            if value.chars().count() < min {
                return Err(BuildError::TooShort { field, min });
            }
        }

        let selected_critics = if self.selected_critics.is_empty() {
            AVAILABLE_CRITICS.iter().map(|c| c.to_string()).collect()
        } else {
            self.selected_critics
                .iter()
                .filter(|c| AVAILABLE_CRITICS.contains(&c.as_str()))
                .cloned()
                .collect()
        };

        Ok(ValidationRequest {
            idea_name: idea_name.to_string(),
            description: description.to_string(),
            target_market: target_market.to_string(),
            problem_solving: problem_solving.to_string(),
            unique_value: if unique_value.is_empty() {
                None
            } else {
                Some(unique_value.to_string())
            },
            selected_critics,
        })
    }
}

impl ValidationRequest {
    /// Compose the discrete fields into the single `idea` text the wire
    /// contract expects. Sections keep the labels the backend prompts
    /// were written against.
    pub fn compose_idea(&self) -> String {
        let mut out = format!(
            "Idea: {}\n\nDescription:\n{}\n\nTarget market:\n{}\n\nProblem it solves:\n{}",
            self.idea_name, self.description, self.target_market, self.problem_solving
        );
        if let Some(unique) = &self.unique_value {
            out.push_str("\n\nUnique value:\n");
            out.push_str(unique);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> IdeaForm {
        IdeaForm {
            idea_name: "PlantPal".to_string(),
            description: "An app that reminds people to water their houseplants".to_string(),
            target_market: "urban plant owners".to_string(),
            problem_solving: "People forget to water plants and the plants die".to_string(),
            unique_value: String::new(),
            selected_critics: Vec::new(),
        }
    }

    #[test]
    fn builds_valid_form() {
        let request = valid_form().build().unwrap();
        assert_eq!(request.idea_name, "PlantPal");
        assert_eq!(request.unique_value, None);
        assert_eq!(request.selected_critics.len(), AVAILABLE_CRITICS.len());
    }

    #[test]
    fn whitespace_only_field_is_missing() {
        let mut form = valid_form();
        form.idea_name = "   ".to_string();
        assert_eq!(form.build(), Err(BuildError::MissingField("idea name")));
    }

    #[test]
    fn empty_description_is_missing_not_too_short() {
        let mut form = valid_form();
        form.description = String::new();
        assert_eq!(form.build(), Err(BuildError::MissingField("description")));
    }

    #[test]
    fn short_description_names_the_field() {
        let mut form = valid_form();
        form.description = "too short".to_string();
        assert_eq!(
            form.build(),
            Err(BuildError::TooShort {
                field: "description",
                min: MIN_TEXT_LEN
            })
        );
    }

    #[test]
    fn short_problem_statement_is_rejected() {
        let mut form = valid_form();
        form.problem_solving = "...".to_string();
        assert_eq!(
            form.build(),
            Err(BuildError::TooShort {
                field: "problem statement",
                min: MIN_TEXT_LEN
            })
        );
    }

    #[test]
    fn two_char_idea_name_is_rejected() {
        let mut form = valid_form();
        form.idea_name = "AI".to_string();
        assert_eq!(
            form.build(),
            Err(BuildError::TooShort {
                field: "idea name",
                min: MIN_NAME_LEN
            })
        );
    }

    #[test]
    fn description_is_reported_when_several_fields_are_short() {
        let form = IdeaForm {
            idea_name: "AI".to_string(),
            description: "too short".to_string(),
            target_market: "devs".to_string(),
            problem_solving: "...".to_string(),
            unique_value: String::new(),
            selected_critics: Vec::new(),
        };
        assert_eq!(
            form.build(),
            Err(BuildError::TooShort {
                field: "description",
                min: MIN_TEXT_LEN
            })
        );
    }

    #[test]
    fn length_is_checked_after_trimming() {
        let mut form = valid_form();
        // 19 characters of text padded with whitespace
        form.description = format!("  {}  ", "a".repeat(MIN_TEXT_LEN - 1));
        assert!(matches!(
            form.build(),
            Err(BuildError::TooShort {
                field: "description",
                ..
            })
        ));
    }

    #[test]
    fn unique_value_survives_when_present() {
        let mut form = valid_form();
        form.unique_value = " community seed swaps ".to_string();
        let request = form.build().unwrap();
        assert_eq!(request.unique_value.as_deref(), Some("community seed swaps"));
    }

    #[test]
    fn unknown_critics_are_filtered() {
        let mut form = valid_form();
        form.selected_critics = vec!["vc".to_string(), "astrologer".to_string()];
        let request = form.build().unwrap();
        assert_eq!(request.selected_critics, vec!["vc".to_string()]);
    }

    #[test]
    fn composed_idea_carries_all_sections() {
        let mut form = valid_form();
        form.unique_value = "gamified streaks".to_string();
        let text = form.build().unwrap().compose_idea();
        assert!(text.contains("Idea: PlantPal"));
        assert!(text.contains("Target market:"));
        assert!(text.contains("Unique value:\ngamified streaks"));
    }
}
