// Validation of user-entered task fields

use crate::models::normalize_description;
use eyre::{Result, eyre};

/// Title and description as they should reach the task list
///
/// Parsing is where empty titles are refused; the task list itself trusts
/// whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
}

impl TaskInput {
    pub fn parse(title: &str, description: Option<&str>) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(eyre!("Task title cannot be empty or whitespace-only"));
        }

        Ok(Self {
            title: title.to_string(),
            description: normalize_description(description.map(str::to_string)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_title() {
        assert!(TaskInput::parse("", None).is_err());
        assert!(TaskInput::parse("   ", Some("details")).is_err());
        assert!(TaskInput::parse("\t\n", None).is_err());
    }

    #[test]
    fn test_trims_fields() {
        let input = TaskInput::parse("  Buy milk ", Some("  semi-skimmed  ")).unwrap();
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description.as_deref(), Some("semi-skimmed"));
    }

    #[test]
    fn test_blank_description_is_absent() {
        let input = TaskInput::parse("Walk", Some("    ")).unwrap();
        assert!(input.description.is_none());
    }
}
