// Status filtering for task snapshots

use crate::models::Task;
use eyre::{Result, eyre};
use std::str::FromStr;

/// Which tasks a view should show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterOption {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterOption {
    /// Whether a task passes this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterOption::All => true,
            FilterOption::Active => !task.completed,
            FilterOption::Completed => task.completed,
        }
    }
}

/// Project `tasks` through `option`, keeping collection order
pub fn filter(tasks: &[Task], option: FilterOption) -> Vec<&Task> {
    tasks.iter().filter(|task| option.matches(task)).collect()
}

impl std::fmt::Display for FilterOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOption::All => write!(f, "All"),
            FilterOption::Active => write!(f, "Active"),
            FilterOption::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for FilterOption {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterOption::All),
            "active" => Ok(FilterOption::Active),
            "completed" | "done" => Ok(FilterOption::Completed),
            other => Err(eyre!("Unknown filter: {} (expected all, active or completed)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            completed,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_filter_all_keeps_order() {
        let tasks = vec![task("c", true), task("b", false), task("a", true)];
        assert_eq!(ids(&filter(&tasks, FilterOption::All)), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_filter_active_and_completed() {
        let tasks = vec![task("c", true), task("b", false), task("a", true), task("z", false)];
        assert_eq!(ids(&filter(&tasks, FilterOption::Active)), vec!["b", "z"]);
        assert_eq!(ids(&filter(&tasks, FilterOption::Completed)), vec!["c", "a"]);
    }

    #[test]
    fn test_active_and_completed_partition() {
        let tasks = vec![task("1", false), task("2", true), task("3", true), task("4", false)];
        let active = filter(&tasks, FilterOption::Active);
        let completed = filter(&tasks, FilterOption::Completed);

        assert_eq!(active.len() + completed.len(), tasks.len());
        for t in &tasks {
            let in_active = active.iter().any(|a| a.id == t.id);
            let in_completed = completed.iter().any(|c| c.id == t.id);
            assert!(in_active ^ in_completed, "task {} must be in exactly one side", t.id);
        }
    }

    #[test]
    fn test_filter_empty() {
        assert!(filter(&[], FilterOption::Completed).is_empty());
    }

    #[test]
    fn test_filter_option_parse_and_display() {
        assert_eq!("Active".parse::<FilterOption>().unwrap(), FilterOption::Active);
        assert_eq!(" completed ".parse::<FilterOption>().unwrap(), FilterOption::Completed);
        assert_eq!("all".parse::<FilterOption>().unwrap(), FilterOption::All);
        assert!("pending".parse::<FilterOption>().is_err());

        assert_eq!(FilterOption::Completed.to_string(), "Completed");
        assert_eq!(FilterOption::default(), FilterOption::All);
    }
}
