//! Task form validation.

use serde::{Deserialize, Serialize};
use shared::{CreateTaskRequest, Priority, Task};

use super::formatting::parse_datetime;

const MAX_TITLE_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub due_date: String,
    pub category: String,
    pub estimated_minutes: String,
}

impl TaskDraft {
    pub fn empty() -> Self {
        Self {
            priority: Priority::Medium.label().to_string(),
            ..Self::default()
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority.clone().unwrap_or_default(),
            due_date: task.due_date.clone().unwrap_or_default(),
            category: task.category.clone().unwrap_or_default(),
            estimated_minutes: task.estimated_minutes.map(|m| m.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    UnknownPriority(String),
    InvalidDueDate(String),
    InvalidEstimate(String),
}

impl TaskValidationError {
    pub fn message(&self) -> String {
        match self {
            TaskValidationError::EmptyTitle => "Please enter a title".to_string(),
            TaskValidationError::TitleTooLong(len) => {
                format!("Title is too long ({} characters). Maximum is {}.", len, MAX_TITLE_LENGTH)
            }
            TaskValidationError::UnknownPriority(raw) => {
                format!("'{}' is not a priority (low, medium, high or urgent)", raw)
            }
            TaskValidationError::InvalidDueDate(raw) => format!("'{}' is not a valid due date", raw),
            TaskValidationError::InvalidEstimate(raw) => format!("'{}' is not a number of minutes", raw),
        }
    }
}

/// Validate a task draft and build the create request
pub fn task_request_from_draft(draft: &TaskDraft) -> Result<CreateTaskRequest, Vec<TaskValidationError>> {
    let mut errors = Vec::new();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push(TaskValidationError::EmptyTitle);
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        errors.push(TaskValidationError::TitleTooLong(title.chars().count()));
    }

    let priority = match draft.priority.trim() {
        "" => Some(Priority::Medium),
        raw => match raw.parse::<Priority>() {
            Ok(priority) => Some(priority),
            Err(_) => {
                errors.push(TaskValidationError::UnknownPriority(raw.to_string()));
                None
            }
        },
    };

    let due_date = draft.due_date.trim();
    if !due_date.is_empty() && parse_datetime(due_date).is_none() {
        errors.push(TaskValidationError::InvalidDueDate(due_date.to_string()));
    }

    let estimated_minutes = match draft.estimated_minutes.trim() {
        "" => None,
        raw => match raw.parse::<u32>() {
            Ok(minutes) => Some(minutes),
            Err(_) => {
                errors.push(TaskValidationError::InvalidEstimate(raw.to_string()));
                None
            }
        },
    };

    match priority {
        Some(priority) if errors.is_empty() => Ok(CreateTaskRequest {
            title: title.to_string(),
            description: Some(draft.description.trim().to_string()).filter(|d| !d.is_empty()),
            priority,
            due_date: Some(due_date.to_string()).filter(|d| !d.is_empty()),
            category: Some(draft.category.trim().to_string()).filter(|c| !c.is_empty()),
            estimated_minutes,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_draft_defaults_to_medium_priority() {
        let draft = TaskDraft {
            title: "Prepare slides".to_string(),
            priority: String::new(),
            ..TaskDraft::empty()
        };

        let request = task_request_from_draft(&draft).unwrap();

        assert_eq!(request.priority, Priority::Medium);
        assert_eq!(request.description, None);
        assert_eq!(request.due_date, None);
    }

    #[test]
    fn test_all_errors_are_collected() {
        let draft = TaskDraft {
            title: "   ".to_string(),
            description: String::new(),
            priority: "asap".to_string(),
            due_date: "tomorrow".to_string(),
            category: String::new(),
            estimated_minutes: "half an hour".to_string(),
        };

        let errors = task_request_from_draft(&draft).unwrap_err();

        assert_eq!(
            errors,
            vec![
                TaskValidationError::EmptyTitle,
                TaskValidationError::UnknownPriority("asap".to_string()),
                TaskValidationError::InvalidDueDate("tomorrow".to_string()),
                TaskValidationError::InvalidEstimate("half an hour".to_string()),
            ]
        );
        assert_eq!(errors[0].message(), "Please enter a title");
    }

    #[test]
    fn test_draft_from_existing_task() {
        let task: Task = serde_json::from_str(
            r#"{"id": 4, "title": "Review PR", "priority": "high", "due_date": "2024-06-01", "estimated_minutes": 45}"#,
        )
        .unwrap();

        let draft = TaskDraft::from_task(&task);
        let request = task_request_from_draft(&draft).unwrap();

        assert_eq!(draft.estimated_minutes, "45");
        assert_eq!(request.priority, Priority::High);
        assert_eq!(request.estimated_minutes, Some(45));
    }
}
