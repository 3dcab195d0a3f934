//! Badge styles for task status, goal status and priority labels.
//!
//! Labels arrive from the API as free strings. They are parsed into closed
//! enumerations first, and every known variant has an explicit style. Anything
//! else lands in the `Unknown` arm, which keeps the original label for display
//! and uses neutral gray colours.

use serde::Serialize;
use shared::{GoalStatus, Priority, TaskStatus};
use std::str::FromStr;

/// Text and colours for a status or priority badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleDescriptor {
    pub text: String,
    pub color: &'static str,
    pub background_color: &'static str,
    pub border_color: &'static str,
}

impl StyleDescriptor {
    fn new(text: &str, color: &'static str, background_color: &'static str, border_color: &'static str) -> Self {
        Self {
            text: text.to_string(),
            color,
            background_color,
            border_color,
        }
    }

    fn neutral(text: &str) -> Self {
        Self::new(text, "#6b7280", "#f3f4f6", "#d1d5db")
    }
}

/// A parsed label: either one of the known variants or the raw value as sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLabel<T> {
    Known(T),
    Unknown(Option<String>),
}

impl<T: FromStr> StatusLabel<T> {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|label| !label.is_empty()) {
            Some(label) => match label.parse::<T>() {
                Ok(known) => StatusLabel::Known(known),
                Err(_) => StatusLabel::Unknown(Some(label.to_string())),
            },
            None => StatusLabel::Unknown(None),
        }
    }
}

fn unknown_style(original: &Option<String>) -> StyleDescriptor {
    StyleDescriptor::neutral(original.as_deref().unwrap_or("Unknown"))
}

pub fn task_status_style(label: &StatusLabel<TaskStatus>) -> StyleDescriptor {
    match label {
        StatusLabel::Known(TaskStatus::Pending) => StyleDescriptor::new("Pending", "#92400e", "#fef3c7", "#fcd34d"),
        StatusLabel::Known(TaskStatus::InProgress) => {
            StyleDescriptor::new("In Progress", "#1e40af", "#dbeafe", "#93c5fd")
        }
        StatusLabel::Known(TaskStatus::Completed) => StyleDescriptor::new("Completed", "#166534", "#dcfce7", "#86efac"),
        StatusLabel::Known(TaskStatus::Cancelled) => StyleDescriptor::new("Cancelled", "#991b1b", "#fee2e2", "#fca5a5"),
        StatusLabel::Known(TaskStatus::OnHold) => StyleDescriptor::new("On Hold", "#6b21a8", "#f3e8ff", "#d8b4fe"),
        StatusLabel::Unknown(original) => unknown_style(original),
    }
}

pub fn goal_status_style(label: &StatusLabel<GoalStatus>) -> StyleDescriptor {
    match label {
        StatusLabel::Known(GoalStatus::Active) => StyleDescriptor::new("Active", "#1e40af", "#dbeafe", "#93c5fd"),
        StatusLabel::Known(GoalStatus::Completed) => StyleDescriptor::new("Completed", "#166534", "#dcfce7", "#86efac"),
        StatusLabel::Known(GoalStatus::Paused) => StyleDescriptor::new("Paused", "#92400e", "#fef3c7", "#fcd34d"),
        StatusLabel::Known(GoalStatus::Cancelled) => StyleDescriptor::new("Cancelled", "#991b1b", "#fee2e2", "#fca5a5"),
        StatusLabel::Unknown(original) => unknown_style(original),
    }
}

pub fn priority_style(label: &StatusLabel<Priority>) -> StyleDescriptor {
    match label {
        StatusLabel::Known(Priority::Low) => StyleDescriptor::new("Low", "#166534", "#dcfce7", "#86efac"),
        StatusLabel::Known(Priority::Medium) => StyleDescriptor::new("Medium", "#92400e", "#fef3c7", "#fcd34d"),
        StatusLabel::Known(Priority::High) => StyleDescriptor::new("High", "#9a3412", "#ffedd5", "#fdba74"),
        StatusLabel::Known(Priority::Urgent) => StyleDescriptor::new("Urgent", "#991b1b", "#fee2e2", "#fca5a5"),
        StatusLabel::Unknown(original) => unknown_style(original),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_task_status() {
        let style = task_status_style(&StatusLabel::parse(Some("in_progress")));

        assert_eq!(style.text, "In Progress");
        assert_eq!(style.color, "#1e40af");
    }

    #[test]
    fn test_unknown_status_keeps_original_label() {
        let label = StatusLabel::<TaskStatus>::parse(Some("blocked"));
        assert_eq!(label, StatusLabel::Unknown(Some("blocked".to_string())));

        let style = task_status_style(&label);
        assert_eq!(style.text, "blocked");
        assert_eq!(style.background_color, "#f3f4f6");
    }

    #[test]
    fn test_missing_label_renders_unknown() {
        assert_eq!(priority_style(&StatusLabel::parse(None)).text, "Unknown");
        assert_eq!(goal_status_style(&StatusLabel::parse(Some("  "))).text, "Unknown");
    }

    #[test]
    fn test_every_known_priority_has_distinct_colour() {
        let colours: Vec<&str> = Priority::ALL
            .iter()
            .map(|priority| priority_style(&StatusLabel::Known(*priority)).background_color)
            .collect();

        let mut unique = colours.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), colours.len());
    }

    #[test]
    fn test_goal_status_parsing_is_case_insensitive() {
        let style = goal_status_style(&StatusLabel::parse(Some("PAUSED")));
        assert_eq!(style.text, "Paused");
    }
}
