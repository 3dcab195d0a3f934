//! List view bindings for the shared record types.

use shared::{
    CareerGoal, Expense, ExpenseField, GoalField, LooseNumber, MoodEntry, MoodField, Priority, RecordId, Task,
    TaskField,
};

use super::formatting::parse_datetime;
use super::list_view::{ListRecord, SortKey};

fn date_key(value: Option<&str>) -> SortKey {
    SortKey::Date(value.and_then(parse_datetime))
}

fn text_key(value: Option<&str>) -> SortKey {
    SortKey::Text(value.unwrap_or_default().to_string())
}

fn priority_key(value: Option<&str>) -> SortKey {
    let rank = value
        .and_then(|label| label.parse::<Priority>().ok())
        .map(|priority| priority.rank() as f64)
        .unwrap_or(f64::NAN);
    SortKey::Number(rank)
}

impl ListRecord for Expense {
    type Field = ExpenseField;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str()];
        fields.extend(self.category.as_deref());
        fields
    }

    fn amount(&self) -> f64 {
        self.amount.as_ref().map(LooseNumber::value).unwrap_or(f64::NAN)
    }

    fn sort_key(&self, field: ExpenseField) -> SortKey {
        match field {
            ExpenseField::Date => date_key(self.date.as_deref()),
            ExpenseField::Amount => SortKey::Number(ListRecord::amount(self)),
            ExpenseField::Description => SortKey::Text(self.description.clone()),
            ExpenseField::Category => text_key(self.category.as_deref()),
        }
    }
}

impl ListRecord for Task {
    type Field = TaskField;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.category.as_deref());
        fields
    }

    /// Tasks are summed by estimated effort in minutes
    fn amount(&self) -> f64 {
        self.estimated_minutes.map(f64::from).unwrap_or(0.0)
    }

    fn sort_key(&self, field: TaskField) -> SortKey {
        match field {
            TaskField::Title => SortKey::Text(self.title.clone()),
            TaskField::DueDate => date_key(self.due_date.as_deref()),
            TaskField::Priority => priority_key(self.priority.as_deref()),
            TaskField::Status => text_key(self.status.as_deref()),
            TaskField::Category => text_key(self.category.as_deref()),
        }
    }
}

impl ListRecord for CareerGoal {
    type Field = GoalField;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.category.as_deref());
        fields
    }

    /// Goals are aggregated by progress, so the average is mean completion
    fn amount(&self) -> f64 {
        self.progress_percentage.as_ref().map(LooseNumber::value).unwrap_or(0.0)
    }

    fn sort_key(&self, field: GoalField) -> SortKey {
        match field {
            GoalField::Title => SortKey::Text(self.title.clone()),
            GoalField::TargetDate => date_key(self.target_date.as_deref()),
            GoalField::Progress => SortKey::Number(ListRecord::amount(self)),
            GoalField::Priority => priority_key(self.priority.as_deref()),
            GoalField::Status => text_key(self.status.as_deref()),
        }
    }
}

impl ListRecord for MoodEntry {
    type Field = MoodField;

    fn record_id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        self.mood_label.as_deref()
    }

    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        fields.extend(self.mood_label.as_deref());
        fields.extend(self.notes.as_deref());
        fields
    }

    fn amount(&self) -> f64 {
        f64::from(self.mood_score)
    }

    fn sort_key(&self, field: MoodField) -> SortKey {
        match field {
            MoodField::Date => date_key(self.date.as_deref()),
            MoodField::Score => SortKey::Number(f64::from(self.mood_score)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::list_view::apply_view;
    use shared::{CategoryFilter, SortOrder, ViewParams};

    fn create_test_task(id: i64, title: &str, priority: Option<&str>, due_date: Option<&str>) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            priority: priority.map(str::to_string),
            status: Some("pending".to_string()),
            due_date: due_date.map(str::to_string),
            category: Some("work".to_string()),
            estimated_minutes: Some(30),
            completed_at: None,
        }
    }

    #[test]
    fn test_expense_without_amount_reads_as_nan() {
        let expense: Expense = serde_json::from_str(r#"{"id": 9, "description": "gift"}"#).unwrap();

        assert!(ListRecord::amount(&expense).is_nan());
        assert_eq!(expense.searchable_text(), vec!["gift"]);
        assert_eq!(expense.sort_key(ExpenseField::Category), SortKey::Text(String::new()));
    }

    #[test]
    fn test_tasks_sort_by_priority_rank() {
        let tasks = vec![
            create_test_task(1, "Write report", Some("low"), None),
            create_test_task(2, "Fix outage", Some("urgent"), None),
            create_test_task(3, "Plan sprint", Some("someday"), None),
            create_test_task(4, "Review PR", Some("High"), None),
        ];
        let params = ViewParams::new(TaskField::Priority, SortOrder::Descending);

        let view = apply_view(&tasks, &params);
        let ids: Vec<i64> = view.records.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![2, 4, 1, 3]);
        assert_eq!(view.total, 120.0);
    }

    #[test]
    fn test_tasks_without_due_date_sort_last() {
        let tasks = vec![
            create_test_task(1, "No deadline", None, None),
            create_test_task(2, "Later", None, Some("2024-03-10")),
            create_test_task(3, "Sooner", None, Some("2024-03-01T09:00:00")),
        ];
        let params = ViewParams::new(TaskField::DueDate, SortOrder::Ascending);

        let ids: Vec<i64> = apply_view(&tasks, &params).records.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_task_search_covers_title() {
        let tasks = vec![
            create_test_task(1, "Write report", None, None),
            create_test_task(2, "Plan sprint", None, None),
        ];
        let mut params = ViewParams::new(TaskField::Title, SortOrder::Ascending);
        params.search_term = "sprint".to_string();
        params.filter = CategoryFilter::Only("work".to_string());

        let ids: Vec<i64> = apply_view(&tasks, &params).records.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_goal_average_is_mean_progress() {
        let goals: Vec<CareerGoal> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "AWS cert", "category": "certification", "progress_percentage": 40},
                {"id": 2, "title": "Lead a team", "category": "leadership", "progress_percentage": "80"}
            ]"#,
        )
        .unwrap();
        let params = ViewParams::new(GoalField::Progress, SortOrder::Descending);

        let view = apply_view(&goals, &params);

        assert_eq!(view.records[0].id, 2);
        assert_eq!(view.average, 60.0);
    }

    #[test]
    fn test_mood_entries_filter_by_label() {
        let moods: Vec<MoodEntry> = serde_json::from_str(
            r#"[
                {"id": 1, "mood_score": 8, "mood_label": "happy", "date": "2024-05-01"},
                {"id": 2, "mood_score": 3, "mood_label": "anxious", "notes": "exam week", "date": "2024-05-02"},
                {"id": 3, "mood_score": 7, "mood_label": "happy", "date": "2024-05-03"}
            ]"#,
        )
        .unwrap();
        let mut params = ViewParams::new(MoodField::Date, SortOrder::Descending);
        params.filter = CategoryFilter::Only("happy".to_string());

        let view = apply_view(&moods, &params);

        assert_eq!(view.records.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(view.average, 7.5);
    }
}
