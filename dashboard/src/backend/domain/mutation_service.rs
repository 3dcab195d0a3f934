//! Mutation service.
//!
//! Forwards the create, update and delete requests raised by the list views
//! and widgets to a [`DashboardApi`]. Payloads are validated here before they
//! leave the process. The service never touches cached snapshots: the caller
//! decides whether to refetch or seed the cache from the returned record.

use std::sync::Arc;

use log::{error, info, warn};
use shared::{
    AssistantInteraction, AssistantMessageRequest, CreateExpenseRequest, CreateTaskRequest, Expense, MoodEntry,
    MoodSubmission, RecordId, Task,
};

use super::mood_service::validate_mood_submission;
use crate::backend::storage::{ApiError, DashboardApi};

pub struct MutationService<A: DashboardApi> {
    api: Arc<A>,
}

impl<A: DashboardApi> Clone for MutationService<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api) }
    }
}

impl<A: DashboardApi> MutationService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn create_expense(&self, request: &CreateExpenseRequest) -> Result<Expense, ApiError> {
        if request.description.trim().is_empty() {
            return Err(ApiError::Validation("Please enter a description".to_string()));
        }
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(ApiError::Validation("Amount must be greater than 0".to_string()));
        }

        info!("💸 MUTATION: Creating expense '{}' ({})", request.description, request.amount);
        log_outcome("create expense", self.api.create_expense(request).await)
    }

    pub async fn update_expense(&self, expense: &Expense) -> Result<Expense, ApiError> {
        info!("✏️ MUTATION: Updating expense {}", expense.id);
        log_outcome("update expense", self.api.update_expense(expense).await)
    }

    pub async fn delete_expense(&self, id: RecordId) -> Result<(), ApiError> {
        info!("🗑️ MUTATION: Deleting expense {}", id);
        log_outcome("delete expense", self.api.delete_expense(id).await)
    }

    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ApiError> {
        if request.title.trim().is_empty() {
            return Err(ApiError::Validation("Please enter a title".to_string()));
        }

        info!("📝 MUTATION: Creating task '{}'", request.title);
        log_outcome("create task", self.api.create_task(request).await)
    }

    pub async fn update_task(&self, task: &Task) -> Result<Task, ApiError> {
        info!("✏️ MUTATION: Updating task {}", task.id);
        log_outcome("update task", self.api.update_task(task).await)
    }

    pub async fn delete_task(&self, id: RecordId) -> Result<(), ApiError> {
        info!("🗑️ MUTATION: Deleting task {}", id);
        log_outcome("delete task", self.api.delete_task(id).await)
    }

    pub async fn submit_mood(&self, submission: &MoodSubmission) -> Result<MoodEntry, ApiError> {
        if let Some(problem) = validate_mood_submission(submission).first() {
            warn!("⚠️ MUTATION: Rejected mood check-in: {}", problem.message());
            return Err(ApiError::Validation(problem.message()));
        }

        info!("😊 MUTATION: Submitting mood check-in (score {})", submission.mood_score);
        log_outcome("submit mood", self.api.submit_mood(submission).await)
    }

    pub async fn send_assistant_message(&self, content: &str) -> Result<AssistantInteraction, ApiError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ApiError::Validation("Type a message first".to_string()));
        }

        info!("💬 MUTATION: Sending assistant message ({} chars)", content.len());
        let request = AssistantMessageRequest {
            content: content.to_string(),
        };
        log_outcome("send assistant message", self.api.send_assistant_message(&request).await)
    }
}

fn log_outcome<T>(action: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    match &result {
        Ok(_) => info!("✅ MUTATION: {} succeeded", action),
        Err(e) => error!("❌ MUTATION: {} failed: {}", action, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::json::test_utils::TestEnvironment;
    use shared::Priority;

    fn lunch_request() -> CreateExpenseRequest {
        CreateExpenseRequest {
            amount: 120.0,
            description: "Lunch".to_string(),
            category: "food".to_string(),
            subcategory: None,
            date: Some("2024-05-01".to_string()),
            payment_method: Some("upi".to_string()),
            is_recurring: false,
            recurring_frequency: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_delete_expense() {
        let env = TestEnvironment::new();
        let service = MutationService::new(env.api.clone());

        let created = service.create_expense(&lunch_request()).await.unwrap();
        assert_eq!(env.api.list_expenses().await.unwrap().len(), 1);

        service.delete_expense(created.id).await.unwrap();
        assert!(env.api.list_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_payloads_never_reach_the_api() {
        let env = TestEnvironment::new();
        let service = MutationService::new(env.api.clone());

        let mut request = lunch_request();
        request.amount = 0.0;
        let error = service.create_expense(&request).await.unwrap_err();
        assert_eq!(error.user_message(), "Amount must be greater than 0");

        let mood = MoodSubmission {
            mood_score: 12,
            mood_label: None,
            energy_level: None,
            stress_level: None,
            sleep_hours: None,
            exercise_minutes: None,
            notes: None,
        };
        let error = service.submit_mood(&mood).await.unwrap_err();
        assert!(matches!(error, ApiError::Validation(_)));

        assert!(env.api.list_expenses().await.unwrap().is_empty());
        assert!(env.api.list_moods().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_task_round_trip() {
        let env = TestEnvironment::new();
        let service = MutationService::new(env.api.clone());

        let mut task = service
            .create_task(&CreateTaskRequest {
                title: "Submit report".to_string(),
                description: None,
                priority: Priority::High,
                due_date: Some("2024-06-01".to_string()),
                category: Some("work".to_string()),
                estimated_minutes: Some(90),
            })
            .await
            .unwrap();
        assert_eq!(task.priority.as_deref(), Some("high"));

        task.status = Some("completed".to_string());
        let updated = service.update_task(&task).await.unwrap();
        assert_eq!(updated.status.as_deref(), Some("completed"));

        let missing = service.delete_task(task.id + 100).await.unwrap_err();
        assert!(matches!(missing, ApiError::NotFound(_)));
    }
}
