//! # Storage Traits
//!
//! The dashboard never talks to the network directly. Every fetch and mutation
//! goes through [`DashboardApi`], so the remote REST service, the local JSON
//! data directory and test doubles are interchangeable.

use async_trait::async_trait;
use shared::{
    AssistantInteraction, AssistantMessageRequest, Budget, CareerGoal, CreateExpenseRequest, CreateTaskRequest,
    Expense, MiniAssistant, MoodEntry, MoodSubmission, RecordId, Task,
};
use thiserror::Error;

/// Shown when a failure carries no message meant for the user
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Failure of a fetch or mutation request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {status}")]
    Server { status: u16, message: Option<String> },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Message for the notification surface: the server's own message when
    /// it sent one, otherwise a generic fallback
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message: Some(message), .. } if !message.trim().is_empty() => message.clone(),
            ApiError::NotFound(message) | ApiError::Validation(message) => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(error: std::io::Error) -> Self {
        ApiError::Storage(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Storage(error.to_string())
    }
}

/// Trait defining the remote collections the dashboard reads and mutates
///
/// Each `list_*` call returns a full snapshot of the collection. Mutations
/// return the record as stored by the API.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_expenses(&self) -> Result<Vec<Expense>, ApiError>;

    async fn create_expense(&self, request: &CreateExpenseRequest) -> Result<Expense, ApiError>;

    async fn update_expense(&self, expense: &Expense) -> Result<Expense, ApiError>;

    async fn delete_expense(&self, id: RecordId) -> Result<(), ApiError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ApiError>;

    async fn update_task(&self, task: &Task) -> Result<Task, ApiError>;

    async fn delete_task(&self, id: RecordId) -> Result<(), ApiError>;

    async fn list_goals(&self) -> Result<Vec<CareerGoal>, ApiError>;

    async fn list_moods(&self) -> Result<Vec<MoodEntry>, ApiError>;

    async fn submit_mood(&self, submission: &MoodSubmission) -> Result<MoodEntry, ApiError>;

    async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError>;

    /// The configured assistant, or `None` when the user has not set one up
    async fn get_assistant(&self) -> Result<Option<MiniAssistant>, ApiError>;

    /// Send a chat message; returns the assistant's reply
    async fn send_assistant_message(&self, request: &AssistantMessageRequest)
        -> Result<AssistantInteraction, ApiError>;
}
