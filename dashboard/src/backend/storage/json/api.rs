//! File-backed implementation of [`DashboardApi`].
//!
//! Each collection lives in its own JSON array inside the data directory.
//! Writes are serialized through an async mutex so two concurrent creates
//! never hand out the same id.

use async_trait::async_trait;
use chrono::{Local, Utc};
use log::{info, warn};
use shared::{
    AssistantInteraction, AssistantMessageRequest, Budget, CareerGoal, CreateExpenseRequest, CreateTaskRequest,
    Expense, LooseNumber, MiniAssistant, MoodEntry, MoodSubmission, RecordId, Task, TaskStatus,
};
use std::path::Path;
use tokio::sync::Mutex;

use super::connection::JsonConnection;
use crate::backend::domain::quick_expense::{is_add_expense, parse_quick_expense};
use crate::backend::storage::{ApiError, DashboardApi};

pub const EXPENSES_FILE: &str = "expenses.json";
pub const TASKS_FILE: &str = "tasks.json";
pub const GOALS_FILE: &str = "career_goals.json";
pub const MOODS_FILE: &str = "mood_logs.json";
pub const BUDGETS_FILE: &str = "budgets.json";
pub const ASSISTANT_FILE: &str = "assistant.json";
pub const INTERACTIONS_FILE: &str = "assistant_interactions.json";

const GREETINGS: [&str; 8] = ["hi", "hello", "hey", "yo", "hiya", "sup", "hey there", "hi there"];

pub struct JsonFileApi {
    connection: JsonConnection,
    write_lock: Mutex<()>,
}

impl JsonFileApi {
    pub fn new<P: AsRef<Path>>(data_directory: P) -> Result<Self, ApiError> {
        Ok(Self {
            connection: JsonConnection::new(data_directory)?,
            write_lock: Mutex::new(()),
        })
    }

    pub fn data_directory(&self) -> &Path {
        self.connection.base_directory()
    }

    /// Configure (or replace) the mini assistant
    pub async fn save_assistant(&self, assistant: &MiniAssistant) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock().await;
        info!("🤖 Saving assistant profile '{}'", assistant.name);
        self.connection.save_document(ASSISTANT_FILE, assistant)
    }

    pub async fn list_interactions(&self) -> Result<Vec<AssistantInteraction>, ApiError> {
        self.connection.load_collection(INTERACTIONS_FILE)
    }

    pub async fn save_budgets(&self, budgets: &[Budget]) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock().await;
        self.connection.save_collection(BUDGETS_FILE, budgets)
    }

    pub async fn save_goals(&self, goals: &[CareerGoal]) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock().await;
        self.connection.save_collection(GOALS_FILE, goals)
    }

    fn insert_expense(&self, request: &CreateExpenseRequest) -> Result<Expense, ApiError> {
        let mut expenses: Vec<Expense> = self.connection.load_collection(EXPENSES_FILE)?;
        let expense = Expense {
            id: next_id(expenses.iter().map(|e| e.id)),
            amount: Some(LooseNumber::Number(request.amount)),
            description: request.description.clone(),
            category: Some(request.category.clone()),
            subcategory: request.subcategory.clone(),
            date: Some(request.date.clone().unwrap_or_else(today)),
            payment_method: request.payment_method.clone(),
            merchant: None,
            is_recurring: request.is_recurring,
            recurring_frequency: request.recurring_frequency.clone(),
            notes: request.notes.clone(),
        };
        expenses.push(expense.clone());
        self.connection.save_collection(EXPENSES_FILE, &expenses)?;

        info!("✅ Stored expense {} ({})", expense.id, expense.description);
        Ok(expense)
    }

    fn reply_to(&self, assistant: &MiniAssistant, content: &str) -> Result<String, ApiError> {
        if is_add_expense(content) {
            let parsed = parse_quick_expense(content);
            let (Some(amount), Some(category), Some(description)) = (parsed.amount, parsed.category, parsed.description)
            else {
                return Ok("Sure, I can add an expense. Please tell me the amount, category and a short description, \
                           for example: I spent 250 on groceries for milk and veggies"
                    .to_string());
            };
            if amount <= 0.0 {
                return Err(ApiError::Validation("Amount must be greater than 0".to_string()));
            }

            let expense = self.insert_expense(&CreateExpenseRequest {
                amount,
                description,
                category: category.clone(),
                subcategory: None,
                date: None,
                payment_method: None,
                is_recurring: false,
                recurring_frequency: None,
                notes: None,
            })?;
            return Ok(format!(
                "Added expense: {:.2} in '{}' ({}).",
                amount, category, expense.description
            ));
        }

        if is_greeting(content) {
            return Ok(format!(
                "Hey there! I'm {}, your {} assistant. I can log expenses, moods and tasks for you.",
                assistant.name, assistant.personality
            ));
        }

        Ok(assistant
            .greeting_message
            .clone()
            .unwrap_or_else(|| format!("{} noted: {}", assistant.name, content)))
    }
}

fn next_id(ids: impl Iterator<Item = RecordId>) -> RecordId {
    ids.max().unwrap_or(0) + 1
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn is_greeting(text: &str) -> bool {
    let normalized: String = text
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '!' | '?'))
        .collect();
    if normalized.is_empty() || normalized.len() > 30 || normalized.split_whitespace().count() > 6 {
        return false;
    }
    GREETINGS
        .iter()
        .any(|greeting| normalized == *greeting || normalized.starts_with(&format!("{} ", greeting)))
}

fn not_found(kind: &str, id: RecordId) -> ApiError {
    ApiError::NotFound(format!("{} {} not found", kind, id))
}

#[async_trait]
impl DashboardApi for JsonFileApi {
    async fn list_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        self.connection.load_collection(EXPENSES_FILE)
    }

    async fn create_expense(&self, request: &CreateExpenseRequest) -> Result<Expense, ApiError> {
        let _guard = self.write_lock.lock().await;
        self.insert_expense(request)
    }

    async fn update_expense(&self, expense: &Expense) -> Result<Expense, ApiError> {
        let _guard = self.write_lock.lock().await;
        let mut expenses: Vec<Expense> = self.connection.load_collection(EXPENSES_FILE)?;
        let slot = expenses
            .iter_mut()
            .find(|existing| existing.id == expense.id)
            .ok_or_else(|| not_found("Expense", expense.id))?;
        *slot = expense.clone();
        self.connection.save_collection(EXPENSES_FILE, &expenses)?;
        Ok(expense.clone())
    }

    async fn delete_expense(&self, id: RecordId) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock().await;
        let mut expenses: Vec<Expense> = self.connection.load_collection(EXPENSES_FILE)?;
        let before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        if expenses.len() == before {
            warn!("⚠️ Expense {} not found for delete", id);
            return Err(not_found("Expense", id));
        }
        self.connection.save_collection(EXPENSES_FILE, &expenses)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.connection.load_collection(TASKS_FILE)
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ApiError> {
        let _guard = self.write_lock.lock().await;
        let mut tasks: Vec<Task> = self.connection.load_collection(TASKS_FILE)?;
        let task = Task {
            id: next_id(tasks.iter().map(|t| t.id)),
            title: request.title.clone(),
            description: request.description.clone(),
            priority: Some(request.priority.label().to_string()),
            status: Some(TaskStatus::Pending.label().to_string()),
            due_date: request.due_date.clone(),
            category: request.category.clone(),
            estimated_minutes: request.estimated_minutes,
            completed_at: None,
        };
        tasks.push(task.clone());
        self.connection.save_collection(TASKS_FILE, &tasks)?;
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, ApiError> {
        let _guard = self.write_lock.lock().await;
        let mut tasks: Vec<Task> = self.connection.load_collection(TASKS_FILE)?;
        let slot = tasks
            .iter_mut()
            .find(|existing| existing.id == task.id)
            .ok_or_else(|| not_found("Task", task.id))?;

        let mut updated = task.clone();
        let completed = updated.status.as_deref().and_then(|s| s.parse::<TaskStatus>().ok()) == Some(TaskStatus::Completed);
        if completed && updated.completed_at.is_none() {
            updated.completed_at = Some(Utc::now().to_rfc3339());
        }
        *slot = updated.clone();
        self.connection.save_collection(TASKS_FILE, &tasks)?;
        Ok(updated)
    }

    async fn delete_task(&self, id: RecordId) -> Result<(), ApiError> {
        let _guard = self.write_lock.lock().await;
        let mut tasks: Vec<Task> = self.connection.load_collection(TASKS_FILE)?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(not_found("Task", id));
        }
        self.connection.save_collection(TASKS_FILE, &tasks)
    }

    async fn list_goals(&self) -> Result<Vec<CareerGoal>, ApiError> {
        self.connection.load_collection(GOALS_FILE)
    }

    async fn list_moods(&self) -> Result<Vec<MoodEntry>, ApiError> {
        self.connection.load_collection(MOODS_FILE)
    }

    async fn submit_mood(&self, submission: &MoodSubmission) -> Result<MoodEntry, ApiError> {
        if !(1..=10).contains(&submission.mood_score) {
            return Err(ApiError::Validation("Mood score must be between 1 and 10".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let mut moods: Vec<MoodEntry> = self.connection.load_collection(MOODS_FILE)?;
        let entry = MoodEntry {
            id: next_id(moods.iter().map(|m| m.id)),
            mood_score: submission.mood_score,
            mood_label: submission.mood_label.clone(),
            energy_level: submission.energy_level,
            stress_level: submission.stress_level,
            sleep_hours: submission.sleep_hours,
            exercise_minutes: submission.exercise_minutes,
            notes: submission.notes.clone(),
            date: Some(Utc::now().to_rfc3339()),
        };
        moods.push(entry.clone());
        self.connection.save_collection(MOODS_FILE, &moods)?;
        Ok(entry)
    }

    async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
        self.connection.load_collection(BUDGETS_FILE)
    }

    async fn get_assistant(&self) -> Result<Option<MiniAssistant>, ApiError> {
        self.connection.load_document(ASSISTANT_FILE)
    }

    async fn send_assistant_message(
        &self,
        request: &AssistantMessageRequest,
    ) -> Result<AssistantInteraction, ApiError> {
        let assistant = self
            .connection
            .load_document::<MiniAssistant>(ASSISTANT_FILE)?
            .ok_or_else(|| ApiError::NotFound("Mini assistant not configured".to_string()))?;

        let _guard = self.write_lock.lock().await;
        let reply_content = self.reply_to(&assistant, &request.content)?;

        let mut interactions: Vec<AssistantInteraction> = self.connection.load_collection(INTERACTIONS_FILE)?;
        let now = Utc::now().to_rfc3339();
        let user_id = next_id(interactions.iter().map(|i| i.id));
        interactions.push(AssistantInteraction {
            id: user_id,
            interaction_type: "user".to_string(),
            content: request.content.clone(),
            is_read: true,
            created_at: Some(now.clone()),
        });
        let reply = AssistantInteraction {
            id: user_id + 1,
            interaction_type: "reply".to_string(),
            content: reply_content,
            is_read: false,
            created_at: Some(now),
        };
        interactions.push(reply.clone());
        self.connection.save_collection(INTERACTIONS_FILE, &interactions)?;

        Ok(reply)
    }
}
