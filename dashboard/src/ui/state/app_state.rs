//! # Dashboard State
//!
//! Everything the dashboard screens hold between events, owned by the single
//! UI thread.
//!
//! ## Responsibilities:
//! - Resource cache with the fetched snapshots
//! - Per-screen state (expenses, tasks, goals, mood check-in, assistant)
//! - Toast notifications
//! - Formatter configured from the user's settings

use std::path::PathBuf;

use super::assistant_state::AssistantWidgetState;
use super::expense_state::{ExpenseCommandQueue, ExpenseListView};
use super::goal_state::GoalListView;
use super::mood_state::{MoodFormState, MoodSubmissionQueue};
use super::notifications::NotificationQueue;
use super::resource_cache::ResourceCache;
use super::task_state::{TaskCommandQueue, TaskListView};
use crate::backend::config::DashboardConfig;
use crate::backend::domain::Formatter;

pub struct DashboardState {
    pub cache: ResourceCache,
    pub notifications: NotificationQueue,
    pub expenses: ExpenseListView<ExpenseCommandQueue>,
    pub tasks: TaskListView<TaskCommandQueue>,
    pub goals: GoalListView,
    pub mood_form: MoodFormState<MoodSubmissionQueue>,
    pub assistant: AssistantWidgetState,
    pub formatter: Formatter,
    /// Where CSV exports go; the documents folder when unset
    pub export_directory: Option<PathBuf>,
    /// Path of the most recent successful export
    pub last_export: Option<PathBuf>,
}

impl DashboardState {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let sorts = &config.default_page_sort;
        Self {
            cache: ResourceCache::new(),
            notifications: NotificationQueue::new(),
            expenses: ExpenseListView::new(sorts.expenses.to_params(), ExpenseCommandQueue::default()),
            tasks: TaskListView::new(sorts.tasks.to_params(), TaskCommandQueue::default()),
            goals: GoalListView::new(sorts.goals.to_params()),
            mood_form: MoodFormState::new(MoodSubmissionQueue::default()),
            assistant: AssistantWidgetState::new(),
            formatter: Formatter::with_config(config.format.clone()),
            export_directory: config.export_directory.clone(),
            last_export: None,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}
