//! # App Coordinator Module
//!
//! Drives the dashboard between UI events: fetches collections the cache
//! needs, executes the commands the screens queued through their callbacks,
//! and reports every outcome back to the screen that raised it.
//!
//! ## Application Flow:
//! 1. Screens push commands (create, update, delete, export, mood, chat)
//! 2. `tick()` runs them through the [`MutationService`]
//! 3. Successful mutations seed or invalidate the affected cache entries
//! 4. Invalidated and never-loaded collections are refetched
//! 5. Failures become error notifications; screens keep their drafts

use std::sync::Arc;

use chrono::Local;
use log::{debug, error, info};

use crate::backend::domain::{ExportService, MutationService};
use crate::backend::storage::{ApiError, DashboardApi};
use crate::ui::state::{
    DashboardState, ExpenseCommand, ResourceKey, SubmitOutcome, TaskCommand,
};

pub struct DashboardCoordinator<A: DashboardApi> {
    pub state: DashboardState,
    api: Arc<A>,
    mutations: MutationService<A>,
    export_service: ExportService,
}

fn submit_outcome<T>(result: &Result<T, ApiError>, success: &str) -> SubmitOutcome {
    match result {
        Ok(_) => SubmitOutcome::Succeeded {
            message: Some(success.to_string()),
        },
        Err(e) => SubmitOutcome::Failed {
            message: e.user_message(),
        },
    }
}

impl<A: DashboardApi> DashboardCoordinator<A> {
    pub fn new(api: Arc<A>, state: DashboardState) -> Self {
        Self {
            state,
            mutations: MutationService::new(Arc::clone(&api)),
            api,
            export_service: ExportService::new(),
        }
    }

    /// Run queued commands, then refetch whatever the cache needs
    pub async fn tick(&mut self) {
        self.process_expense_commands().await;
        self.process_task_commands().await;
        self.process_mood_submissions().await;
        self.refresh().await;
    }

    /// Fetch every idle or invalidated collection
    pub async fn refresh(&mut self) {
        for key in self.state.cache.pending_fetches() {
            self.fetch(key).await;
        }
    }

    pub async fn fetch(&mut self, key: ResourceKey) {
        debug!("🔄 FETCH: Loading {:?}", key);
        self.state.cache.begin_loading(key);

        let state = &mut self.state;
        let result = match key {
            ResourceKey::Expenses => self.api.list_expenses().await.map(|data| state.cache.store_expenses(data)),
            ResourceKey::Tasks => self.api.list_tasks().await.map(|data| state.cache.store_tasks(data)),
            ResourceKey::Goals => self.api.list_goals().await.map(|data| state.cache.store_goals(data)),
            ResourceKey::Moods => self.api.list_moods().await.map(|data| state.cache.store_moods(data)),
            ResourceKey::Budgets => self.api.list_budgets().await.map(|data| state.cache.store_budgets(data)),
            ResourceKey::Assistant => self.api.get_assistant().await.map(|assistant| {
                state.assistant.set_assistant(assistant.clone());
                state.cache.store_assistant(assistant);
            }),
        };

        if let Err(e) = result {
            error!("❌ FETCH: Failed to load {:?}: {}", key, e);
            self.state.cache.fail(key, e.user_message());
            self.state.notifications.push_api_error(&e);
        }
    }

    async fn process_expense_commands(&mut self) {
        let commands = self.state.expenses.callbacks_mut().drain();
        for command in commands {
            match command {
                ExpenseCommand::Create(request) => {
                    let result = self.mutations.create_expense(&request).await;
                    if result.is_ok() {
                        self.state.cache.invalidate(ResourceKey::Expenses);
                        self.state.cache.invalidate(ResourceKey::Budgets);
                    }
                    let outcome = submit_outcome(&result, "Expense added");
                    self.state.expenses.finish_submit(outcome, &mut self.state.notifications);
                }
                ExpenseCommand::Update(expense) => {
                    let result = self.mutations.update_expense(&expense).await;
                    let outcome = submit_outcome(&result, "Expense updated");
                    if let Ok(updated) = result {
                        self.state.cache.seed_expense(updated);
                        self.state.cache.invalidate(ResourceKey::Budgets);
                    }
                    self.state.expenses.finish_submit(outcome, &mut self.state.notifications);
                }
                ExpenseCommand::Delete(id) => {
                    let result = self.mutations.delete_expense(id).await;
                    if result.is_ok() {
                        self.state.cache.invalidate(ResourceKey::Expenses);
                        self.state.cache.invalidate(ResourceKey::Budgets);
                    }
                    let outcome = submit_outcome(&result, "Expense deleted");
                    self.state.expenses.finish_submit(outcome, &mut self.state.notifications);
                }
                ExpenseCommand::Export => self.export_visible_expenses(),
            }
        }
    }

    /// Export exactly the rows the expenses screen currently shows
    fn export_visible_expenses(&mut self) {
        let state = &mut self.state;
        let Some(snapshot) = state.cache.expenses.snapshot() else {
            state.notifications.push_error("Expenses are still loading");
            return;
        };

        let view = state.expenses.visible(snapshot);
        let written = self
            .export_service
            .export_expenses_csv(&view, Local::now().date_naive())
            .and_then(|export| {
                self.export_service
                    .write_export(&export, state.export_directory.as_deref())
                    .map(|path| (export.record_count, path))
            });

        match written {
            Ok((count, path)) => {
                info!("✅ EXPORT: {} expenses written to {}", count, path.display());
                state
                    .notifications
                    .push_success(format!("Exported {} expenses to {}", count, path.display()));
                state.last_export = Some(path);
            }
            Err(e) => {
                error!("❌ EXPORT: {:#}", e);
                state.notifications.push_error(format!("Export failed: {}", e));
            }
        }
    }

    async fn process_task_commands(&mut self) {
        let commands = self.state.tasks.callbacks_mut().drain();
        for command in commands {
            let outcome = match command {
                TaskCommand::Create(request) => {
                    let result = self.mutations.create_task(&request).await;
                    if result.is_ok() {
                        self.state.cache.invalidate(ResourceKey::Tasks);
                    }
                    submit_outcome(&result, "Task added")
                }
                TaskCommand::Update(task) => {
                    let result = self.mutations.update_task(&task).await;
                    let outcome = submit_outcome(&result, "Task updated");
                    if let Ok(updated) = result {
                        self.state.cache.seed_task(updated);
                    }
                    outcome
                }
                TaskCommand::Delete(id) => {
                    let result = self.mutations.delete_task(id).await;
                    if result.is_ok() {
                        self.state.cache.invalidate(ResourceKey::Tasks);
                    }
                    submit_outcome(&result, "Task deleted")
                }
            };
            self.state.tasks.finish_submit(outcome, &mut self.state.notifications);
        }
    }

    async fn process_mood_submissions(&mut self) {
        let submissions = self.state.mood_form.callbacks_mut().drain();
        for submission in submissions {
            let result = self.mutations.submit_mood(&submission).await;
            let outcome = submit_outcome(&result, "Mood logged");
            if let Ok(entry) = result {
                self.state.cache.seed_mood(entry);
            }
            self.state.mood_form.finish_submit(outcome, &mut self.state.notifications);
        }
    }

    /// Send the assistant draft, if any, and record the reply
    pub async fn send_assistant_message(&mut self) {
        let Some(message) = self.state.assistant.begin_send() else {
            return;
        };
        let logs_expense = self.state.assistant.quick_expense().is_some();

        let result = self.mutations.send_assistant_message(&message).await;
        if result.is_ok() && logs_expense {
            self.state.cache.invalidate(ResourceKey::Expenses);
            self.state.cache.invalidate(ResourceKey::Budgets);
        }
        self.state.assistant.finish_send(result, &mut self.state.notifications);
    }
}
