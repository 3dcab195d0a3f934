//! # Task List State
//!
//! Same browse/edit discipline as the expenses screen, plus a one-click
//! "mark complete" toggle on each row.

use shared::{CreateTaskRequest, RecordId, Task, TaskField, TaskStatus, ViewParams};

use super::list_view_state::{ListViewState, SubmitOutcome, ViewMode};
use super::notifications::NotificationQueue;
use super::resource_cache::Snapshot;
use crate::backend::domain::{task_request_from_draft, ListView, MemoizedView, TaskDraft};

pub trait TaskCallbacks {
    fn on_add_task(&mut self, request: &CreateTaskRequest);
    fn on_edit_task(&mut self, task: &Task);
    fn on_delete_task(&mut self, id: RecordId);
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskCommand {
    Create(CreateTaskRequest),
    Update(Task),
    Delete(RecordId),
}

#[derive(Debug, Default)]
pub struct TaskCommandQueue {
    commands: Vec<TaskCommand>,
}

impl TaskCommandQueue {
    pub fn drain(&mut self) -> Vec<TaskCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl TaskCallbacks for TaskCommandQueue {
    fn on_add_task(&mut self, request: &CreateTaskRequest) {
        self.commands.push(TaskCommand::Create(request.clone()));
    }

    fn on_edit_task(&mut self, task: &Task) {
        self.commands.push(TaskCommand::Update(task.clone()));
    }

    fn on_delete_task(&mut self, id: RecordId) {
        self.commands.push(TaskCommand::Delete(id));
    }
}

pub struct TaskListView<C: TaskCallbacks> {
    state: ListViewState<Task>,
    memo: MemoizedView<TaskField>,
    draft: TaskDraft,
    form_errors: Vec<String>,
    callbacks: C,
}

impl<C: TaskCallbacks> TaskListView<C> {
    pub fn new(params: ViewParams<TaskField>, callbacks: C) -> Self {
        Self {
            state: ListViewState::new(params),
            memo: MemoizedView::new(),
            draft: TaskDraft::empty(),
            form_errors: Vec::new(),
            callbacks,
        }
    }

    pub fn state(&self) -> &ListViewState<Task> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ListViewState<Task> {
        &mut self.state
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    pub fn visible<'a>(&mut self, snapshot: &'a Snapshot<Vec<Task>>) -> ListView<'a, Task> {
        self.memo.view(&snapshot.data, snapshot.revision, self.state.params())
    }

    pub fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    pub fn form_errors(&self) -> &[String] {
        &self.form_errors
    }

    pub fn open_create(&mut self) {
        self.state.open_create();
        self.draft = TaskDraft::empty();
        self.form_errors.clear();
    }

    pub fn open_edit(&mut self, task: &Task) {
        self.state.open_edit(task.id);
        self.draft = TaskDraft::from_task(task);
        self.form_errors.clear();
    }

    pub fn close(&mut self) {
        if self.state.close() {
            self.draft = TaskDraft::empty();
            self.form_errors.clear();
        }
    }

    pub fn submit(&mut self, tasks: &[Task]) -> bool {
        if !self.state.can_submit() {
            return false;
        }

        let request = match task_request_from_draft(&self.draft) {
            Ok(request) => request,
            Err(errors) => {
                self.form_errors = errors.iter().map(|e| e.message()).collect();
                return false;
            }
        };

        match self.state.mode() {
            ViewMode::Browse => return false,
            ViewMode::Create => self.callbacks.on_add_task(&request),
            ViewMode::Edit(id) => {
                let Some(original) = tasks.iter().find(|task| task.id == id) else {
                    self.form_errors = vec![format!("Task {} no longer exists", id)];
                    return false;
                };
                let mut updated = original.clone();
                updated.title = request.title;
                updated.description = request.description;
                updated.priority = Some(request.priority.label().to_string());
                updated.due_date = request.due_date;
                updated.category = request.category;
                updated.estimated_minutes = request.estimated_minutes;
                self.callbacks.on_edit_task(&updated);
            }
        }

        self.form_errors.clear();
        self.state.begin_submit();
        true
    }

    /// Flip a task between completed and pending
    pub fn toggle_complete(&mut self, task: &Task) -> bool {
        if !self.state.begin_submit() {
            return false;
        }
        let is_completed = task.status.as_deref().and_then(|s| s.parse::<TaskStatus>().ok()) == Some(TaskStatus::Completed);
        let mut updated = task.clone();
        if is_completed {
            updated.status = Some(TaskStatus::Pending.label().to_string());
            updated.completed_at = None;
        } else {
            updated.status = Some(TaskStatus::Completed.label().to_string());
        }
        self.callbacks.on_edit_task(&updated);
        true
    }

    pub fn delete(&mut self, id: RecordId) -> bool {
        if !self.state.begin_submit() {
            return false;
        }
        self.callbacks.on_delete_task(id);
        true
    }

    pub fn finish_submit(&mut self, outcome: SubmitOutcome, notifications: &mut NotificationQueue) {
        let succeeded = matches!(outcome, SubmitOutcome::Succeeded { .. });
        self.state.finish_submit(outcome, notifications);
        if succeeded {
            self.draft = TaskDraft::empty();
        }
    }
}
