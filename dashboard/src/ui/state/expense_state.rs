//! # Expense List State
//!
//! State of the expenses screen: the list view parameters, the memoized
//! filter-sort-aggregate result, and the add/edit dialog draft.
//!
//! ## Purpose:
//! The screen never calls the network. Every persistence action goes out
//! through [`ExpenseCallbacks`]; the pending flag is cleared when the owner
//! reports the outcome back with [`ExpenseListView::finish_submit`].

use shared::{CreateExpenseRequest, Expense, ExpenseField, RecordId, ViewParams};

use super::list_view_state::{ListViewState, SubmitOutcome, ViewMode};
use super::notifications::NotificationQueue;
use super::resource_cache::Snapshot;
use crate::backend::domain::{ExpenseDraft, ExpenseFormService, ListView, MemoizedView};

/// Persistence actions raised by the expenses screen
pub trait ExpenseCallbacks {
    fn on_add_expense(&mut self, request: &CreateExpenseRequest);
    fn on_edit_expense(&mut self, expense: &Expense);
    fn on_delete_expense(&mut self, id: RecordId);
    fn on_export(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseCommand {
    Create(CreateExpenseRequest),
    Update(Expense),
    Delete(RecordId),
    Export,
}

/// Collects callback invocations so an async owner can execute them later
#[derive(Debug, Default)]
pub struct ExpenseCommandQueue {
    commands: Vec<ExpenseCommand>,
}

impl ExpenseCommandQueue {
    pub fn drain(&mut self) -> Vec<ExpenseCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl ExpenseCallbacks for ExpenseCommandQueue {
    fn on_add_expense(&mut self, request: &CreateExpenseRequest) {
        self.commands.push(ExpenseCommand::Create(request.clone()));
    }

    fn on_edit_expense(&mut self, expense: &Expense) {
        self.commands.push(ExpenseCommand::Update(expense.clone()));
    }

    fn on_delete_expense(&mut self, id: RecordId) {
        self.commands.push(ExpenseCommand::Delete(id));
    }

    fn on_export(&mut self) {
        self.commands.push(ExpenseCommand::Export);
    }
}

pub struct ExpenseListView<C: ExpenseCallbacks> {
    state: ListViewState<Expense>,
    memo: MemoizedView<ExpenseField>,
    form: ExpenseFormService,
    draft: ExpenseDraft,
    form_errors: Vec<String>,
    callbacks: C,
}

impl<C: ExpenseCallbacks> ExpenseListView<C> {
    pub fn new(params: ViewParams<ExpenseField>, callbacks: C) -> Self {
        Self {
            state: ListViewState::new(params),
            memo: MemoizedView::new(),
            form: ExpenseFormService::new(),
            draft: ExpenseDraft::empty(),
            form_errors: Vec::new(),
            callbacks,
        }
    }

    pub fn state(&self) -> &ListViewState<Expense> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ListViewState<Expense> {
        &mut self.state
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    /// Visible rows for a snapshot; recomputed only when the snapshot
    /// revision or the view parameters change
    pub fn visible<'a>(&mut self, snapshot: &'a Snapshot<Vec<Expense>>) -> ListView<'a, Expense> {
        self.memo.view(&snapshot.data, snapshot.revision, self.state.params())
    }

    pub fn recomputations(&self) -> u64 {
        self.memo.recomputations()
    }

    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ExpenseDraft {
        &mut self.draft
    }

    pub fn form_errors(&self) -> &[String] {
        &self.form_errors
    }

    pub fn open_create(&mut self) {
        self.state.open_create();
        self.draft = ExpenseDraft::empty();
        self.form_errors.clear();
    }

    pub fn open_edit(&mut self, expense: &Expense) {
        self.state.open_edit(expense.id);
        self.draft = ExpenseDraft::from_expense(expense);
        self.form_errors.clear();
    }

    pub fn close(&mut self) {
        if self.state.close() {
            self.draft = ExpenseDraft::empty();
            self.form_errors.clear();
        }
    }

    /// Validate the draft and raise the matching callback.
    ///
    /// Returns false when nothing was sent: a submit is already pending, the
    /// dialog is closed, or the draft has validation errors.
    pub fn submit(&mut self, expenses: &[Expense]) -> bool {
        if !self.state.can_submit() {
            return false;
        }

        let sent = match self.state.mode() {
            ViewMode::Browse => return false,
            ViewMode::Create => match self.form.to_create_request(&self.draft) {
                Ok(request) => {
                    self.callbacks.on_add_expense(&request);
                    true
                }
                Err(errors) => {
                    self.form_errors = errors.iter().map(|e| self.form.error_message(e)).collect();
                    false
                }
            },
            ViewMode::Edit(id) => {
                let Some(original) = expenses.iter().find(|expense| expense.id == id) else {
                    self.form_errors = vec![format!("Expense {} no longer exists", id)];
                    return false;
                };
                match self.form.apply_to_expense(original, &self.draft) {
                    Ok(updated) => {
                        self.callbacks.on_edit_expense(&updated);
                        true
                    }
                    Err(errors) => {
                        self.form_errors = errors.iter().map(|e| self.form.error_message(e)).collect();
                        false
                    }
                }
            }
        };

        if sent {
            self.form_errors.clear();
            self.state.begin_submit();
        }
        sent
    }

    pub fn delete(&mut self, id: RecordId) -> bool {
        if !self.state.begin_submit() {
            return false;
        }
        self.callbacks.on_delete_expense(id);
        true
    }

    pub fn export(&mut self) {
        self.callbacks.on_export();
    }

    /// Report the outcome of the last create, update or delete
    pub fn finish_submit(&mut self, outcome: SubmitOutcome, notifications: &mut NotificationQueue) {
        let succeeded = matches!(outcome, SubmitOutcome::Succeeded { .. });
        self.state.finish_submit(outcome, notifications);
        if succeeded {
            self.draft = ExpenseDraft::empty();
        }
    }
}
