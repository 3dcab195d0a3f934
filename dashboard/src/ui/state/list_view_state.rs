//! # List View State
//!
//! Framework-agnostic state behind every list screen.
//!
//! ## Responsibilities:
//! - Browse / create / edit mode transitions
//! - The pending flag that blocks double submits
//! - Filter and sort parameters owned by this view instance
//!
//! ## Purpose:
//! Two instances of the same screen never share parameters: each owns its
//! `ViewParams`, so filtering one list can't leak into another.

use shared::{CategoryFilter, RecordId, SortOrder, ViewParams};

use super::notifications::NotificationQueue;
use crate::backend::domain::ListRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Browse,
    Create,
    Edit(RecordId),
}

/// Result of an async submit, reported back to the view
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Succeeded { message: Option<String> },
    Failed { message: String },
}

pub struct ListViewState<R: ListRecord> {
    mode: ViewMode,
    pending: bool,
    params: ViewParams<R::Field>,
}

impl<R: ListRecord> ListViewState<R> {
    pub fn new(params: ViewParams<R::Field>) -> Self {
        Self {
            mode: ViewMode::Browse,
            pending: false,
            params,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn params(&self) -> &ViewParams<R::Field> {
        &self.params
    }

    pub fn open_create(&mut self) {
        self.mode = ViewMode::Create;
    }

    pub fn open_edit(&mut self, id: RecordId) {
        self.mode = ViewMode::Edit(id);
    }

    /// Leave the dialog. Ignored while a submit is in flight.
    pub fn close(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.mode = ViewMode::Browse;
        true
    }

    pub fn can_submit(&self) -> bool {
        !self.pending
    }

    /// Mark a submit as started; false when one is already pending
    pub fn begin_submit(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Clear the pending flag and apply the outcome
    pub fn finish_submit(&mut self, outcome: SubmitOutcome, notifications: &mut NotificationQueue) {
        self.pending = false;
        match outcome {
            SubmitOutcome::Succeeded { message } => {
                self.mode = ViewMode::Browse;
                if let Some(message) = message {
                    notifications.push_success(message);
                }
            }
            SubmitOutcome::Failed { message } => {
                notifications.push_error(message);
            }
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.params.search_term = term.into();
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.params.filter = filter;
    }

    /// Set the filter from a `<select>` value where "all" clears it
    pub fn set_filter_from_ui(&mut self, value: &str) {
        self.params.filter = CategoryFilter::from_ui_value(value);
    }

    pub fn set_sort_field(&mut self, field: R::Field) {
        self.params.sort_field = field;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.params.sort_order = order;
    }

    /// Clicking the active column flips the order; another column starts ascending
    pub fn toggle_sort(&mut self, field: R::Field) {
        if self.params.sort_field == field {
            self.params.sort_order = self.params.sort_order.reversed();
        } else {
            self.params.sort_field = field;
            self.params.sort_order = SortOrder::Ascending;
        }
    }
}

impl<R: ListRecord> Default for ListViewState<R>
where
    R::Field: Default,
{
    fn default() -> Self {
        Self::new(ViewParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Expense, ExpenseField, TaskField, Task};

    #[test]
    fn test_mode_transitions() {
        let mut state: ListViewState<Expense> = ListViewState::default();
        assert_eq!(state.mode(), ViewMode::Browse);

        state.open_edit(4);
        assert_eq!(state.mode(), ViewMode::Edit(4));

        assert!(state.close());
        assert_eq!(state.mode(), ViewMode::Browse);
    }

    #[test]
    fn test_double_submit_is_blocked() {
        let mut state: ListViewState<Expense> = ListViewState::default();
        state.open_create();

        assert!(state.begin_submit());
        assert!(!state.can_submit());
        assert!(!state.begin_submit());
        assert!(!state.close());
        assert_eq!(state.mode(), ViewMode::Create);
    }

    #[test]
    fn test_failed_submit_keeps_dialog_open() {
        let mut state: ListViewState<Expense> = ListViewState::default();
        let mut notifications = NotificationQueue::new();
        state.open_create();
        state.begin_submit();

        state.finish_submit(
            SubmitOutcome::Failed {
                message: "Server unavailable".to_string(),
            },
            &mut notifications,
        );

        assert!(!state.is_pending());
        assert_eq!(state.mode(), ViewMode::Create);
        assert_eq!(notifications.drain()[0].message, "Server unavailable");
    }

    #[test]
    fn test_successful_submit_returns_to_browse() {
        let mut state: ListViewState<Expense> = ListViewState::default();
        let mut notifications = NotificationQueue::new();
        state.open_edit(2);
        state.begin_submit();

        state.finish_submit(SubmitOutcome::Succeeded { message: None }, &mut notifications);

        assert_eq!(state.mode(), ViewMode::Browse);
        assert!(state.can_submit());
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_toggle_sort() {
        let mut state: ListViewState<Task> = ListViewState::default();
        assert_eq!(state.params().sort_field, TaskField::DueDate);

        state.toggle_sort(TaskField::DueDate);
        assert_eq!(state.params().sort_order, SortOrder::Descending);

        state.toggle_sort(TaskField::Priority);
        assert_eq!(state.params().sort_field, TaskField::Priority);
        assert_eq!(state.params().sort_order, SortOrder::Ascending);
    }

    #[test]
    fn test_instances_own_their_params() {
        let mut first: ListViewState<Expense> = ListViewState::default();
        let second: ListViewState<Expense> = ListViewState::default();

        first.set_filter_from_ui("food");
        first.set_sort_field(ExpenseField::Amount);

        assert_eq!(first.params().filter, CategoryFilter::Only("food".to_string()));
        assert_eq!(second.params().filter, CategoryFilter::All);
        assert_eq!(second.params().sort_field, ExpenseField::Date);
    }
}
