//! # Goal List State
//!
//! The career goals page. Goals are browse-only here: search, category filter
//! and column sorting over the fetched snapshot, with mean progress as the
//! list summary.

use shared::{CareerGoal, GoalField, GoalStatus, ViewParams};

use super::list_view_state::ListViewState;
use super::resource_cache::Snapshot;
use crate::backend::domain::{ListView, MemoizedView, StatusLabel};

pub struct GoalListView {
    state: ListViewState<CareerGoal>,
    memo: MemoizedView<GoalField>,
}

impl GoalListView {
    pub fn new(params: ViewParams<GoalField>) -> Self {
        Self {
            state: ListViewState::new(params),
            memo: MemoizedView::new(),
        }
    }

    pub fn state(&self) -> &ListViewState<CareerGoal> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ListViewState<CareerGoal> {
        &mut self.state
    }

    /// Visible goals; `average` is the mean progress percentage
    pub fn visible<'a>(&mut self, snapshot: &'a Snapshot<Vec<CareerGoal>>) -> ListView<'a, CareerGoal> {
        self.memo.view(&snapshot.data, snapshot.revision, self.state.params())
    }

    pub fn recomputations(&self) -> u64 {
        self.memo.recomputations()
    }
}

/// Number of goals in `view` marked completed
pub fn completed_goals(view: &ListView<'_, CareerGoal>) -> usize {
    view.records
        .iter()
        .filter(|goal| StatusLabel::parse(goal.status.as_deref()) == StatusLabel::Known(GoalStatus::Completed))
        .count()
}
