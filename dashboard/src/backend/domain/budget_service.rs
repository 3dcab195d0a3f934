//! Budget progress calculations.
//!
//! Budgets are per-category spending limits. Progress can use the
//! `spent_amount` reported by the API, or it can be recomputed from the
//! current expense snapshot so the card agrees with the expense list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::{Budget, Expense, RecordId};

use super::list_view::ListRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub budget_id: RecordId,
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub spent: f64,
    pub remaining: f64,
    pub spent_percentage: f64,
    pub alert_threshold: f64,
}

impl BudgetProgress {
    pub fn new(budget: &Budget, spent: f64) -> Self {
        let spent_percentage = if budget.amount > 0.0 {
            spent / budget.amount * 100.0
        } else {
            0.0
        };

        Self {
            budget_id: budget.id,
            name: budget.name.clone(),
            category: budget.category.clone(),
            amount: budget.amount,
            spent,
            remaining: budget.amount - spent,
            spent_percentage,
            alert_threshold: budget.alert_threshold,
        }
    }

    /// Progress from the API's own `spent_amount`
    pub fn from_budget(budget: &Budget) -> Self {
        Self::new(budget, budget.spent_amount)
    }

    pub fn is_over_threshold(&self) -> bool {
        self.spent_percentage >= self.alert_threshold
    }

    pub fn is_exceeded(&self) -> bool {
        self.remaining < 0.0
    }
}

/// Sum of expense amounts per category; malformed amounts count as 0
pub fn spending_by_category(expenses: &[Expense]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for expense in expenses {
        let Some(category) = expense.category.as_deref() else {
            continue;
        };
        let amount = ListRecord::amount(expense);
        *totals.entry(category.to_string()).or_insert(0.0) += if amount.is_nan() { 0.0 } else { amount };
    }
    totals
}

/// Progress of every budget, with spending recomputed from `expenses`
pub fn budget_progress(budgets: &[Budget], expenses: &[Expense]) -> Vec<BudgetProgress> {
    let spending = spending_by_category(expenses);
    budgets
        .iter()
        .map(|budget| {
            let spent = spending.get(&budget.category).copied().unwrap_or(0.0);
            BudgetProgress::new(budget, spent)
        })
        .collect()
}
