//! Expense form domain logic.
//!
//! The add/edit expense dialog holds raw text input in an [`ExpenseDraft`].
//! This service validates the draft, parses the amount, and turns it into
//! either a create request or an updated [`Expense`]. The UI layer only
//! displays the resulting messages.

use serde::{Deserialize, Serialize};
use shared::{CreateExpenseRequest, Expense, LooseNumber};

use super::formatting::{parse_amount, parse_datetime};

/// Raw form input of the expense dialog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount_input: String,
    pub category: String,
    pub subcategory: String,
    pub date: String,
    pub payment_method: String,
    pub notes: String,
    pub is_recurring: bool,
}

impl ExpenseDraft {
    /// Empty draft for the create dialog
    pub fn empty() -> Self {
        Self::default()
    }

    /// Draft pre-filled from an existing expense for the edit dialog
    pub fn from_expense(expense: &Expense) -> Self {
        let amount_input = match &expense.amount {
            Some(LooseNumber::Number(value)) => format!("{:.2}", value),
            Some(LooseNumber::Text(text)) => text.clone(),
            None => String::new(),
        };

        Self {
            description: expense.description.clone(),
            amount_input,
            category: expense.category.clone().unwrap_or_default(),
            subcategory: expense.subcategory.clone().unwrap_or_default(),
            date: expense.date.clone().unwrap_or_default(),
            payment_method: expense.payment_method.clone().unwrap_or_default(),
            notes: expense.notes.clone().unwrap_or_default(),
            is_recurring: expense.is_recurring,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpenseValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    EmptyAmount,
    InvalidAmount(String),
    AmountNotPositive,
    AmountTooLarge(f64),
    EmptyCategory,
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFormValidation {
    pub is_valid: bool,
    pub errors: Vec<ExpenseValidationError>,
    pub cleaned_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFormConfig {
    pub max_description_length: usize,
    pub max_amount: f64,
    pub currency_symbol: String,
}

impl Default for ExpenseFormConfig {
    fn default() -> Self {
        Self {
            max_description_length: 500,
            max_amount: 10_000_000.0,
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Validates expense drafts and converts them into API payloads
#[derive(Debug, Clone, Default)]
pub struct ExpenseFormService {
    config: ExpenseFormConfig,
}

impl ExpenseFormService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExpenseFormConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, draft: &ExpenseDraft) -> ExpenseFormValidation {
        let mut errors = Vec::new();

        let description = draft.description.trim();
        if description.is_empty() {
            errors.push(ExpenseValidationError::EmptyDescription);
        } else if description.chars().count() > self.config.max_description_length {
            errors.push(ExpenseValidationError::DescriptionTooLong(description.chars().count()));
        }

        let cleaned_amount = if draft.amount_input.trim().is_empty() {
            errors.push(ExpenseValidationError::EmptyAmount);
            None
        } else {
            match parse_amount(&draft.amount_input) {
                Some(amount) if amount <= 0.0 => {
                    errors.push(ExpenseValidationError::AmountNotPositive);
                    None
                }
                Some(amount) if amount > self.config.max_amount => {
                    errors.push(ExpenseValidationError::AmountTooLarge(self.config.max_amount));
                    None
                }
                Some(amount) => Some(amount),
                None => {
                    errors.push(ExpenseValidationError::InvalidAmount(draft.amount_input.trim().to_string()));
                    None
                }
            }
        };

        if draft.category.trim().is_empty() {
            errors.push(ExpenseValidationError::EmptyCategory);
        }

        let date = draft.date.trim();
        if !date.is_empty() && parse_datetime(date).is_none() {
            errors.push(ExpenseValidationError::InvalidDate(date.to_string()));
        }

        ExpenseFormValidation {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
        }
    }

    /// Build a create request from a draft, or the validation errors
    pub fn to_create_request(&self, draft: &ExpenseDraft) -> Result<CreateExpenseRequest, Vec<ExpenseValidationError>> {
        let validation = self.validate(draft);
        let amount = match validation.cleaned_amount {
            Some(amount) if validation.is_valid => amount,
            _ => return Err(validation.errors),
        };

        Ok(CreateExpenseRequest {
            amount,
            description: draft.description.trim().to_string(),
            category: draft.category.trim().to_string(),
            subcategory: non_empty(&draft.subcategory),
            date: non_empty(&draft.date),
            payment_method: non_empty(&draft.payment_method),
            is_recurring: draft.is_recurring,
            recurring_frequency: None,
            notes: non_empty(&draft.notes),
        })
    }

    /// Apply a validated draft on top of an existing expense, keeping the
    /// fields the dialog does not edit
    pub fn apply_to_expense(&self, expense: &Expense, draft: &ExpenseDraft) -> Result<Expense, Vec<ExpenseValidationError>> {
        let request = self.to_create_request(draft)?;

        let mut updated = expense.clone();
        updated.amount = Some(LooseNumber::Number(request.amount));
        updated.description = request.description;
        updated.category = Some(request.category);
        updated.subcategory = request.subcategory;
        updated.date = request.date.or_else(|| expense.date.clone());
        updated.payment_method = request.payment_method;
        updated.is_recurring = request.is_recurring;
        updated.notes = request.notes;
        Ok(updated)
    }

    pub fn error_message(&self, error: &ExpenseValidationError) -> String {
        match error {
            ExpenseValidationError::EmptyDescription => "Please enter a description".to_string(),
            ExpenseValidationError::DescriptionTooLong(len) => format!(
                "Description is too long ({} characters). Maximum is {}.",
                len, self.config.max_description_length
            ),
            ExpenseValidationError::EmptyAmount => "Please enter an amount".to_string(),
            ExpenseValidationError::InvalidAmount(input) => {
                format!("'{}' is not a valid amount (try 250 or 1,250.50)", input)
            }
            ExpenseValidationError::AmountNotPositive => "Amount must be greater than 0".to_string(),
            ExpenseValidationError::AmountTooLarge(max) => {
                format!("Amount is too large. Maximum is {}{:.2}", self.config.currency_symbol, max)
            }
            ExpenseValidationError::EmptyCategory => "Please choose a category".to_string(),
            ExpenseValidationError::InvalidDate(input) => format!("'{}' is not a valid date (use YYYY-MM-DD)", input),
        }
    }

    /// First error message, for forms that show a single line
    pub fn first_error_message(&self, errors: &[ExpenseValidationError]) -> Option<String> {
        errors.first().map(|error| self.error_message(error))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_draft(description: &str, amount: &str, category: &str) -> ExpenseDraft {
        ExpenseDraft {
            description: description.to_string(),
            amount_input: amount.to_string(),
            category: category.to_string(),
            ..ExpenseDraft::empty()
        }
    }

    #[test]
    fn test_valid_draft_builds_request() {
        let service = ExpenseFormService::new();
        let mut draft = create_test_draft("  Lunch at canteen ", "₹1,250.50", "food");
        draft.date = "2024-03-05".to_string();

        let request = service.to_create_request(&draft).unwrap();

        assert_eq!(request.amount, 1250.50);
        assert_eq!(request.description, "Lunch at canteen");
        assert_eq!(request.category, "food");
        assert_eq!(request.date.as_deref(), Some("2024-03-05"));
        assert_eq!(request.notes, None);
    }

    #[test]
    fn test_empty_draft_reports_every_missing_field() {
        let service = ExpenseFormService::new();

        let validation = service.validate(&ExpenseDraft::empty());

        assert!(!validation.is_valid);
        assert_eq!(
            validation.errors,
            vec![
                ExpenseValidationError::EmptyDescription,
                ExpenseValidationError::EmptyAmount,
                ExpenseValidationError::EmptyCategory,
            ]
        );
    }

    #[test]
    fn test_amount_rules() {
        let service = ExpenseFormService::new();

        let negative = service.validate(&create_test_draft("Refund", "-20", "food"));
        assert_eq!(negative.errors, vec![ExpenseValidationError::AmountNotPositive]);

        let garbage = service.validate(&create_test_draft("Snacks", "twenty", "food"));
        assert_eq!(garbage.errors, vec![ExpenseValidationError::InvalidAmount("twenty".to_string())]);

        let huge = service.validate(&create_test_draft("Flat", "99999999", "housing"));
        assert_eq!(huge.errors, vec![ExpenseValidationError::AmountTooLarge(10_000_000.0)]);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let service = ExpenseFormService::new();
        let mut draft = create_test_draft("Bus pass", "500", "transport");
        draft.date = "05/03/2024".to_string();

        let errors = service.to_create_request(&draft).unwrap_err();

        assert_eq!(errors, vec![ExpenseValidationError::InvalidDate("05/03/2024".to_string())]);
        assert_eq!(
            service.first_error_message(&errors).unwrap(),
            "'05/03/2024' is not a valid date (use YYYY-MM-DD)"
        );
    }

    #[test]
    fn test_edit_round_trips_through_draft() {
        let service = ExpenseFormService::new();
        let expense: Expense = serde_json::from_str(
            r#"{"id": 7, "amount": "20", "description": "Lunch", "category": "food",
                "date": "2024-01-01", "merchant": "Canteen"}"#,
        )
        .unwrap();

        let mut draft = ExpenseDraft::from_expense(&expense);
        assert_eq!(draft.amount_input, "20");
        draft.amount_input = "35".to_string();

        let updated = service.apply_to_expense(&expense, &draft).unwrap();

        assert_eq!(updated.id, 7);
        assert_eq!(updated.amount, Some(LooseNumber::Number(35.0)));
        assert_eq!(updated.merchant.as_deref(), Some("Canteen"));
        assert_eq!(updated.date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_description_length_limit_uses_config() {
        let service = ExpenseFormService::with_config(ExpenseFormConfig {
            max_description_length: 5,
            ..ExpenseFormConfig::default()
        });

        let validation = service.validate(&create_test_draft("Groceries", "10", "food"));

        assert_eq!(validation.errors, vec![ExpenseValidationError::DescriptionTooLong(9)]);
        assert_eq!(
            service.error_message(&validation.errors[0]),
            "Description is too long (9 characters). Maximum is 5."
        );
    }
}
