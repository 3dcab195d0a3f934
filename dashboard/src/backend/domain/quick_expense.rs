//! Recognizes "I spent ₹120 on food"-style chat messages so the assistant
//! widget can offer to log them as expenses.

use once_cell::sync::Lazy;
use regex::Regex;
use shared::CreateExpenseRequest;

const ADD_EXPENSE_PHRASES: [&str; 5] = [
    "add expense",
    "log expense",
    "record expense",
    "i spent",
    "added an expense",
];

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:rs\.?|₹|\$)?\s*([0-9]+(?:\.[0-9]{1,2})?)").expect("valid amount pattern"));

static CATEGORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:on|for)\s+([a-zA-Z\-_/]+)").expect("valid category pattern"));

static QUOTED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"]([^'"]{3,})['"]"#).expect("valid quoted pattern"));

/// Fields pulled out of a free-text expense message
#[derive(Debug, Clone, PartialEq)]
pub struct QuickExpense {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl QuickExpense {
    /// Build a create request. An amount is required; the category falls back
    /// to `default_category` and the description to the category name.
    pub fn into_request(self, default_category: &str, date: Option<String>) -> Option<CreateExpenseRequest> {
        let amount = self.amount.filter(|amount| *amount > 0.0)?;
        let category = self.category.unwrap_or_else(|| default_category.to_string());
        let description = self.description.unwrap_or_else(|| category.clone());

        Some(CreateExpenseRequest {
            amount,
            description,
            category,
            subcategory: None,
            date,
            payment_method: None,
            is_recurring: false,
            recurring_frequency: None,
            notes: None,
        })
    }
}

/// Whether the message asks to record an expense
pub fn is_add_expense(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ADD_EXPENSE_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// Extract amount, category and description from a message
pub fn parse_quick_expense(text: &str) -> QuickExpense {
    let amount = AMOUNT_PATTERN
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|matched| matched.as_str().parse::<f64>().ok());

    let category_match = CATEGORY_PATTERN.captures(text);
    let category = category_match
        .as_ref()
        .and_then(|captures| captures.get(1))
        .map(|matched| matched.as_str().trim().to_lowercase());

    let trailing_description = category_match
        .as_ref()
        .and_then(|captures| captures.get(0))
        .map(|whole| text[whole.end()..].trim_matches(|c: char| matches!(c, ' ' | '.' | ',' | '-' | ':')))
        .filter(|rest| !rest.is_empty())
        .map(str::to_string);

    let description = trailing_description.or_else(|| {
        QUOTED_PATTERN
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|matched| matched.as_str().trim().to_string())
    });

    QuickExpense {
        amount,
        category,
        description,
    }
}

/// Parse the message only when it reads as an add-expense request
pub fn recognize_quick_expense(text: &str) -> Option<QuickExpense> {
    if !is_add_expense(text) {
        return None;
    }
    let parsed = parse_quick_expense(text);
    parsed.amount.map(|_| parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_add_expense_intent() {
        assert!(is_add_expense("I spent 120 on food"));
        assert!(is_add_expense("please LOG EXPENSE of 40"));
        assert!(!is_add_expense("how is my budget looking?"));
    }

    #[test]
    fn test_parses_amount_category_and_description() {
        let parsed = parse_quick_expense("I spent ₹120.50 on food at the canteen.");

        assert_eq!(parsed.amount, Some(120.50));
        assert_eq!(parsed.category.as_deref(), Some("food"));
        assert_eq!(parsed.description.as_deref(), Some("at the canteen"));
    }

    #[test]
    fn test_parses_rupee_prefix_and_for_keyword() {
        let parsed = parse_quick_expense("add expense Rs. 45 for Transport");

        assert_eq!(parsed.amount, Some(45.0));
        assert_eq!(parsed.category.as_deref(), Some("transport"));
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn test_falls_back_to_quoted_description() {
        let parsed = parse_quick_expense("record expense $15 'movie night'");

        assert_eq!(parsed.amount, Some(15.0));
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.description.as_deref(), Some("movie night"));
    }

    #[test]
    fn test_into_request_requires_positive_amount() {
        let parsed = parse_quick_expense("i spent 200 on books");
        let request = parsed.into_request("misc", None).unwrap();

        assert_eq!(request.amount, 200.0);
        assert_eq!(request.category, "books");
        assert_eq!(request.description, "books");

        let no_amount = parse_quick_expense("i spent a lot on food");
        assert!(no_amount.into_request("misc", None).is_none());
    }

    #[test]
    fn test_recognize_ignores_plain_chat() {
        assert!(recognize_quick_expense("I spent 60 on snacks").is_some());
        assert!(recognize_quick_expense("what should I study next?").is_none());
        assert!(recognize_quick_expense("i spent nothing today").is_none());
    }
}
