use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by the API. Stable for the lifetime of a record.
pub type RecordId = i64;

/// Numeric field that the API may send either as a JSON number or as a
/// numeric string ("20", "12.50").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// Numeric value, or `NaN` when the text form does not parse
    pub fn value(&self) -> f64 {
        match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        }
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        LooseNumber::Number(value)
    }
}

impl From<&str> for LooseNumber {
    fn from(value: &str) -> Self {
        LooseNumber::Text(value.to_string())
    }
}

/// A single expense as returned by the finance API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    /// Amount spent; absent or malformed amounts are kept as-is and read as `NaN`
    #[serde(default)]
    pub amount: Option<LooseNumber>,
    #[serde(default)]
    pub description: String,
    /// e.g. "food", "transport", "education", "entertainment"
    #[serde(default)]
    pub category: Option<String>,
    /// e.g. "restaurant", "groceries" under "food"
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Date of the expense (YYYY-MM-DD or RFC 3339)
    #[serde(default)]
    pub date: Option<String>,
    /// "cash", "card", "upi", "bank_transfer"
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    /// "weekly", "monthly", "yearly"
    #[serde(default)]
    pub recurring_frequency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw priority label ("low", "medium", "high", "urgent")
    #[serde(default)]
    pub priority: Option<String>,
    /// Raw status label ("pending", "in_progress", "completed", ...)
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    /// "work", "personal", ...
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// A career goal tracked on the career page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerGoal {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// "technical", "leadership", "certification", ...
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub progress_percentage: Option<LooseNumber>,
}

/// One mood log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: RecordId,
    /// 1-10 scale (1 = very bad, 10 = excellent)
    pub mood_score: u8,
    #[serde(default)]
    pub mood_label: Option<String>,
    #[serde(default)]
    pub energy_level: Option<u8>,
    #[serde(default)]
    pub stress_level: Option<u8>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub exercise_minutes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Spending limit for one expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: RecordId,
    pub name: String,
    /// Matches expense categories
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub spent_amount: f64,
    /// "weekly", "monthly", "yearly", "custom"
    #[serde(default = "default_budget_period")]
    pub period: String,
    /// Percentage of the budget at which an alert is raised
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
}

fn default_budget_period() -> String {
    "monthly".to_string()
}

fn default_alert_threshold() -> f64 {
    80.0
}

/// The user's configured mini assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniAssistant {
    pub id: RecordId,
    pub name: String,
    pub avatar: String,
    /// "friendly", "professional", "motivational"
    pub personality: String,
    #[serde(default)]
    pub color_theme: Option<String>,
    #[serde(default)]
    pub greeting_message: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// A message exchanged with the mini assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantInteraction {
    pub id: RecordId,
    /// "user", "reply", "greeting", "reminder", "suggestion"
    pub interaction_type: String,
    pub content: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    /// Defaults to today when absent
    pub date: Option<String>,
    pub payment_method: Option<String>,
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<String>,
    pub category: Option<String>,
    pub estimated_minutes: Option<u32>,
}

/// Payload submitted by the mood check-in widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSubmission {
    pub mood_score: u8,
    pub mood_label: Option<String>,
    pub energy_level: Option<u8>,
    pub stress_level: Option<u8>,
    pub sleep_hours: Option<f64>,
    pub exercise_minutes: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessageRequest {
    pub content: String,
}

/// CSV export of the visible expense list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportExpensesResponse {
    pub csv_content: String,
    pub filename: String,
    pub record_count: usize,
}

/// Category filter of a list view. `All` is its own variant so that no real
/// category label can be mistaken for "no filtering".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Interpret the value of a category `<select>`: "all" or an empty value
    /// clears the filter
    pub fn from_ui_value(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Filter and sort configuration owned by one list view instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewParams<F> {
    pub search_term: String,
    pub filter: CategoryFilter,
    pub sort_field: F,
    pub sort_order: SortOrder,
}

impl<F> ViewParams<F> {
    pub fn new(sort_field: F, sort_order: SortOrder) -> Self {
        Self {
            search_term: String::new(),
            filter: CategoryFilter::All,
            sort_field,
            sort_order,
        }
    }
}

impl<F: Default> Default for ViewParams<F> {
    fn default() -> Self {
        Self::new(F::default(), SortOrder::default())
    }
}

/// Error returned when a field, status or priority label is not recognized
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown label: {}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

/// Declares a closed label enumeration with snake_case wire names,
/// case-insensitive parsing and a `label()` accessor. Variant attributes pass
/// through, so `#[derive(Default)]` on the enum pairs with `#[default]` on a variant.
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
                match normalized.as_str() {
                    $($label => Ok($name::$variant),)+
                    _ => Err(UnknownLabel(s.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

label_enum!(
    /// Lifecycle of a task
    TaskStatus {
        Pending => "pending",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
        OnHold => "on_hold",
    }
);

label_enum!(
    /// Lifecycle of a career or financial goal
    GoalStatus {
        Active => "active",
        Completed => "completed",
        Paused => "paused",
        Cancelled => "cancelled",
    }
);

label_enum!(
    Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
);

impl Priority {
    /// Rank used for ordering, low = 1 .. urgent = 4
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

label_enum!(
    /// Sortable attributes of an expense
    #[derive(Default)]
    ExpenseField {
        #[default]
        Date => "date",
        Amount => "amount",
        Description => "description",
        Category => "category",
    }
);

label_enum!(
    /// Sortable attributes of a task
    #[derive(Default)]
    TaskField {
        Title => "title",
        #[default]
        DueDate => "due_date",
        Priority => "priority",
        Status => "status",
        Category => "category",
    }
);

label_enum!(
    /// Sortable attributes of a career goal
    #[derive(Default)]
    GoalField {
        Title => "title",
        #[default]
        TargetDate => "target_date",
        Progress => "progress",
        Priority => "priority",
        Status => "status",
    }
);

label_enum!(
    /// Sortable attributes of a mood entry
    #[derive(Default)]
    MoodField {
        #[default]
        Date => "date",
        Score => "score",
    }
);
