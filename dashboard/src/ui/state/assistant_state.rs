//! # Assistant Widget State
//!
//! The mini assistant chat bubble. Having no assistant configured is a normal
//! state that shows the setup prompt, not an error.
//!
//! ## Responsibilities:
//! - Configured / not-configured state
//! - Chat history and the message being typed
//! - Keeping the typed message when a send fails
//! - Spotting "I spent ₹120 on food" messages and preparing an expense draft

use shared::{AssistantInteraction, CreateExpenseRequest, MiniAssistant};

use super::notifications::NotificationQueue;
use crate::backend::domain::{recognize_quick_expense, QuickExpense};
use crate::backend::storage::ApiError;

/// Category used when a quick-expense message doesn't name one
const DEFAULT_QUICK_CATEGORY: &str = "other";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssistantState {
    #[default]
    NotConfigured,
    Configured(MiniAssistant),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub from_user: bool,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct AssistantWidgetState {
    assistant: AssistantState,
    history: Vec<ChatMessage>,
    draft: String,
    in_flight: Option<String>,
    quick_expense: Option<QuickExpense>,
}

impl AssistantWidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assistant(&self) -> &AssistantState {
        &self.assistant
    }

    /// Apply the result of fetching the assistant profile
    pub fn set_assistant(&mut self, assistant: Option<MiniAssistant>) {
        self.assistant = match assistant {
            Some(assistant) => {
                if self.history.is_empty() {
                    if let Some(greeting) = assistant.greeting_message.clone() {
                        self.history.push(ChatMessage {
                            from_user: false,
                            content: greeting,
                        });
                    }
                }
                AssistantState::Configured(assistant)
            }
            None => AssistantState::NotConfigured,
        };
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.assistant, AssistantState::Configured(_))
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Expense parsed from the last message that read as an add-expense request
    pub fn quick_expense(&self) -> Option<&QuickExpense> {
        self.quick_expense.as_ref()
    }

    /// Turn the recognized quick expense into a create request
    pub fn quick_expense_request(&self, date: Option<String>) -> Option<CreateExpenseRequest> {
        self.quick_expense
            .clone()
            .and_then(|parsed| parsed.into_request(DEFAULT_QUICK_CATEGORY, date))
    }

    pub fn dismiss_quick_expense(&mut self) {
        self.quick_expense = None;
    }

    /// Take the draft for sending. `None` when nothing can be sent.
    pub fn begin_send(&mut self) -> Option<String> {
        if !self.is_configured() || self.in_flight.is_some() {
            return None;
        }
        let message = self.draft.trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.quick_expense = recognize_quick_expense(&message);
        self.history.push(ChatMessage {
            from_user: true,
            content: message.clone(),
        });
        self.draft.clear();
        self.in_flight = Some(message.clone());
        Some(message)
    }

    pub fn finish_send(
        &mut self,
        result: Result<AssistantInteraction, ApiError>,
        notifications: &mut NotificationQueue,
    ) {
        let Some(sent) = self.in_flight.take() else {
            return;
        };

        match result {
            Ok(reply) => self.history.push(ChatMessage {
                from_user: false,
                content: reply.content,
            }),
            Err(error) => {
                // Put the text back so the user can resend it
                if self.history.last().map(|m| m.from_user && m.content == sent).unwrap_or(false) {
                    self.history.pop();
                }
                if self.draft.is_empty() {
                    self.draft = sent;
                }
                self.quick_expense = None;
                notifications.push_api_error(&error);
            }
        }
    }
}
